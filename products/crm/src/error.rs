use std::collections::BTreeMap;

use platform_db::DbError;
use thiserror::Error;

pub type CrmResult<T> = Result<T, CrmError>;

/// Field-level validation messages keyed by the form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Drop one message. Returns whether the field had one.
    pub fn remove(&mut self, field: &str) -> bool {
        self.0.remove(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn into_result(self) -> CrmResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CrmError::Validation(self))
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CrmError {
    #[error("validation failed on {}", .0.fields().collect::<Vec<_>>().join(", "))]
    Validation(FieldErrors),
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{0}")]
    Unavailable(String),
    #[error("another submission is still in progress")]
    Busy,
    #[error("{0}")]
    InvalidTransition(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl CrmError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field, message);
        Self::Validation(errors)
    }
}

impl From<DbError> for CrmError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { kind, id } => CrmError::NotFound { kind, id },
            DbError::DuplicateId { .. } => CrmError::Conflict(err.to_string()),
            DbError::Unavailable { .. } => CrmError::Unavailable(err.to_string()),
            DbError::Credentials(message) => CrmError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_one_error_keeps_the_rest() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "Client name is required.");
        errors.insert("email", "Email is required.");
        assert!(errors.remove("name"));
        assert!(!errors.remove("name"));
        assert_eq!(errors.get("email"), Some("Email is required."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn store_failures_map_onto_crm_errors() {
        let missing = CrmError::from(DbError::NotFound {
            kind: "client",
            id: "client99".into(),
        });
        assert_eq!(missing.to_string(), "client client99 not found");
        let flaky = CrmError::from(DbError::Unavailable {
            kind: "task",
            op: "update",
        });
        assert!(matches!(flaky, CrmError::Unavailable(_)));
    }

    #[test]
    fn validation_message_lists_fields() {
        let err = CrmError::validation("endDate", "End date cannot be before start date.");
        assert_eq!(err.to_string(), "validation failed on endDate");
    }
}
