use std::fmt;

use entity::{
    RecordId,
    users::{Role, Status, User},
};

use super::{Draft, FormField, Mode, ValidationContext, is_valid_email, require, require_text};
use crate::FieldErrors;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
    Role,
    Password,
    ConfirmPassword,
}

impl FormField for UserField {
    fn name(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Email => "email",
            UserField::Role => "role",
            UserField::Password => "password",
            UserField::ConfirmPassword => "confirmPassword",
        }
    }
}

/// User form state. Passwords are only collected when creating a user and
/// never end up in the [`User`] record.
#[derive(Clone, Default, PartialEq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Draft for UserDraft {
    type Record = User;
    type Field = UserField;

    const NOUN: &'static str = "User";

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: Some(user.role),
            password: String::new(),
            confirm_password: String::new(),
        }
    }

    fn validate(&self, mode: Mode, _ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Name is required");
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.insert("email", "Please enter a valid email address");
        }
        require(&mut errors, "role", &self.role, "Role is required");
        if mode == Mode::Create {
            if self.password.is_empty() {
                errors.insert("password", "Password is required");
            } else if self.password.chars().count() < MIN_PASSWORD_LEN {
                errors.insert("password", "Password must be at least 8 characters");
            }
            if self.password != self.confirm_password {
                errors.insert("confirmPassword", "Passwords don't match");
            }
        }
        errors
    }

    fn build(&self, original: Option<&User>, _ctx: &ValidationContext) -> User {
        match original {
            Some(existing) => User {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                role: self.role.unwrap_or(existing.role),
                ..existing.clone()
            },
            None => User {
                id: RecordId::generate("user"),
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                role: self.role.unwrap_or(Role::Manager),
                status: Status::Active,
            },
        }
    }

    fn label(user: &User) -> &str {
        &user.name
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ctx() -> ValidationContext {
        ValidationContext::on(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
    }

    fn draft(password: &str, confirm: &str) -> UserDraft {
        UserDraft {
            name: "Erin Hale".into(),
            email: "erin@example.com".into(),
            role: Some(Role::Manager),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn short_or_mismatched_passwords_are_rejected_on_create() {
        let errors = draft("short", "short").validate(Mode::Create, &ctx());
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
        let errors = draft("long-enough", "long-enougH").validate(Mode::Create, &ctx());
        assert_eq!(errors.get("confirmPassword"), Some("Passwords don't match"));
        assert!(!errors.contains("password"));
    }

    #[test]
    fn edit_does_not_ask_for_a_password() {
        assert!(draft("", "").validate(Mode::Edit, &ctx()).is_empty());
    }

    #[test]
    fn new_users_start_active() {
        let user = draft("long-enough", "long-enough").build(None, &ctx());
        assert_eq!(user.status, Status::Active);
        assert!(user.id.as_str().starts_with("user-"));
    }

    #[test]
    fn debug_output_hides_the_password() {
        let rendered = format!("{:?}", draft("hunter22!", "hunter22!"));
        assert!(!rendered.contains("hunter22!"));
    }
}
