use entity::{
    RecordId,
    clients::{Client, Status},
};

use super::{
    Draft, FormField, Mode, ValidationContext, is_valid_email, optional_text, require, require_text,
};
use crate::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientField {
    Name,
    Email,
    Company,
    Phone,
    Status,
    AssignedManager,
    Notes,
    Tags,
}

impl FormField for ClientField {
    fn name(self) -> &'static str {
        match self {
            ClientField::Name => "name",
            ClientField::Email => "email",
            ClientField::Company => "company",
            ClientField::Phone => "phone",
            ClientField::Status => "status",
            ClientField::AssignedManager => "assignedManagerId",
            ClientField::Notes => "notes",
            ClientField::Tags => "tags",
        }
    }
}

/// Client form state. The email is fixed once the client exists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub status: Option<Status>,
    pub assigned_manager_id: Option<RecordId>,
    pub notes: String,
    pub tags: Vec<String>,
}

impl ClientDraft {
    pub fn toggle_tag(&mut self, tag: &str) {
        match self.tags.iter().position(|existing| existing == tag) {
            Some(index) => {
                self.tags.remove(index);
            }
            None => self.tags.push(tag.to_string()),
        }
    }
}

impl Draft for ClientDraft {
    type Record = Client;
    type Field = ClientField;

    const NOUN: &'static str = "Client";

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            company: client.company.clone(),
            phone: client.phone.clone().unwrap_or_default(),
            status: Some(client.status),
            assigned_manager_id: client.assigned_manager_id.clone(),
            notes: client.notes.clone().unwrap_or_default(),
            tags: client.tags.clone(),
        }
    }

    fn validate(&self, mode: Mode, _ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Client name is required.");
        if mode == Mode::Create {
            if self.email.trim().is_empty() {
                errors.insert("email", "Email is required.");
            } else if !is_valid_email(&self.email) {
                errors.insert("email", "Email is invalid.");
            }
        }
        require(&mut errors, "status", &self.status, "Status is required.");
        require(
            &mut errors,
            "assignedManagerId",
            &self.assigned_manager_id,
            "Assigned manager is required.",
        );
        errors
    }

    fn build(&self, original: Option<&Client>, ctx: &ValidationContext) -> Client {
        match original {
            Some(existing) => Client {
                name: self.name.trim().to_string(),
                company: self.company.trim().to_string(),
                phone: optional_text(&self.phone),
                status: self.status.unwrap_or(existing.status),
                assigned_manager_id: self.assigned_manager_id.clone(),
                notes: optional_text(&self.notes),
                tags: self.tags.clone(),
                ..existing.clone()
            },
            None => Client {
                id: RecordId::generate("client"),
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                company: self.company.trim().to_string(),
                status: self.status.unwrap_or(Status::Lead),
                last_interaction: ctx.today(),
                assigned_manager_id: self.assigned_manager_id.clone(),
                phone: optional_text(&self.phone),
                notes: optional_text(&self.notes),
                tags: self.tags.clone(),
            },
        }
    }

    fn label(client: &Client) -> &str {
        &client.name
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ctx() -> ValidationContext {
        ValidationContext::on(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
    }

    #[test]
    fn new_client_needs_a_valid_email() {
        let draft = ClientDraft {
            name: "Nimbus".into(),
            email: "not-an-email".into(),
            status: Some(Status::Lead),
            assigned_manager_id: Some("user1".into()),
            ..ClientDraft::default()
        };
        let errors = draft.validate(Mode::Create, &ctx());
        assert_eq!(errors.get("email"), Some("Email is invalid."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn edit_ignores_the_read_only_email() {
        let draft = ClientDraft {
            name: "Nimbus".into(),
            email: String::new(),
            status: Some(Status::Active),
            assigned_manager_id: Some("user1".into()),
            ..ClientDraft::default()
        };
        assert!(draft.validate(Mode::Edit, &ctx()).is_empty());
    }

    #[test]
    fn edit_keeps_email_and_last_interaction() {
        let original = Client {
            id: "client1".into(),
            name: "Innovatech Solutions".into(),
            email: "contact@innovatech.com".into(),
            company: "Innovatech Ltd.".into(),
            status: Status::Active,
            last_interaction: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            assigned_manager_id: Some("user1".into()),
            phone: None,
            notes: None,
            tags: vec!["High Value".into()],
        };
        let mut draft = ClientDraft::from_record(&original);
        draft.email = "changed@example.com".into();
        draft.status = Some(Status::Inactive);
        draft.toggle_tag("High Value");
        draft.toggle_tag("Paused");
        let updated = draft.build(Some(&original), &ctx());
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.email, "contact@innovatech.com");
        assert_eq!(updated.last_interaction, original.last_interaction);
        assert_eq!(updated.status, Status::Inactive);
        assert_eq!(updated.tags, vec!["Paused".to_string()]);
    }

    #[test]
    fn new_client_gets_a_fresh_id_and_today() {
        let draft = ClientDraft {
            name: " Nimbus ".into(),
            email: "hi@nimbus.io".into(),
            company: "Nimbus".into(),
            phone: "  ".into(),
            status: Some(Status::Lead),
            assigned_manager_id: Some("user2".into()),
            ..ClientDraft::default()
        };
        let client = draft.build(None, &ctx());
        assert!(client.id.as_str().starts_with("client-"));
        assert_eq!(client.name, "Nimbus");
        assert_eq!(client.phone, None);
        assert_eq!(client.last_interaction, ctx().today());
    }
}
