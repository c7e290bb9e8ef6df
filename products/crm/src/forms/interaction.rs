use chrono::NaiveDate;
use entity::{
    RecordId,
    interactions::{Interaction, Kind},
};

use super::{Draft, FormField, Mode, ValidationContext, require, require_text};
use crate::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionField {
    Client,
    Kind,
    Date,
    Notes,
}

impl FormField for InteractionField {
    fn name(self) -> &'static str {
        match self {
            InteractionField::Client => "clientId",
            InteractionField::Kind => "type",
            InteractionField::Date => "date",
            InteractionField::Notes => "notes",
        }
    }
}

/// Interaction log entry for one client. `date` starts empty and falls back
/// to today when the dialog is opened through [`InteractionDraft::for_client`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionDraft {
    pub client_id: Option<RecordId>,
    pub kind: Option<Kind>,
    pub date: Option<NaiveDate>,
    pub notes: String,
}

impl InteractionDraft {
    pub fn for_client(client_id: RecordId, ctx: &ValidationContext) -> Self {
        Self {
            client_id: Some(client_id),
            date: Some(ctx.today()),
            ..Self::default()
        }
    }
}

impl Draft for InteractionDraft {
    type Record = Interaction;
    type Field = InteractionField;

    const NOUN: &'static str = "Interaction";

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(interaction: &Interaction) -> Self {
        Self {
            client_id: Some(interaction.client_id.clone()),
            kind: Some(interaction.kind),
            date: Some(interaction.date),
            notes: interaction.notes.clone(),
        }
    }

    fn validate(&self, _mode: Mode, ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require(&mut errors, "clientId", &self.client_id, "Client data is missing.");
        require(&mut errors, "type", &self.kind, "Interaction type is required.");
        match self.date {
            None => errors.insert("date", "Date is required."),
            Some(date) if date > ctx.today() => {
                errors.insert("date", "Date cannot be in the future.")
            }
            Some(_) => {}
        }
        require_text(&mut errors, "notes", &self.notes, "Notes are required.");
        errors
    }

    fn build(&self, original: Option<&Interaction>, ctx: &ValidationContext) -> Interaction {
        Interaction {
            id: original
                .map(|interaction| interaction.id.clone())
                .unwrap_or_else(|| RecordId::generate("int")),
            client_id: self
                .client_id
                .clone()
                .or_else(|| original.map(|interaction| interaction.client_id.clone()))
                .unwrap_or_else(|| RecordId::new("")),
            date: self.date.unwrap_or_else(|| ctx.today()),
            kind: self
                .kind
                .or(original.map(|interaction| interaction.kind))
                .unwrap_or(Kind::Note),
            notes: self.notes.trim().to_string(),
        }
    }

    fn label(interaction: &Interaction) -> &str {
        interaction.kind.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ValidationContext {
        ValidationContext::on(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
    }

    #[test]
    fn opening_for_a_client_defaults_to_today() {
        let draft = InteractionDraft::for_client("client1".into(), &ctx());
        assert_eq!(draft.date, Some(ctx().today()));
        let errors = draft.validate(Mode::Create, &ctx());
        assert_eq!(errors.get("type"), Some("Interaction type is required."));
        assert_eq!(errors.get("notes"), Some("Notes are required."));
        assert!(!errors.contains("date"));
    }

    #[test]
    fn future_dates_are_rejected() {
        let draft = InteractionDraft {
            client_id: Some("client1".into()),
            kind: Some(Kind::Call),
            date: NaiveDate::from_ymd_opt(2024, 5, 21),
            notes: "Called about renewal".into(),
        };
        let errors = draft.validate(Mode::Create, &ctx());
        assert_eq!(errors.get("date"), Some("Date cannot be in the future."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn today_is_the_utc_date() {
        let late_evening = NaiveDate::from_ymd_opt(2024, 5, 20)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap()
            .and_utc();
        let ctx = ValidationContext::at(late_evening);
        let draft = InteractionDraft {
            client_id: Some("client1".into()),
            kind: Some(Kind::Email),
            date: NaiveDate::from_ymd_opt(2024, 5, 21),
            notes: "Sent the proposal".into(),
        };
        assert_eq!(ctx.today(), NaiveDate::from_ymd_opt(2024, 5, 20).unwrap());
        assert!(draft.validate(Mode::Create, &ctx).contains("date"));
    }
}
