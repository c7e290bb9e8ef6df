use chrono::NaiveDate;
use entity::{
    RecordId,
    campaigns::{Campaign, Status},
};

use super::{Draft, FormField, Mode, ValidationContext, optional_text, require, require_text};
use crate::FieldErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CampaignField {
    Name,
    Client,
    StartDate,
    EndDate,
    Budget,
    Status,
    Description,
}

impl FormField for CampaignField {
    fn name(self) -> &'static str {
        match self {
            CampaignField::Name => "name",
            CampaignField::Client => "clientId",
            CampaignField::StartDate => "startDate",
            CampaignField::EndDate => "endDate",
            CampaignField::Budget => "budget",
            CampaignField::Status => "status",
            CampaignField::Description => "description",
        }
    }
}

/// Campaign form state. The budget stays text until it validates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignDraft {
    pub name: String,
    pub client_id: Option<RecordId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget: String,
    pub status: Option<Status>,
    pub description: String,
}

impl CampaignDraft {
    fn parsed_budget(&self) -> Option<f64> {
        self.budget
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
    }
}

impl Draft for CampaignDraft {
    type Record = Campaign;
    type Field = CampaignField;

    const NOUN: &'static str = "Campaign";

    fn blank() -> Self {
        Self::default()
    }

    fn from_record(campaign: &Campaign) -> Self {
        Self {
            name: campaign.name.clone(),
            client_id: Some(campaign.client_id.clone()),
            start_date: Some(campaign.start_date),
            end_date: Some(campaign.end_date),
            budget: campaign.budget.to_string(),
            status: Some(campaign.status),
            description: campaign.description.clone().unwrap_or_default(),
        }
    }

    fn validate(&self, _mode: Mode, _ctx: &ValidationContext) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_text(&mut errors, "name", &self.name, "Campaign name is required.");
        require(&mut errors, "clientId", &self.client_id, "Client is required.");
        require(&mut errors, "startDate", &self.start_date, "Start date is required.");
        match (self.start_date, self.end_date) {
            (_, None) => errors.insert("endDate", "End date is required."),
            (Some(start), Some(end)) if end < start => {
                errors.insert("endDate", "End date cannot be before start date.")
            }
            _ => {}
        }
        if self.budget.trim().is_empty() {
            errors.insert("budget", "Budget is required.");
        } else if self.parsed_budget().is_none() {
            errors.insert("budget", "Budget must be a valid positive number.");
        }
        require(&mut errors, "status", &self.status, "Status is required.");
        errors
    }

    fn build(&self, original: Option<&Campaign>, ctx: &ValidationContext) -> Campaign {
        let base = original.cloned().unwrap_or_else(|| Campaign {
            id: RecordId::generate("camp"),
            name: String::new(),
            client_id: RecordId::new(""),
            start_date: ctx.today(),
            end_date: ctx.today(),
            budget: 0.0,
            status: Status::Planning,
            description: None,
        });
        Campaign {
            name: self.name.trim().to_string(),
            client_id: self.client_id.clone().unwrap_or(base.client_id),
            start_date: self.start_date.unwrap_or(base.start_date),
            end_date: self.end_date.unwrap_or(base.end_date),
            budget: self.parsed_budget().unwrap_or(base.budget),
            status: self.status.unwrap_or(base.status),
            description: optional_text(&self.description),
            id: base.id,
        }
    }

    fn label(campaign: &Campaign) -> &str {
        &campaign.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn complete() -> CampaignDraft {
        CampaignDraft {
            name: "Autumn Push".into(),
            client_id: Some("client1".into()),
            start_date: day(2024, 9, 1),
            end_date: day(2024, 10, 1),
            budget: "1200.50".into(),
            status: Some(Status::Planning),
            description: String::new(),
        }
    }

    fn ctx() -> ValidationContext {
        ValidationContext::on(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap())
    }

    #[test]
    fn reversed_dates_flag_the_end_date() {
        let draft = CampaignDraft {
            start_date: day(2024, 4, 1),
            end_date: day(2024, 3, 1),
            ..complete()
        };
        let errors = draft.validate(Mode::Create, &ctx());
        assert_eq!(errors.get("endDate"), Some("End date cannot be before start date."));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn budget_must_parse_and_be_non_negative() {
        for (raw, message) in [
            ("", "Budget is required."),
            ("lots", "Budget must be a valid positive number."),
            ("-5", "Budget must be a valid positive number."),
        ] {
            let draft = CampaignDraft {
                budget: raw.into(),
                ..complete()
            };
            assert_eq!(draft.validate(Mode::Create, &ctx()).get("budget"), Some(message));
        }
        let zero = CampaignDraft {
            budget: "0".into(),
            ..complete()
        };
        assert!(zero.validate(Mode::Create, &ctx()).is_empty());
    }

    #[test]
    fn build_parses_the_budget() {
        let campaign = complete().build(None, &ctx());
        assert!(campaign.id.as_str().starts_with("camp-"));
        assert_eq!(campaign.budget, 1200.5);
        assert_eq!(campaign.description, None);
        assert!(campaign.is_consistent());
    }
}
