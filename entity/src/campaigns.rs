use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::RecordId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: RecordId,
    pub name: String,
    pub client_id: RecordId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub status: Status,
    pub description: Option<String>,
}

impl Campaign {
    /// End date not before start date and a non-negative budget.
    pub fn is_consistent(&self) -> bool {
        self.end_date >= self.start_date && self.budget >= 0.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Planning,
    Active,
    Paused,
    Completed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Planning,
        Status::Active,
        Status::Paused,
        Status::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Planning => "Planning",
            Status::Active => "Active",
            Status::Paused => "Paused",
            Status::Completed => "Completed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(start: (i32, u32, u32), end: (i32, u32, u32), budget: f64) -> Campaign {
        Campaign {
            id: RecordId::from("camp1"),
            name: "Launch".into(),
            client_id: RecordId::from("client1"),
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
            budget,
            status: Status::Planning,
            description: None,
        }
    }

    #[test]
    fn same_day_span_is_consistent() {
        assert!(campaign((2024, 4, 1), (2024, 4, 1), 0.0).is_consistent());
    }

    #[test]
    fn reversed_span_or_negative_budget_is_not() {
        assert!(!campaign((2024, 4, 1), (2024, 3, 1), 10.0).is_consistent());
        assert!(!campaign((2024, 4, 1), (2024, 5, 1), -1.0).is_consistent());
    }
}
