use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::RecordId;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub status: Status,
    pub last_interaction: NaiveDate,
    pub assigned_manager_id: Option<RecordId>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Lead,
    Active,
    Inactive,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Lead, Status::Active, Status::Inactive];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Lead => "Lead",
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}
