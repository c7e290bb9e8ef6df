use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::RecordId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: RecordId,
    pub client_id: RecordId,
    pub date: NaiveDate,
    pub kind: Kind,
    pub notes: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Email,
    Call,
    Meeting,
    Note,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Email, Kind::Call, Kind::Meeting, Kind::Note];

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Email => "Email",
            Kind::Call => "Call",
            Kind::Meeting => "Meeting",
            Kind::Note => "Note",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}
