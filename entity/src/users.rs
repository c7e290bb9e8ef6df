use serde::{Deserialize, Serialize};

use crate::RecordId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: Status,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Manager,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Manager];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == value)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Suspended,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Active, Status::Suspended];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Suspended => "Suspended",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }

    /// Status an admin toggle moves the user into.
    pub fn toggled(self) -> Self {
        match self {
            Status::Active => Status::Suspended,
            Status::Suspended => Status::Active,
        }
    }
}
