use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WhitelistStatus {
    Active,
    Inactive,
}

/// An account allowed in despite not belonging to the company domain. The
/// document id is the identity provider's uid.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WhitelistUser {
    pub _id: String,
    pub email: String,
    pub name: String,
    pub added_date: NaiveDate,
    pub added_by: String,
    pub status: WhitelistStatus,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct WhitelistRequest {
    pub uid: String,
    pub email: String,
    pub name: String,
}

impl WhitelistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhitelistStatus::Active => "active",
            WhitelistStatus::Inactive => "inactive",
        }
    }
    pub fn toggled(&self) -> Self {
        match self {
            WhitelistStatus::Active => WhitelistStatus::Inactive,
            WhitelistStatus::Inactive => WhitelistStatus::Active,
        }
    }
}
