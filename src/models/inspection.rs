use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InspectionStatus {
    Approved,
    Warning,
    Rejected,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Inspection {
    pub _id: String,
    pub date: NaiveDate,
    pub ppe_item_id: String,
    pub employee_id: String,
    pub status: InspectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub inspector: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct InspectionRequest {
    pub date: NaiveDate,
    pub ppe_item_id: String,
    pub employee_id: String,
    pub status: InspectionStatus,
    pub notes: Option<String>,
    pub inspector: String,
}

impl InspectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InspectionStatus::Approved => "approved",
            InspectionStatus::Warning => "warning",
            InspectionStatus::Rejected => "rejected",
        }
    }
}
