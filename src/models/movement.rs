use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Delivery,
    Return,
    Replacement,
    Discard,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Movement {
    pub _id: String,
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    pub ppe_item_id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub responsible_id: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct MovementRequest {
    #[serde(rename = "type")]
    pub kind: MovementKind,
    pub date: NaiveDate,
    pub employee_id: Option<String>,
    pub ppe_item_id: String,
    pub quantity: u32,
    pub reason: Option<String>,
}

impl MovementKind {
    pub const ALL: [MovementKind; 4] = [
        MovementKind::Delivery,
        MovementKind::Return,
        MovementKind::Replacement,
        MovementKind::Discard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Delivery => "delivery",
            MovementKind::Return => "return",
            MovementKind::Replacement => "replacement",
            MovementKind::Discard => "discard",
        }
    }
    /// Whether the movement leaves the item in the employee's hands.
    pub fn hands_over(&self) -> bool {
        match self {
            MovementKind::Delivery | MovementKind::Replacement => true,
            MovementKind::Return | MovementKind::Discard => false,
        }
    }
}

impl Movement {
    pub fn belongs_to(&self, employee_id: &str) -> bool {
        self.employee_id.as_deref() == Some(employee_id)
    }
}
