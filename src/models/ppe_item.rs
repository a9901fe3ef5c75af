use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A catalog entry. `ca` is the certificate of approval code issued for the
/// equipment model, when it has one.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PpeItem {
    pub _id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub unit_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct PpeItemRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub unit_price: f64,
    pub expiration_date: Option<NaiveDate>,
    pub ca: Option<String>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct StockEntryRequest {
    pub ppe_item_id: String,
    pub quantity: u32,
    pub note: Option<String>,
}

impl PpeItem {
    /// `current_stock / minimum_stock`, or `None` when no minimum is set.
    pub fn stock_ratio(&self) -> Option<f64> {
        if self.minimum_stock == 0 {
            None
        } else {
            Some(f64::from(self.current_stock) / f64::from(self.minimum_stock))
        }
    }
    pub fn label(&self) -> String {
        format!("{} - {}", self.kind, self.brand)
    }
}
