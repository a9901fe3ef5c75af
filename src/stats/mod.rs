use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ppe_item::PpeItem;

pub mod compliance;
pub mod dashboard;
pub mod summary;

pub const CRITICAL_STOCK_RATIO: f64 = 0.5;
pub const DEFAULT_EXPIRATION_WARNING_DAYS: i64 = 30;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Critical,
    Low,
    Normal,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationStatus {
    None,
    Expired,
    Expiring,
    Valid,
}

/// Classifies `current_stock / minimum_stock`. Items without a minimum can
/// never run short.
pub fn stock_status(item: &PpeItem) -> StockStatus {
    match item.stock_ratio() {
        Some(ratio) if ratio < CRITICAL_STOCK_RATIO => StockStatus::Critical,
        Some(ratio) if ratio < 1.0 => StockStatus::Low,
        _ => StockStatus::Normal,
    }
}

pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

pub fn expiration_status(
    expiration_date: Option<NaiveDate>,
    today: NaiveDate,
    warning_days: i64,
) -> ExpirationStatus {
    match expiration_date.map(|date| days_until(date, today)) {
        None => ExpirationStatus::None,
        Some(days) if days < 0 => ExpirationStatus::Expired,
        Some(days) if days <= warning_days => ExpirationStatus::Expiring,
        Some(_) => ExpirationStatus::Valid,
    }
}

impl ExpirationStatus {
    /// Expiring or already expired.
    pub fn needs_attention(&self) -> bool {
        matches!(self, ExpirationStatus::Expired | ExpirationStatus::Expiring)
    }
}
