use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{
    compliance::{ComplianceStatus, EmployeeCompliance},
    expiration_status,
    summary::{in_same_month, MovementCounts},
    ExpirationStatus,
};
use crate::{
    models::{movement::Movement, ppe_item::PpeItem},
    query::Filter,
    store::Records,
};

pub const RECENT_MOVEMENTS_SHOWN: usize = 5;
const MONTH_LABELS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub enum TimeFrame {
    #[serde(rename = "1month")]
    OneMonth,
    #[default]
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "12months")]
    TwelveMonths,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardQuery {
    pub time_frame: TimeFrame,
    pub movement_type: Filter<crate::models::movement::MovementKind>,
}
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct DashboardCards {
    pub total_employees: usize,
    pub total_units_in_stock: u64,
    pub expiring_items: usize,
    pub movements_this_month: usize,
    pub compliance_rate: u32,
}
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyMovements {
    pub month: &'static str,
    pub year: i32,
    #[serde(flatten)]
    pub counts: MovementCounts,
}
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Dashboard {
    pub cards: DashboardCards,
    pub time_frame: TimeFrame,
    pub monthly: Vec<MonthlyMovements>,
    pub distribution: MovementCounts,
    pub recent: Vec<Movement>,
    pub low_stock: Vec<PpeItem>,
}

impl TimeFrame {
    pub fn months(&self) -> u32 {
        match self {
            TimeFrame::OneMonth => 1,
            TimeFrame::ThreeMonths => 3,
            TimeFrame::TwelveMonths => 12,
        }
    }
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN)
    }
}

pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_LABELS[date.month0() as usize]
}

/// Percentage of employees currently compliant, rounded.
pub fn compliance_rate(compliance: &[EmployeeCompliance]) -> u32 {
    if compliance.is_empty() {
        return 0;
    }
    let compliant = compliance
        .iter()
        .filter(|assessment| assessment.status == ComplianceStatus::Compliant)
        .count();
    ((compliant as f64 / compliance.len() as f64) * 100.0).round() as u32
}

fn monthly(movements: &[&Movement], today: NaiveDate, time_frame: TimeFrame) -> Vec<MonthlyMovements> {
    let months = time_frame.months();
    (0..months)
        .rev()
        .filter_map(|back| today.checked_sub_months(Months::new(back)))
        .map(|anchor| MonthlyMovements {
            month: month_label(anchor),
            year: anchor.year(),
            counts: MovementCounts::tally(
                movements
                    .iter()
                    .copied()
                    .filter(|movement| in_same_month(movement.date, anchor)),
            ),
        })
        .collect()
}

pub fn build(
    records: &Records,
    compliance: &[EmployeeCompliance],
    query: &DashboardQuery,
    today: NaiveDate,
    warning_days: i64,
) -> Dashboard {
    let start = query.time_frame.start(today);
    let in_frame: Vec<&Movement> = records
        .movements
        .iter()
        .filter(|movement| movement.date >= start)
        .collect();

    let mut recent: Vec<Movement> = in_frame
        .iter()
        .filter(|movement| query.movement_type.matches(&movement.kind))
        .map(|movement| (*movement).clone())
        .collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(RECENT_MOVEMENTS_SHOWN);

    let cards = DashboardCards {
        total_employees: records.employees.len(),
        total_units_in_stock: records
            .ppe_items
            .iter()
            .map(|item| u64::from(item.current_stock))
            .sum(),
        expiring_items: records
            .ppe_items
            .iter()
            .filter(|item| {
                expiration_status(item.expiration_date, today, warning_days)
                    == ExpirationStatus::Expiring
            })
            .count(),
        movements_this_month: records
            .movements
            .iter()
            .filter(|movement| in_same_month(movement.date, today))
            .count(),
        compliance_rate: compliance_rate(compliance),
    };

    Dashboard {
        cards,
        time_frame: query.time_frame,
        monthly: monthly(&in_frame, today, query.time_frame),
        distribution: MovementCounts::tally(in_frame.iter().copied()),
        recent,
        low_stock: records
            .ppe_items
            .iter()
            .filter(|item| item.current_stock < item.minimum_stock)
            .cloned()
            .collect(),
    }
}
