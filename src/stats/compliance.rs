use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::expiration_status;
use crate::{
    models::{
        employee::Employee,
        inspection::{Inspection, InspectionStatus},
        movement::{Movement, MovementKind},
        settings::SystemSettings,
    },
    store::Records,
};

/// Movements newer than this count as recent activity.
pub const RECENT_ACTIVITY_DAYS: i64 = 30;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    Warning,
    Critical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub expiration_warning_days: i64,
    pub inspection_interval_days: i64,
}

/// Equipment an employee currently holds, i.e. whose latest movement for
/// that employee handed it over.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct HeldItem {
    pub ppe_item_id: String,
    pub handed_over: NaiveDate,
    pub last_inspection: Option<NaiveDate>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct EmployeeCompliance {
    pub employee_id: String,
    pub total_assigned: usize,
    pub recent_movements: usize,
    pub held_items: Vec<HeldItem>,
    pub expiring_soon: usize,
    pub overdue_inspections: usize,
    pub rejected_items: usize,
    pub status: ComplianceStatus,
}

impl From<&SystemSettings> for Thresholds {
    fn from(settings: &SystemSettings) -> Self {
        Self {
            expiration_warning_days: settings.expiration_warning_days,
            inspection_interval_days: settings.inspection_interval_days,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds::from(&SystemSettings::default())
    }
}

impl ComplianceStatus {
    pub fn classify(expiring_soon: usize, rejected_items: usize, overdue: usize, recent: usize) -> Self {
        if expiring_soon > 1 || rejected_items > 0 {
            ComplianceStatus::Critical
        } else if expiring_soon > 0 || overdue > 0 || recent == 0 {
            ComplianceStatus::Warning
        } else {
            ComplianceStatus::Compliant
        }
    }
}

fn held_items(movements: &[&Movement]) -> Vec<(String, NaiveDate)> {
    let mut held: Vec<(String, NaiveDate)> = Vec::new();
    for movement in movements {
        held.retain(|(item_id, _)| *item_id != movement.ppe_item_id);
        if movement.kind.hands_over() {
            held.push((movement.ppe_item_id.clone(), movement.date));
        }
    }
    held
}

fn latest_inspection_since<'a>(
    inspections: &'a [Inspection],
    employee_id: &str,
    ppe_item_id: &str,
    since: NaiveDate,
) -> Option<&'a Inspection> {
    inspections
        .iter()
        .filter(|inspection| {
            inspection.employee_id == employee_id
                && inspection.ppe_item_id == ppe_item_id
                && inspection.date >= since
        })
        .max_by_key(|inspection| inspection.date)
}

pub fn assess(
    employee: &Employee,
    records: &Records,
    today: NaiveDate,
    thresholds: Thresholds,
) -> EmployeeCompliance {
    let mut movements: Vec<&Movement> = records
        .movements
        .iter()
        .filter(|movement| movement.belongs_to(&employee._id))
        .collect();
    movements.sort_by_key(|movement| movement.date);

    let recent_since = today - Duration::days(RECENT_ACTIVITY_DAYS);
    let recent_movements = movements
        .iter()
        .filter(|movement| movement.date >= recent_since)
        .count();
    let total_assigned = movements
        .iter()
        .filter(|movement| movement.kind == MovementKind::Delivery)
        .count();

    let mut expiring_soon = 0;
    let mut overdue_inspections = 0;
    let mut rejected_items = 0;
    let mut held = Vec::new();

    for (ppe_item_id, handed_over) in held_items(&movements) {
        let expiration = records
            .ppe_item(&ppe_item_id)
            .and_then(|item| item.expiration_date);
        if expiration_status(expiration, today, thresholds.expiration_warning_days)
            .needs_attention()
        {
            expiring_soon += 1;
        }

        let inspection =
            latest_inspection_since(&records.inspections, &employee._id, &ppe_item_id, handed_over);
        if inspection.map(|inspection| inspection.status) == Some(InspectionStatus::Rejected) {
            rejected_items += 1;
        }
        let checked_on = inspection.map_or(handed_over, |inspection| inspection.date);
        if today.signed_duration_since(checked_on).num_days() > thresholds.inspection_interval_days {
            overdue_inspections += 1;
        }

        held.push(HeldItem {
            ppe_item_id,
            handed_over,
            last_inspection: inspection.map(|inspection| inspection.date),
        });
    }

    EmployeeCompliance {
        employee_id: employee._id.clone(),
        total_assigned,
        recent_movements,
        held_items: held,
        expiring_soon,
        overdue_inspections,
        rejected_items,
        status: ComplianceStatus::classify(
            expiring_soon,
            rejected_items,
            overdue_inspections,
            recent_movements,
        ),
    }
}

/// One assessment per employee, in employee order.
pub fn assess_all(records: &Records, today: NaiveDate, thresholds: Thresholds) -> Vec<EmployeeCompliance> {
    records
        .employees
        .iter()
        .map(|employee| assess(employee, records, today, thresholds))
        .collect()
}
