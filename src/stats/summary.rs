use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{
    compliance::{ComplianceStatus, EmployeeCompliance},
    expiration_status, stock_status, ExpirationStatus, StockStatus,
};
use crate::models::{
    employee::Employee,
    inspection::{Inspection, InspectionStatus},
    movement::{Movement, MovementKind},
    ppe_item::PpeItem,
};

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct MovementCounts {
    pub delivery: usize,
    #[serde(rename = "return")]
    pub returned: usize,
    pub replacement: usize,
    pub discard: usize,
}
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total: usize,
    pub critical: usize,
    pub expiring: usize,
    pub compliant: usize,
}
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct StockSummary {
    pub total: usize,
    pub critical: usize,
    pub low: usize,
    pub units: u64,
}
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct MovementSummary {
    pub total: usize,
    pub this_month: usize,
    #[serde(flatten)]
    pub by_kind: MovementCounts,
}
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct InspectionSummary {
    pub total: usize,
    pub approved: usize,
    pub warning: usize,
    pub rejected: usize,
}
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub total: usize,
    pub active: usize,
    pub compliant: usize,
    pub critical: usize,
}

impl MovementCounts {
    pub fn add(&mut self, kind: MovementKind) {
        match kind {
            MovementKind::Delivery => self.delivery += 1,
            MovementKind::Return => self.returned += 1,
            MovementKind::Replacement => self.replacement += 1,
            MovementKind::Discard => self.discard += 1,
        }
    }
    pub fn get(&self, kind: MovementKind) -> usize {
        match kind {
            MovementKind::Delivery => self.delivery,
            MovementKind::Return => self.returned,
            MovementKind::Replacement => self.replacement,
            MovementKind::Discard => self.discard,
        }
    }
    pub fn tally<'a>(movements: impl IntoIterator<Item = &'a Movement>) -> Self {
        let mut counts = Self::default();
        for movement in movements {
            counts.add(movement.kind);
        }
        counts
    }
}

pub fn catalog_summary(items: &[PpeItem], today: NaiveDate, warning_days: i64) -> CatalogSummary {
    CatalogSummary {
        total: items.len(),
        critical: items
            .iter()
            .filter(|item| stock_status(item) == StockStatus::Critical)
            .count(),
        expiring: items
            .iter()
            .filter(|item| {
                expiration_status(item.expiration_date, today, warning_days)
                    == ExpirationStatus::Expiring
            })
            .count(),
        compliant: items
            .iter()
            .filter(|item| {
                item.current_stock >= item.minimum_stock
                    && item.expiration_date.map_or(true, |date| date > today)
            })
            .count(),
    }
}

pub fn stock_summary(items: &[PpeItem]) -> StockSummary {
    let count = |status: StockStatus| {
        items
            .iter()
            .filter(|item| stock_status(item) == status)
            .count()
    };
    StockSummary {
        total: items.len(),
        critical: count(StockStatus::Critical),
        low: count(StockStatus::Low),
        units: items.iter().map(|item| u64::from(item.current_stock)).sum(),
    }
}

pub fn in_same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

pub fn movement_summary(movements: &[Movement], today: NaiveDate) -> MovementSummary {
    MovementSummary {
        total: movements.len(),
        this_month: movements
            .iter()
            .filter(|movement| in_same_month(movement.date, today))
            .count(),
        by_kind: MovementCounts::tally(movements),
    }
}

pub fn inspection_summary(inspections: &[Inspection]) -> InspectionSummary {
    let count = |status: InspectionStatus| {
        inspections
            .iter()
            .filter(|inspection| inspection.status == status)
            .count()
    };
    InspectionSummary {
        total: inspections.len(),
        approved: count(InspectionStatus::Approved),
        warning: count(InspectionStatus::Warning),
        rejected: count(InspectionStatus::Rejected),
    }
}

pub fn employee_summary(employees: &[Employee], compliance: &[EmployeeCompliance]) -> EmployeeSummary {
    let count = |status: ComplianceStatus| {
        compliance
            .iter()
            .filter(|assessment| assessment.status == status)
            .count()
    };
    EmployeeSummary {
        total: employees.len(),
        active: employees.iter().filter(|employee| employee.is_active()).count(),
        compliant: count(ComplianceStatus::Compliant),
        critical: count(ComplianceStatus::Critical),
    }
}
