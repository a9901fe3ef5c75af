use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    compare_text, matches_text, sort_rows, DateRangeKind, DateWindow, Filter, SortOrder,
};
use crate::{
    models::inspection::{Inspection, InspectionStatus},
    store::Records,
};

pub const UNKNOWN_EMPLOYEE: &str = "Colaborador";
pub const UNKNOWN_PPE: &str = "EPI";

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InspectionSortKey {
    #[default]
    Date,
    Status,
    Employee,
    Ppe,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct InspectionQuery {
    pub search: String,
    pub status: Filter<InspectionStatus>,
    pub date_range: DateRangeKind,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: InspectionSortKey,
    pub sort_order: SortOrder,
}

impl Default for InspectionQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: Filter::All,
            date_range: DateRangeKind::All,
            start_date: None,
            end_date: None,
            sort_by: InspectionSortKey::Date,
            sort_order: SortOrder::Desc,
        }
    }
}

pub fn employee_name<'a>(records: &'a Records, employee_id: &str) -> &'a str {
    records
        .employee(employee_id)
        .map_or(UNKNOWN_EMPLOYEE, |employee| employee.name.as_str())
}

pub fn ppe_type<'a>(records: &'a Records, ppe_item_id: &str) -> &'a str {
    records
        .ppe_item(ppe_item_id)
        .map_or(UNKNOWN_PPE, |item| item.kind.as_str())
}

impl InspectionQuery {
    pub fn window(&self) -> DateWindow {
        DateWindow::resolve(
            self.date_range,
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )
    }
    pub fn matches(&self, inspection: &Inspection, records: &Records, today: NaiveDate) -> bool {
        matches_text(
            &self.search,
            &[
                employee_name(records, &inspection.employee_id),
                ppe_type(records, &inspection.ppe_item_id),
                inspection.notes.as_deref().unwrap_or_default(),
            ],
        ) && self.status.matches(&inspection.status)
            && self.window().contains(inspection.date, today)
    }
    pub fn apply(&self, records: &Records, today: NaiveDate) -> Vec<Inspection> {
        let mut rows: Vec<Inspection> = records
            .inspections
            .iter()
            .filter(|inspection| self.matches(inspection, records, today))
            .cloned()
            .collect();
        sort_rows(&mut rows, self.sort_order, |a, b| match self.sort_by {
            InspectionSortKey::Date => a.date.cmp(&b.date),
            InspectionSortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            InspectionSortKey::Employee => compare_text(
                employee_name(records, &a.employee_id),
                employee_name(records, &b.employee_id),
            ),
            InspectionSortKey::Ppe => compare_text(
                ppe_type(records, &a.ppe_item_id),
                ppe_type(records, &b.ppe_item_id),
            ),
        });
        rows
    }
}
