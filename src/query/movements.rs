use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    compare_text, matches_text, sort_rows, DateRangeKind, DateWindow, Filter, SortOrder,
};
use crate::{
    models::movement::{Movement, MovementKind},
    store::Records,
};

pub const UNKNOWN_EMPLOYEE: &str = "Colaborador não encontrado";
pub const UNKNOWN_PPE: &str = "EPI não encontrado";

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MovementSortKey {
    #[default]
    Date,
    Type,
    Employee,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MovementQuery {
    pub search: String,
    #[serde(rename = "type")]
    pub kind: Filter<MovementKind>,
    pub employee_id: Filter<String>,
    pub date_range: DateRangeKind,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: MovementSortKey,
    pub sort_order: SortOrder,
}

impl Default for MovementQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            kind: Filter::All,
            employee_id: Filter::All,
            date_range: DateRangeKind::All,
            start_date: None,
            end_date: None,
            sort_by: MovementSortKey::Date,
            sort_order: SortOrder::Desc,
        }
    }
}

pub fn employee_name<'a>(records: &'a Records, employee_id: Option<&str>) -> &'a str {
    employee_id
        .and_then(|_id| records.employee(_id))
        .map_or(UNKNOWN_EMPLOYEE, |employee| employee.name.as_str())
}

pub fn ppe_label(records: &Records, ppe_item_id: &str) -> String {
    records
        .ppe_item(ppe_item_id)
        .map_or_else(|| UNKNOWN_PPE.to_string(), |item| item.label())
}

impl MovementQuery {
    pub fn window(&self) -> DateWindow {
        DateWindow::resolve(
            self.date_range,
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )
    }
    pub fn matches(&self, movement: &Movement, records: &Records, today: NaiveDate) -> bool {
        let employee = employee_name(records, movement.employee_id.as_deref());
        let ppe = ppe_label(records, &movement.ppe_item_id);
        let reason = movement.reason.as_deref().unwrap_or_default();

        let employee_matches = match &self.employee_id {
            Filter::All => true,
            Filter::Only(_id) => movement.belongs_to(_id),
        };

        matches_text(&self.search, &[employee, ppe.as_str(), reason])
            && self.kind.matches(&movement.kind)
            && employee_matches
            && self.window().contains(movement.date, today)
    }
    pub fn apply(&self, records: &Records, today: NaiveDate) -> Vec<Movement> {
        let mut rows: Vec<Movement> = records
            .movements
            .iter()
            .filter(|movement| self.matches(movement, records, today))
            .cloned()
            .collect();
        sort_rows(&mut rows, self.sort_order, |a, b| match self.sort_by {
            MovementSortKey::Date => a.date.cmp(&b.date),
            MovementSortKey::Type => a.kind.as_str().cmp(b.kind.as_str()),
            MovementSortKey::Employee => compare_text(
                employee_name(records, a.employee_id.as_deref()),
                employee_name(records, b.employee_id.as_deref()),
            ),
        });
        rows
    }
}
