use serde::{Deserialize, Serialize};

use super::{compare_text, matches_text, sort_rows, Filter, SortOrder};
use crate::models::employee::{Employee, EmployeeStatus};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeSortKey {
    #[default]
    Name,
    Department,
    Position,
    HireDate,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EmployeeQuery {
    pub search: String,
    pub department: Filter<String>,
    pub status: Filter<EmployeeStatus>,
    pub sort_by: EmployeeSortKey,
    pub sort_order: SortOrder,
}

impl EmployeeQuery {
    pub fn matches(&self, employee: &Employee) -> bool {
        matches_text(
            &self.search,
            &[
                employee.name.as_str(),
                employee.email.as_str(),
                employee.position.as_str(),
            ],
        ) && self.department.matches(&employee.department)
            && self.status.matches(&employee.status)
    }
    pub fn apply(&self, employees: &[Employee]) -> Vec<Employee> {
        let mut rows: Vec<Employee> = employees
            .iter()
            .filter(|employee| self.matches(employee))
            .cloned()
            .collect();
        sort_rows(&mut rows, self.sort_order, |a, b| match self.sort_by {
            EmployeeSortKey::Name => compare_text(&a.name, &b.name),
            EmployeeSortKey::Department => compare_text(&a.department, &b.department),
            EmployeeSortKey::Position => compare_text(&a.position, &b.position),
            EmployeeSortKey::HireDate => a.hire_date.cmp(&b.hire_date),
        });
        rows
    }
}

/// Distinct departments, alphabetically.
pub fn departments(employees: &[Employee]) -> Vec<String> {
    let mut departments: Vec<String> = employees
        .iter()
        .map(|employee| employee.department.clone())
        .collect();
    departments.sort_by(|a, b| compare_text(a, b).then_with(|| a.cmp(b)));
    departments.dedup();
    departments
}
