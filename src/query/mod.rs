//! Filtering, sorting and paging of record collections, one query struct
//! per page. Query structs deserialize straight from the request's query
//! string and are applied as pure functions over the records.

use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};
use serde::{
    de::{value::StringDeserializer, IntoDeserializer},
    Deserialize, Deserializer, Serialize, Serializer,
};

pub mod catalog;
pub mod employees;
pub mod inspections;
pub mod movements;
pub mod pager;
pub mod stock;

/// A categorical filter. `all` (or an empty value) lets everything through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter<T> {
    All,
    Only(T),
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateRangeKind {
    #[default]
    All,
    Today,
    Week,
    Month,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateWindow {
    All,
    Today,
    LastDays(i64),
    Between(NaiveDate, NaiveDate),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T: PartialEq> Filter<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Filter::All => true,
            Filter::Only(expected) => expected == value,
        }
    }
    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

impl<'de, T> Deserialize<'de> for Filter<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        if value.is_empty() || value == "all" {
            return Ok(Filter::All);
        }
        let value: StringDeserializer<D::Error> = value.into_deserializer();
        T::deserialize(value).map(Filter::Only)
    }
}

impl<T: Serialize> Serialize for Filter<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Filter::All => serializer.serialize_str("all"),
            Filter::Only(value) => value.serialize(serializer),
        }
    }
}

impl SortOrder {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl DateWindow {
    /// A custom range missing either bound, or with an unreadable bound,
    /// filters nothing.
    pub fn resolve(kind: DateRangeKind, start: Option<&str>, end: Option<&str>) -> Self {
        match kind {
            DateRangeKind::All => DateWindow::All,
            DateRangeKind::Today => DateWindow::Today,
            DateRangeKind::Week => DateWindow::LastDays(7),
            DateRangeKind::Month => DateWindow::LastDays(30),
            DateRangeKind::Custom => match (start.and_then(parse_date), end.and_then(parse_date)) {
                (Some(start), Some(end)) => DateWindow::Between(start, end),
                _ => DateWindow::All,
            },
        }
    }
    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateWindow::All => true,
            DateWindow::Today => date == today,
            DateWindow::LastDays(days) => date >= today - Duration::days(*days),
            DateWindow::Between(start, end) => *start <= date && date <= *end,
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Case-insensitive substring match against any of `fields`. An empty query
/// matches everything.
pub fn matches_text(query: &str, fields: &[&str]) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

fn collation_key(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

/// Orders text the way a Portuguese reader expects: "Óculos" sorts among
/// the O's, case does not matter.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Stable: rows with equal keys keep their relative order in both
/// directions.
pub fn sort_rows<T, F>(rows: &mut [T], order: SortOrder, compare: F)
where
    F: Fn(&T, &T) -> Ordering,
{
    rows.sort_by(|a, b| order.apply(compare(a, b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movement::MovementKind;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn text_search_ignores_case_and_ors_fields() {
        assert!(matches_text("luva", &["Luva", "SafetyPro"]));
        assert!(matches_text("SAFETY", &["Luva", "SafetyPro"]));
        assert!(!matches_text("bota", &["Luva", "SafetyPro"]));
        assert!(matches_text("", &[]));
    }

    #[test]
    fn text_compare_folds_accents() {
        assert_eq!(compare_text("Óculos", "Protetor"), Ordering::Less);
        assert_eq!(compare_text("Máscara", "Luva"), Ordering::Greater);
        assert_eq!(compare_text("luva", "Luva"), Ordering::Equal);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let mut rows = vec![(1, "a"), (0, "b"), (1, "c"), (0, "d")];
        sort_rows(&mut rows, SortOrder::Asc, |x, y| x.0.cmp(&y.0));
        assert_eq!(rows, vec![(0, "b"), (0, "d"), (1, "a"), (1, "c")]);

        sort_rows(&mut rows, SortOrder::Desc, |x, y| x.0.cmp(&y.0));
        assert_eq!(rows, vec![(1, "a"), (1, "c"), (0, "b"), (0, "d")]);
    }

    #[test]
    fn filter_parses_all_and_variants() {
        let all: Filter<MovementKind> = serde_json::from_str("\"all\"").unwrap();
        assert!(all.is_all());
        let empty: Filter<String> = serde_json::from_str("\"\"").unwrap();
        assert!(empty.is_all());
        let only: Filter<MovementKind> = serde_json::from_str("\"discard\"").unwrap();
        assert_eq!(only, Filter::Only(MovementKind::Discard));
        assert!(serde_json::from_str::<Filter<MovementKind>>("\"gift\"").is_err());
    }

    #[test]
    fn relative_windows_include_their_first_day() {
        let today = day(2024, 6, 15);
        let week = DateWindow::resolve(DateRangeKind::Week, None, None);
        assert!(week.contains(day(2024, 6, 8), today));
        assert!(!week.contains(day(2024, 6, 7), today));

        let month = DateWindow::resolve(DateRangeKind::Month, None, None);
        assert!(month.contains(day(2024, 5, 16), today));
        assert!(!month.contains(day(2024, 5, 15), today));

        let today_only = DateWindow::resolve(DateRangeKind::Today, None, None);
        assert!(today_only.contains(today, today));
        assert!(!today_only.contains(day(2024, 6, 14), today));
    }

    #[test]
    fn custom_window_is_closed_and_tolerates_bad_input() {
        let today = day(2024, 6, 15);
        let window =
            DateWindow::resolve(DateRangeKind::Custom, Some("2024-06-01"), Some("2024-06-10"));
        assert!(window.contains(day(2024, 6, 1), today));
        assert!(window.contains(day(2024, 6, 10), today));
        assert!(!window.contains(day(2024, 6, 11), today));

        let missing = DateWindow::resolve(DateRangeKind::Custom, Some("2024-06-01"), None);
        assert_eq!(missing, DateWindow::All);
        let garbage = DateWindow::resolve(DateRangeKind::Custom, Some("ontem"), Some("hoje"));
        assert!(garbage.contains(day(1999, 1, 1), today));
    }
}
