use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{compare_text, matches_text, pager::PageSize, sort_rows, Filter, SortOrder};
use crate::{
    models::ppe_item::PpeItem,
    stats::{stock_status, StockStatus},
};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSortKey {
    #[default]
    Type,
    Stock,
    Price,
    Expiration,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CatalogQuery {
    pub search: String,
    pub stock_status: Filter<StockStatus>,
    pub sort_by: CatalogSortKey,
    pub sort_order: SortOrder,
    pub page: Option<usize>,
    pub page_size: PageSize,
}

/// Search over type, brand and model plus the stock status filter; shared
/// by the catalog and stock pages.
pub fn item_matches(item: &PpeItem, search: &str, status: &Filter<StockStatus>) -> bool {
    matches_text(
        search,
        &[item.kind.as_str(), item.brand.as_str(), item.model.as_str()],
    ) && status.matches(&stock_status(item))
}

pub fn compare_items(key: CatalogSortKey, a: &PpeItem, b: &PpeItem) -> Ordering {
    match key {
        CatalogSortKey::Type => compare_text(&a.kind, &b.kind),
        CatalogSortKey::Stock => a.current_stock.cmp(&b.current_stock),
        CatalogSortKey::Price => a.unit_price.total_cmp(&b.unit_price),
        // Undated items come first.
        CatalogSortKey::Expiration => a.expiration_date.cmp(&b.expiration_date),
    }
}

impl CatalogQuery {
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || !self.stock_status.is_all()
    }
    pub fn apply(&self, items: &[PpeItem]) -> Vec<PpeItem> {
        let mut rows: Vec<PpeItem> = items
            .iter()
            .filter(|item| item_matches(item, &self.search, &self.stock_status))
            .cloned()
            .collect();
        sort_rows(&mut rows, self.sort_order, |a, b| {
            compare_items(self.sort_by, a, b)
        });
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures;

    fn ids(items: &[PpeItem]) -> Vec<&str> {
        items.iter().map(|item| item._id.as_str()).collect()
    }

    #[test]
    fn no_sample_item_is_critical() {
        let query = CatalogQuery {
            stock_status: Filter::Only(StockStatus::Critical),
            ..CatalogQuery::default()
        };
        assert!(query.apply(&fixtures::ppe_items()).is_empty());

        let normal = CatalogQuery {
            stock_status: Filter::Only(StockStatus::Normal),
            ..CatalogQuery::default()
        };
        assert_eq!(normal.apply(&fixtures::ppe_items()).len(), 7);
    }

    #[test]
    fn search_is_case_insensitive() {
        let query = CatalogQuery {
            search: "luva".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&query.apply(&fixtures::ppe_items())), vec!["ppe1"]);

        let by_brand = CatalogQuery {
            search: "QUIET".to_string(),
            ..CatalogQuery::default()
        };
        assert_eq!(ids(&by_brand.apply(&fixtures::ppe_items())), vec!["ppe5"]);
    }

    #[test]
    fn default_sort_is_by_type() {
        let rows = CatalogQuery::default().apply(&fixtures::ppe_items());
        assert_eq!(
            ids(&rows),
            vec!["ppe6", "ppe2", "ppe1", "ppe4", "ppe3", "ppe5", "ppe7"]
        );
    }

    #[test]
    fn sorts_by_price_descending() {
        let query = CatalogQuery {
            sort_by: CatalogSortKey::Price,
            sort_order: SortOrder::Desc,
            ..CatalogQuery::default()
        };
        let rows = query.apply(&fixtures::ppe_items());
        assert_eq!(rows.first().unwrap()._id, "ppe6");
        assert_eq!(rows.last().unwrap()._id, "ppe1");
    }

    #[test]
    fn undated_items_sort_first_by_expiration() {
        let query = CatalogQuery {
            sort_by: CatalogSortKey::Expiration,
            ..CatalogQuery::default()
        };
        let rows = query.apply(&fixtures::ppe_items());
        assert_eq!(ids(&rows)[..2], ["ppe7", "ppe4"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let query = CatalogQuery {
            search: "se".to_string(),
            ..CatalogQuery::default()
        };
        let once = query.apply(&fixtures::ppe_items());
        let twice = query.apply(&once);
        assert_eq!(once, twice);
    }
}
