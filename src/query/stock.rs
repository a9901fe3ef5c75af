use serde::{Deserialize, Serialize};

use super::{
    catalog::{compare_items, item_matches, CatalogSortKey},
    sort_rows, Filter, SortOrder,
};
use crate::{models::ppe_item::PpeItem, stats::StockStatus};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StockSortKey {
    #[default]
    Type,
    Stock,
    Expiration,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StockQuery {
    pub search: String,
    pub stock_status: Filter<StockStatus>,
    pub sort_by: StockSortKey,
    pub sort_order: SortOrder,
}

impl From<StockSortKey> for CatalogSortKey {
    fn from(key: StockSortKey) -> Self {
        match key {
            StockSortKey::Type => CatalogSortKey::Type,
            StockSortKey::Stock => CatalogSortKey::Stock,
            StockSortKey::Expiration => CatalogSortKey::Expiration,
        }
    }
}

impl StockQuery {
    pub fn apply(&self, items: &[PpeItem]) -> Vec<PpeItem> {
        let mut rows: Vec<PpeItem> = items
            .iter()
            .filter(|item| item_matches(item, &self.search, &self.stock_status))
            .cloned()
            .collect();
        let key = CatalogSortKey::from(self.sort_by);
        sort_rows(&mut rows, self.sort_order, |a, b| compare_items(key, a, b));
        rows
    }
}
