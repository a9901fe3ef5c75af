use async_trait::async_trait;

use crate::{
    error::StoreError,
    models::{
        employee::Employee,
        inspection::Inspection,
        movement::Movement,
        ppe_item::PpeItem,
        whitelist::{WhitelistStatus, WhitelistUser},
    },
};

pub mod fixtures;
pub mod memory;
pub mod mongo;

/// Read-only access to the four record collections. Records come back in
/// declaration (natural) order; callers must not assume anything else.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn employees(&self) -> Result<Vec<Employee>, StoreError>;
    async fn ppe_items(&self) -> Result<Vec<PpeItem>, StoreError>;
    async fn movements(&self) -> Result<Vec<Movement>, StoreError>;
    async fn inspections(&self) -> Result<Vec<Inspection>, StoreError>;
}

/// The allow-list of accounts outside the company domain, keyed by uid.
#[async_trait]
pub trait AccessStore: Send + Sync {
    async fn contains(&self, uid: &str) -> Result<bool, StoreError>;
    async fn list(&self) -> Result<Vec<WhitelistUser>, StoreError>;
    async fn insert(&self, user: WhitelistUser) -> Result<(), StoreError>;
    async fn remove(&self, uid: &str) -> Result<bool, StoreError>;
    async fn set_status(
        &self,
        uid: &str,
        status: WhitelistStatus,
    ) -> Result<Option<WhitelistUser>, StoreError>;
}

/// Everything a page needs, pulled in one go.
#[derive(Clone, Debug, Default)]
pub struct Records {
    pub employees: Vec<Employee>,
    pub ppe_items: Vec<PpeItem>,
    pub movements: Vec<Movement>,
    pub inspections: Vec<Inspection>,
}

impl Records {
    pub async fn load(store: &dyn RecordStore) -> Result<Self, StoreError> {
        Ok(Self {
            employees: store.employees().await?,
            ppe_items: store.ppe_items().await?,
            movements: store.movements().await?,
            inspections: store.inspections().await?,
        })
    }
    pub fn employee(&self, _id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee._id == _id)
    }
    pub fn ppe_item(&self, _id: &str) -> Option<&PpeItem> {
        self.ppe_items.iter().find(|item| item._id == _id)
    }
}
