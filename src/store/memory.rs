use std::sync::RwLock;

use async_trait::async_trait;

use super::{fixtures, AccessStore, RecordStore, Records};
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

/// Records held in process memory for the lifetime of the service.
pub struct FixtureStore {
    records: Records,
}

impl FixtureStore {
    pub fn new(records: Records) -> Self {
        Self { records }
    }
    /// The sample data the console ships with.
    pub fn seeded() -> Self {
        Self::new(Records {
            employees: fixtures::employees(),
            ppe_items: fixtures::ppe_items(),
            movements: fixtures::movements(),
            inspections: fixtures::inspections(),
        })
    }
}

#[async_trait]
impl RecordStore for FixtureStore {
    async fn employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.records.employees.clone())
    }
    async fn ppe_items(&self) -> Result<Vec<PpeItem>, StoreError> {
        Ok(self.records.ppe_items.clone())
    }
    async fn movements(&self) -> Result<Vec<Movement>, StoreError> {
        Ok(self.records.movements.clone())
    }
    async fn inspections(&self) -> Result<Vec<Inspection>, StoreError> {
        Ok(self.records.inspections.clone())
    }
}

#[derive(Default)]
pub struct MemoryAccessStore {
    users: RwLock<Vec<WhitelistUser>>,
}

impl MemoryAccessStore {
    pub fn new() -> Self {
        Self::default()
    }
    #[cfg(test)]
    pub fn with_users(users: Vec<WhitelistUser>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl AccessStore for MemoryAccessStore {
    async fn contains(&self, uid: &str) -> Result<bool, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.iter().any(|user| user._id == uid))
    }
    async fn list(&self) -> Result<Vec<WhitelistUser>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.clone())
    }
    async fn insert(&self, user: WhitelistUser) -> Result<(), StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        if users.iter().any(|existing| existing._id == user._id) {
            return Err(StoreError::Duplicate(user._id));
        }
        users.push(user);
        Ok(())
    }
    async fn remove(&self, uid: &str) -> Result<bool, StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        let before = users.len();
        users.retain(|user| user._id != uid);
        Ok(users.len() != before)
    }
    async fn set_status(
        &self,
        uid: &str,
        status: WhitelistStatus,
    ) -> Result<Option<WhitelistUser>, StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        Ok(users.iter_mut().find(|user| user._id == uid).map(|user| {
            user.status = status;
            user.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn consultant() -> WhitelistUser {
        WhitelistUser {
            _id: "uid-consultor".to_string(),
            email: "consultor@empresa-externa.com".to_string(),
            name: "João Consultor".to_string(),
            added_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            added_by: "admin@empresa.com.br".to_string(),
            status: WhitelistStatus::Active,
        }
    }

    #[actix_web::test]
    async fn seeded_store_keeps_declaration_order() {
        let store = FixtureStore::seeded();
        let items = store.ppe_items().await.unwrap();
        assert_eq!(items.len(), 7);
        assert_eq!(items.first().unwrap()._id, "ppe1");
        assert_eq!(items.last().unwrap()._id, "ppe7");
        assert_eq!(store.movements().await.unwrap().len(), 10);
        assert_eq!(store.inspections().await.unwrap().len(), 5);
    }

    #[actix_web::test]
    async fn allow_list_lookup_is_by_uid() {
        let store = MemoryAccessStore::with_users(vec![consultant()]);
        assert!(store.contains("uid-consultor").await.unwrap());
        assert!(!store.contains("consultor@empresa-externa.com").await.unwrap());
    }

    #[actix_web::test]
    async fn rejects_duplicate_uid() {
        let store = MemoryAccessStore::new();
        store.insert(consultant()).await.unwrap();
        assert!(matches!(
            store.insert(consultant()).await,
            Err(StoreError::Duplicate(_))
        ));
    }

    #[actix_web::test]
    async fn toggles_and_removes_entries() {
        let store = MemoryAccessStore::with_users(vec![consultant()]);
        let updated = store
            .set_status("uid-consultor", WhitelistStatus::Inactive)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, WhitelistStatus::Inactive);
        assert!(store.set_status("missing", WhitelistStatus::Active).await.unwrap().is_none());

        assert!(store.remove("uid-consultor").await.unwrap());
        assert!(!store.remove("uid-consultor").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
