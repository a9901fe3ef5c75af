use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::{
    bson::doc,
    error::{Error as MongoError, ErrorKind, WriteError, WriteFailure},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};
use serde::de::DeserializeOwned;

use super::{AccessStore, RecordStore};
use crate::{
    database::{EMPLOYEES, INSPECTIONS, MOVEMENTS, PPE_ITEMS, WHITELIST},
    error::StoreError,
    models::{
        employee::Employee,
        inspection::Inspection,
        movement::Movement,
        ppe_item::PpeItem,
        whitelist::{WhitelistStatus, WhitelistUser},
    },
};

const DUPLICATE_KEY: i32 = 11000;

pub struct MongoRecordStore {
    db: Database,
}

pub struct MongoAccessStore {
    db: Database,
}

fn is_duplicate_key(error: &MongoError) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError {
            code: DUPLICATE_KEY,
            ..
        }))
    )
}

async fn find_all<T>(collection: Collection<T>) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let mut cursor = collection.find(None, None).await?;
    let mut records: Vec<T> = Vec::new();

    while let Some(record) = cursor.next().await {
        records.push(record?);
    }
    Ok(records)
}

impl MongoRecordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for MongoRecordStore {
    async fn employees(&self) -> Result<Vec<Employee>, StoreError> {
        find_all(self.db.collection::<Employee>(EMPLOYEES)).await
    }
    async fn ppe_items(&self) -> Result<Vec<PpeItem>, StoreError> {
        find_all(self.db.collection::<PpeItem>(PPE_ITEMS)).await
    }
    async fn movements(&self) -> Result<Vec<Movement>, StoreError> {
        find_all(self.db.collection::<Movement>(MOVEMENTS)).await
    }
    async fn inspections(&self) -> Result<Vec<Inspection>, StoreError> {
        find_all(self.db.collection::<Inspection>(INSPECTIONS)).await
    }
}

impl MongoAccessStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
    fn collection(&self) -> Collection<WhitelistUser> {
        self.db.collection::<WhitelistUser>(WHITELIST)
    }
}

#[async_trait]
impl AccessStore for MongoAccessStore {
    async fn contains(&self, uid: &str) -> Result<bool, StoreError> {
        let found = self
            .collection()
            .find_one(doc! { "_id": uid }, None)
            .await?;
        Ok(found.is_some())
    }
    async fn list(&self) -> Result<Vec<WhitelistUser>, StoreError> {
        find_all(self.collection()).await
    }
    /// The unique `_id` index decides duplicates, so concurrent adds of one
    /// uid cannot both succeed.
    async fn insert(&self, user: WhitelistUser) -> Result<(), StoreError> {
        match self.collection().insert_one(&user, None).await {
            Ok(_) => Ok(()),
            Err(error) if is_duplicate_key(&error) => Err(StoreError::Duplicate(user._id)),
            Err(error) => Err(error.into()),
        }
    }
    async fn remove(&self, uid: &str) -> Result<bool, StoreError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uid }, None)
            .await?;
        Ok(result.deleted_count > 0)
    }
    async fn set_status(
        &self,
        uid: &str,
        status: WhitelistStatus,
    ) -> Result<Option<WhitelistUser>, StoreError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "_id": uid },
                doc! { "$set": { "status": status.as_str() } },
                options,
            )
            .await?;
        Ok(updated)
    }
}
