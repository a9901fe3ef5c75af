use mongodb::{Client, Database};

use crate::error::StoreError;

pub const EMPLOYEES: &str = "employees";
pub const PPE_ITEMS: &str = "ppe_items";
pub const MOVEMENTS: &str = "movements";
pub const INSPECTIONS: &str = "inspections";
pub const WHITELIST: &str = "whitelist";

pub async fn connect(uri: &str, name: &str) -> Result<Database, StoreError> {
    let client = Client::with_uri_str(uri).await?;
    tracing::info!(database = name, "connected to document store");
    Ok(client.database(name))
}
