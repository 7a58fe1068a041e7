pub mod memory;
pub mod models;
pub mod mongo;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::config::Config;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// The document collection readings are written to and listed from.
///
/// Implementations must be safe to share between concurrent requests; each
/// call is an independent single-document insert or a full scan.
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// Persist `record` and return the identifier the store assigned to it.
    async fn insert_one(&self, record: Document) -> Result<Bson>;

    /// Every record in the collection, in the store's native order.
    async fn find_all(&self) -> Result<Vec<Document>>;
}

/// Shared store handle, or `None` when the connection could not be set up at
/// startup.
pub type Storage = Option<Arc<dyn SensorStore>>;

/// Build the MongoDB-backed store described by `config`.
pub async fn connect(config: &Config) -> Result<Arc<dyn SensorStore>> {
    let uri = config
        .mongo_uri
        .as_deref()
        .context("missing required env var: MONGO_URI")?;

    let store = MongoStore::connect(
        uri,
        config.mongo_database.as_deref(),
        &config.mongo_collection,
    )
    .await?;

    Ok(Arc::new(store))
}
