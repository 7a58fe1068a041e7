use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::{models::ID_FIELD, SensorStore};

/// In-process `SensorStore` that keeps documents in insertion order.
///
/// Test double for the MongoDB store. Every insert gets a fresh `ObjectId`,
/// so identifiers look the same on the wire. Clones share the same
/// underlying collection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl SensorStore for MemoryStore {
    async fn insert_one(&self, mut record: Document) -> Result<Bson> {
        let id = Bson::ObjectId(ObjectId::new());
        record.insert(ID_FIELD, id.clone());

        self.inner.write().await.push(record);
        Ok(id)
    }

    async fn find_all(&self) -> Result<Vec<Document>> {
        Ok(self.inner.read().await.clone())
    }
}
