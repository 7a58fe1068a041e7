use chrono::Utc;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{error::ReadingError, record};
use crate::db::{SensorStore, Storage};

/// Insert and list operations over the reading collection.
///
/// Holds no state besides the shared store handle, so it is cloned freely
/// into every request.
#[derive(Clone)]
pub struct ReadingService {
    storage: Storage,
}

impl ReadingService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn store(&self) -> Result<&dyn SensorStore, ReadingError> {
        self.storage.as_deref().ok_or(ReadingError::StorageUnavailable)
    }

    /// Validates `payload`, stamps it with the current server time and writes
    /// it as a single document. Returns the store-assigned identifier as a
    /// string.
    ///
    /// Nothing is written when validation fails or storage is unavailable.
    pub async fn insert(&self, payload: Option<Value>) -> Result<String, ReadingError> {
        let store = self.store()?;

        let mut record = record::validate(payload).inspect_err(|e| {
            if e.is_client_error() {
                warn!(error = %e, "Rejected sensor reading");
            } else {
                error!(error = %e, "Failed to encode sensor reading");
            }
        })?;
        record::stamp(&mut record, Utc::now());

        let id = store.insert_one(record).await.map_err(|e| {
            error!(error = %format!("{e:#}"), "Failed to insert sensor reading");
            ReadingError::StorageWrite(e)
        })?;
        let id = record::id_to_string(&id);

        info!(id = %id, "Sensor reading stored");
        Ok(id)
    }

    /// Every stored reading in transport form, fully materialised.
    pub async fn list_all(&self) -> Result<Vec<Value>, ReadingError> {
        let store = self.store()?;

        let records = store.find_all().await.map_err(|e| {
            error!(error = %format!("{e:#}"), "Failed to list sensor readings");
            ReadingError::StorageRead(e)
        })?;

        debug!(count = records.len(), "Listed sensor readings");
        Ok(records.into_iter().map(record::to_transport).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use mongodb::bson::{Bson, Document};
    use serde_json::json;

    use super::*;
    use crate::db::MemoryStore;

    struct BrokenStore;

    #[async_trait]
    impl SensorStore for BrokenStore {
        async fn insert_one(&self, _record: Document) -> Result<Bson> {
            bail!("write concern timeout")
        }

        async fn find_all(&self) -> Result<Vec<Document>> {
            bail!("cursor killed")
        }
    }

    fn service_over(store: &MemoryStore) -> ReadingService {
        ReadingService::new(Some(Arc::new(store.clone())))
    }

    #[tokio::test]
    async fn insert_then_list_round_trips() {
        let store = MemoryStore::new();
        let service = service_over(&store);

        let id = service
            .insert(Some(json!({ "ts": 1700000000, "value": 42.5, "sensor": "temp-1" })))
            .await
            .unwrap();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));

        let listed = service.list_all().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["_id"], json!(id));
        assert_eq!(listed[0]["sensor"], json!("temp-1"));
        assert_eq!(listed[0]["value"], json!(42.5));
        assert_eq!(listed[0]["ts"], json!(1700000000));
        assert!(listed[0]["fecha_servidor"].is_string());
    }

    #[tokio::test]
    async fn invalid_payload_writes_nothing() {
        let store = MemoryStore::new();
        let service = service_over(&store);

        let err = service
            .insert(Some(json!({ "ts": 1, "sensor": "s" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ReadingError::Validation(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unavailable_storage_fails_every_call() {
        let service = ReadingService::new(None);
        assert!(!service.is_available());

        for _ in 0..2 {
            let err = service
                .insert(Some(json!({ "ts": 1, "value": 2, "sensor": "s" })))
                .await
                .unwrap_err();
            assert!(matches!(err, ReadingError::StorageUnavailable));

            let err = service.list_all().await.unwrap_err();
            assert!(matches!(err, ReadingError::StorageUnavailable));
        }
    }

    #[tokio::test]
    async fn store_failures_keep_their_cause() {
        let service = ReadingService::new(Some(Arc::new(BrokenStore)));

        let err = service
            .insert(Some(json!({ "ts": 1, "value": 2, "sensor": "s" })))
            .await
            .unwrap_err();
        assert!(matches!(err, ReadingError::StorageWrite(_)));
        assert!(err.to_string().contains("write concern timeout"));

        let err = service.list_all().await.unwrap_err();
        assert!(matches!(err, ReadingError::StorageRead(_)));
        assert!(err.to_string().contains("cursor killed"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_get_distinct_ids() {
        let store = MemoryStore::new();
        let service = service_over(&store);

        let tasks: Vec<_> = (0..50)
            .map(|n| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .insert(Some(json!({ "ts": n, "value": n, "sensor": "load" })))
                        .await
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap().unwrap());
        }

        assert_eq!(ids.len(), 50);
        assert_eq!(store.len().await, 50);
        assert_eq!(service.list_all().await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn repeated_lists_are_identical() {
        let store = MemoryStore::new();
        let service = service_over(&store);
        for sensor in ["a", "b"] {
            service
                .insert(Some(json!({ "ts": 1, "value": 2, "sensor": sensor })))
                .await
                .unwrap();
        }

        let first = service.list_all().await.unwrap();
        let second = service.list_all().await.unwrap();
        assert_eq!(first, second);
    }
}
