use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    Client, Collection,
};
use tracing::{info, warn};

use super::SensorStore;

/// `SensorStore` backed by a MongoDB collection.
///
/// `Collection` wraps the driver's connection pool, so clones share it.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Parse `uri`, resolve the database and open `collection`.
    ///
    /// The database named in the URI wins; `fallback_database` is used only
    /// when the URI has none. A failed ping is logged but not fatal: the
    /// driver connects lazily and recovers once the server is reachable.
    pub async fn connect(
        uri: &str,
        fallback_database: Option<&str>,
        collection: &str,
    ) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("failed to parse MONGO_URI")?;

        let database = match client.default_database() {
            Some(db) => db,
            None => {
                let name = fallback_database.context(
                    "MONGO_URI does not name a database and MONGO_DATABASE is not set",
                )?;
                client.database(name)
            }
        };

        if let Err(e) = database.run_command(doc! { "ping": 1 }).await {
            warn!(database = %database.name(), error = %e, "MongoDB ping failed");
        }

        info!(
            database = %database.name(),
            collection = %collection,
            "MongoDB collection ready"
        );

        Ok(Self {
            collection: database.collection(collection),
        })
    }
}

#[async_trait]
impl SensorStore for MongoStore {
    async fn insert_one(&self, record: Document) -> Result<Bson> {
        let result = self.collection.insert_one(record).await?;
        Ok(result.inserted_id)
    }

    async fn find_all(&self) -> Result<Vec<Document>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect::<Vec<_>>().await?)
    }
}
