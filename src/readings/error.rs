use thiserror::Error;

use crate::db::models::REQUIRED_FIELDS;

#[derive(Debug, Error)]
pub enum ReadingError {
    /// Payload absent, unparseable or missing a required key. Nothing was
    /// written.
    #[error("{0}")]
    Validation(String),

    /// The store was never connected; persists until restart.
    #[error("The database connection is not established.")]
    StorageUnavailable,

    #[error("Error inserting into the database: {0:#}")]
    StorageWrite(anyhow::Error),

    #[error("Error retrieving the data: {0:#}")]
    StorageRead(anyhow::Error),
}

impl ReadingError {
    pub fn missing_fields() -> Self {
        Self::Validation(format!(
            "Missing fields in JSON. Required: {}",
            REQUIRED_FIELDS.join(", ")
        ))
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
