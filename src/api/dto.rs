use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Request body for `POST /insert`.
///
/// Only documents the expected shape: the handler accepts any JSON object
/// carrying these keys, and extra keys are stored verbatim.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InsertReadingRequest {
    /// Client-side timestamp marker. Any JSON value.
    pub ts: Value,
    /// Reading payload. Any JSON value.
    pub value: Value,
    /// Sensor identifier.
    pub sensor: String,
}

/// Response for a successful `POST /insert`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InsertReadingResponse {
    pub mensaje: String,
    /// Store-assigned identifier (24 hex characters for MongoDB).
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// `"connected"` or `"unavailable"`.
    pub storage: String,
}
