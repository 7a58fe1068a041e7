use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;
use utoipa::OpenApi;

use super::dto::{ErrorResponse, HealthResponse, InsertReadingRequest, InsertReadingResponse};
use crate::readings::{ReadingError, ReadingService};

pub const INDEX_MESSAGE: &str = "API connected successfully.";
pub const INSERT_MESSAGE: &str = "Reading added successfully.";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Plain-text liveness banner.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain"),
    ),
    tag = "system"
)]
pub async fn index() -> &'static str {
    INDEX_MESSAGE
}

/// Store one sensor reading.
///
/// The body must be a JSON object with `ts`, `value` and `sensor`; values are
/// not type-checked. The server adds `fecha_servidor` before writing. An empty
/// or unparseable body counts as missing fields.
#[utoipa::path(
    post,
    path = "/insert",
    request_body = InsertReadingRequest,
    responses(
        (status = 201, description = "Reading stored", body = InsertReadingResponse),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 500, description = "Storage failure or unavailable connection", body = ErrorResponse),
    ),
    tag = "readings"
)]
pub async fn insert_reading(
    State(readings): State<ReadingService>,
    body: Bytes,
) -> Result<(StatusCode, Json<InsertReadingResponse>), ReadingError> {
    let payload = serde_json::from_slice::<Value>(&body).ok();
    let id = readings.insert(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(InsertReadingResponse {
            mensaje: INSERT_MESSAGE.to_owned(),
            id,
        }),
    ))
}

/// List every stored reading, with `_id` as a string and `fecha_servidor`
/// as `YYYY-MM-DD HH:MM:SS` server local time. Any request body is ignored.
/// Order is whatever the store returns.
#[utoipa::path(
    post,
    path = "/get_datos",
    responses(
        (status = 200, description = "All stored readings", body = Vec<serde_json::Value>),
        (status = 500, description = "Storage failure or unavailable connection", body = ErrorResponse),
    ),
    tag = "readings"
)]
pub async fn list_readings(
    State(readings): State<ReadingService>,
) -> Result<Json<Vec<Value>>, ReadingError> {
    Ok(Json(readings.list_all().await?))
}

/// Returns `200 OK` with `{"status":"ok"}` while the server is running, and
/// whether the store was connected at startup.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health(State(readings): State<ReadingService>) -> Json<HealthResponse> {
    let storage = if readings.is_available() {
        "connected"
    } else {
        "unavailable"
    };

    Json(HealthResponse {
        status: "ok".to_owned(),
        storage: storage.to_owned(),
    })
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(index, insert_reading, list_readings, health),
    components(schemas(
        InsertReadingRequest,
        InsertReadingResponse,
        ErrorResponse,
        HealthResponse
    )),
    tags(
        (name = "readings", description = "Sensor reading endpoints"),
        (name = "system",   description = "System endpoints"),
    ),
    info(
        title = "Sensor Reading API",
        version = "0.1.0",
        description = "Stores and lists raw sensor readings in a document collection"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
