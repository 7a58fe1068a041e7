pub mod dto;
pub mod errors;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::readings::ReadingService;
use handlers::ApiDoc;

pub fn router(readings: ReadingService) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route("/", get(handlers::index))
        .route("/insert", post(handlers::insert_reading))
        .route("/get_datos", post(handlers::list_readings))
        .route("/health", get(handlers::health))
        .with_state(readings)
        .split_for_parts();

    router.route(
        "/api-docs/openapi.json",
        get(move || async move { axum::Json(api) }),
    )
}
