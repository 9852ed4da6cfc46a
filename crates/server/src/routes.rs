use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{metrics, openapi::ApiDoc};

pub mod vehicles;
pub mod works;

/// Shared handler state. The pool handle is cheap to clone; each request
/// borrows it for the duration of one operation.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: resources, health, metrics and docs.
pub fn build_router(state: ServerState) -> Router {
    let resources = Router::new()
        .route("/vehicles", get(vehicles::list).post(vehicles::create))
        .route(
            "/vehicles/:id",
            get(vehicles::get).put(vehicles::update).delete(vehicles::delete),
        )
        .route("/works", get(works::list).post(works::create))
        .route(
            "/works/:id",
            get(works::get).put(works::update).delete(works::delete),
        );

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .merge(resources)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
