use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{error, Level};
use utoipa::OpenApi;

use common::types::Health;
use service::{metrics, sequence::{storage::SequenceStorage, SequenceStore}};

use crate::openapi::ApiDoc;

pub mod sequence;

/// Shared handler state: the injected sequence store.
pub struct AppState<S: SequenceStorage> {
    pub store: Arc<SequenceStore<S>>,
}

impl<S: SequenceStorage> AppState<S> {
    pub fn new(store: Arc<SequenceStore<S>>) -> Self { Self { store } }
}

impl<S: SequenceStorage> Clone for AppState<S> {
    fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_text() -> impl IntoResponse {
    match metrics::encode_metrics() {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(e) => {
            error!(error = %e, "metrics encode failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router over any storage backend.
pub fn build_router<S>(state: AppState<S>, cors: CorsLayer) -> Router
where
    S: SequenceStorage + 'static,
{
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    let counters = Router::new()
        .route("/increment", get(sequence::increment::<S>).post(sequence::increment::<S>))
        .with_state(state);

    public
        .merge(counters)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
