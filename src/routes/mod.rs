pub mod publications;
pub mod users;

pub use publications::publications_routes;
pub use users::users_routes;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::RankingError;
use crate::ranking::{RankingService, RequestContext};

pub type ApiError = (StatusCode, Json<serde_json::Value>);

pub fn build_router(service: RankingService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/users", users_routes())
        .nest("/api/publications", publications_routes())
        .route("/api/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy"}))
}

/// Axum drops the handler future when the client goes away, taking the
/// in-flight read with it. The service supplies the configured deadline.
pub(crate) fn request_context() -> RequestContext {
    RequestContext::background()
}

pub(crate) fn error_response(error: RankingError) -> ApiError {
    let status = match &error {
        RankingError::NotFound { .. } => StatusCode::NOT_FOUND,
        RankingError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
        RankingError::AggregationFailure { .. } => {
            tracing::error!(%error, "aggregation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(serde_json::json!({"detail": error.to_string()})))
}
