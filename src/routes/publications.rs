use axum::{
    Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};

use crate::ranking::RankingService;
use crate::routes::{ApiError, error_response, request_context};

pub fn publications_routes() -> Router<RankingService> {
    Router::new().route("/{publication_id}/stats", get(get_publication_stats))
}

async fn get_publication_stats(
    State(service): State<RankingService>,
    Path(publication_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = service
        .publication_stats(&request_context(), &publication_id)
        .await
        .map_err(error_response)?;

    Ok(Json(stats))
}
