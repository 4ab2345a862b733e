use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;

use crate::ranking::RankingService;
use crate::routes::{ApiError, error_response, request_context};

#[derive(Debug, Deserialize)]
struct ActivityQuery {
    user_id: Option<String>,
}

pub fn users_routes() -> Router<RankingService> {
    Router::new()
        .route("/activity", get(get_user_activity_counts))
        .route("/top-contributors", get(get_top_contributors))
        .route("/scores", get(get_user_scores))
        .route("/{user_id}/rank", get(get_user_rank))
        .route("/{user_id}/statistics", get(get_user_statistics))
}

async fn get_user_activity_counts(
    State(service): State<RankingService>,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = query.user_id.unwrap_or_default();
    let counts = service
        .user_activity_counts(&request_context(), &user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(counts))
}

async fn get_top_contributors(
    State(service): State<RankingService>,
) -> Result<impl IntoResponse, ApiError> {
    let contributors = service
        .top_contributors(&request_context())
        .await
        .map_err(error_response)?;

    Ok(Json(contributors))
}

async fn get_user_scores(
    State(service): State<RankingService>,
) -> Result<impl IntoResponse, ApiError> {
    let scores = service
        .user_scores(&request_context())
        .await
        .map_err(error_response)?;

    Ok(Json(scores))
}

async fn get_user_rank(
    State(service): State<RankingService>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rank = service
        .user_rank(&request_context(), &user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(rank))
}

async fn get_user_statistics(
    State(service): State<RankingService>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = service
        .user_statistics(&request_context(), &user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(stats))
}
