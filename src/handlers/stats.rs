use crate::handlers::common::success_response;
use crate::{
    errors::ApiError,
    services::inventory_stats::{InventoryStats, RecentActivity},
    AppState,
};
use axum::{extract::State, response::IntoResponse, routing::get, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Dashboard routes mounted under `/api`
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/activity", get(get_activity))
        .route("/home", get(api_home))
}

/// Liveness payload for `/api/home`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    #[schema(example = "Inventory Management API")]
    pub message: String,
    #[schema(example = "running")]
    pub status: String,
}

/// Inventory statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Aggregate inventory statistics", body = InventoryStats),
        (status = 500, description = "Database failure", body = crate::errors::ErrorResponse)
    ),
    tag = "Dashboard"
)]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = state.stats_service.stats().await?;
    Ok(success_response(stats))
}

/// Static activity feed
#[utoipa::path(
    get,
    path = "/api/activity",
    responses(
        (status = 200, description = "Illustrative activity entries", body = [RecentActivity])
    ),
    tag = "Dashboard"
)]
pub async fn get_activity(State(state): State<AppState>) -> impl IntoResponse {
    success_response(state.stats_service.activity_feed())
}

/// API liveness
#[utoipa::path(
    get,
    path = "/api/home",
    responses(
        (status = 200, description = "API is running", body = HomeResponse)
    ),
    tag = "Dashboard"
)]
pub async fn api_home() -> impl IntoResponse {
    success_response(HomeResponse {
        message: "Inventory Management API".to_string(),
        status: "running".to_string(),
    })
}
