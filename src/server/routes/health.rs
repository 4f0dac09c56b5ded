//! Health Check Routes

use axum::extract::State;
use axum::Json;

use crate::server::server_core::ServerState;
use crate::server::types::HealthResponse;

/// Health check endpoint
pub async fn health_check(
    State(state): State<std::sync::Arc<ServerState>>,
) -> Json<HealthResponse> {
    Json(HealthResponse::from(state.service.health()))
}
