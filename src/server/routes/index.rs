//! Front page

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use crate::server::server_core::ServerState;

/// Serve the configured index page
pub async fn index(State(state): State<std::sync::Arc<ServerState>>) -> Response {
    let path = &state.config.web.index_path;
    match tokio::fs::read_to_string(path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!("Failed to read index page {:?}: {}", path, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error loading page: {}", e),
            )
                .into_response()
        }
    }
}
