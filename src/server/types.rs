//! Server Types
//!
//! Request/response bodies and the mapping from rejection reasons to HTTP
//! responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error};

use crate::inference::{Classification, ClassifyError, HealthStatus, Sentiment};

/// Classification request
#[derive(Debug, Clone)]
pub struct ClassifyRequest {
    /// Text to classify
    pub tweet: String,
}

/// Classification response
#[derive(Debug, Clone, Serialize)]
pub struct ClassifyResponse {
    pub sentiment: Sentiment,
    pub emoji: String,
    /// Normalized text the prediction was made on
    pub processed: String,
}

impl From<Classification> for ClassifyResponse {
    fn from(result: Classification) -> Self {
        Self {
            sentiment: result.sentiment,
            emoji: result.sentiment.emoji().to_string(),
            processed: result.normalized,
        }
    }
}

/// Error body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub vectorizer_loaded: bool,
    pub models_loaded: bool,
}

impl From<HealthStatus> for HealthResponse {
    fn from(health: HealthStatus) -> Self {
        Self {
            status: "healthy".to_string(),
            model_loaded: health.model_loaded,
            vectorizer_loaded: health.vectorizer_loaded,
            models_loaded: health.ready,
        }
    }
}

impl ClassifyError {
    /// HTTP status for this rejection
    pub fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ClassifyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Error in classification: {}", self);
        } else {
            debug!("Rejected classification request: {}", self);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
