//! Classification Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::inference::ClassifyError;
use crate::server::server_core::ServerState;
use crate::server::types::{ClassifyRequest, ClassifyResponse};

/// Classify tweet sentiment
pub async fn classify(
    State(state): State<std::sync::Arc<ServerState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClassifyResponse>, ClassifyError> {
    // readiness is reported before anything about the request body
    state.service.ensure_ready()?;

    let request = parse_request(payload)?;
    let result = state.service.classify(&request.tweet)?;

    Ok(Json(ClassifyResponse::from(result)))
}

/// Body must be a JSON object with a string `tweet` field
fn parse_request(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ClassifyRequest, ClassifyError> {
    let Json(body) = payload.map_err(|_| ClassifyError::InvalidRequest)?;
    let tweet = body
        .as_object()
        .and_then(|fields| fields.get("tweet"))
        .and_then(Value::as_str)
        .ok_or(ClassifyError::InvalidRequest)?;
    Ok(ClassifyRequest {
        tweet: tweet.to_string(),
    })
}
