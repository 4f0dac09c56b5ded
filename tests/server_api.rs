//! HTTP API tests
//!
//! Drives the router in-process with fixture artifacts.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use tweet_sentiment::server::{create_router, ServerState};
use tweet_sentiment::{SentimentService, ServerConfig, TweetNormalizer};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.artifacts.model_path = fixture("trained_model.json");
    config.artifacts.vectorizer_path = fixture("vectorizer.json");
    config.web.index_path = fixture("index.html");
    config.web.static_dir = fixture("static");
    config
}

fn loaded_app() -> Router {
    let state = ServerState::load(fixture_config()).unwrap();
    assert!(state.service.is_ready());
    create_router(Arc::new(state))
}

fn unloaded_app() -> Router {
    let service = SentimentService::unloaded(TweetNormalizer::new().unwrap());
    create_router(Arc::new(ServerState::new(fixture_config(), service)))
}

fn classify_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/classify")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn classify(app: Router, body: Value) -> (StatusCode, Value) {
    send(app, classify_request(body.to_string())).await
}

#[tokio::test]
async fn test_health_reports_loaded_artifacts() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(loaded_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "healthy",
            "model_loaded": true,
            "vectorizer_loaded": true,
            "models_loaded": true
        })
    );
}

#[tokio::test]
async fn test_health_without_artifacts() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body) = send(unloaded_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["vectorizer_loaded"], false);
    assert_eq!(body["models_loaded"], false);
}

#[tokio::test]
async fn test_health_with_missing_model_file() {
    let mut config = fixture_config();
    config.artifacts.model_path = fixture("missing.json");
    let app = create_router(Arc::new(ServerState::load(config).unwrap()));

    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (_, body) = send(app, request).await;

    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["vectorizer_loaded"], true);
    assert_eq!(body["models_loaded"], false);
}

#[tokio::test]
async fn test_classify_positive() {
    let (status, body) = classify(loaded_app(), json!({"tweet": "I love this!"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"sentiment": "Positive", "emoji": "\u{1F60A}", "processed": "love"})
    );
}

#[tokio::test]
async fn test_classify_negative() {
    let (status, body) = classify(
        loaded_app(),
        json!({"tweet": "This movie was terrible and boring"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "Negative");
    assert_eq!(body["emoji"], "\u{1F622}");
    assert_eq!(body["processed"], "movi terribl bore");
}

#[tokio::test]
async fn test_classify_uses_bigrams() {
    let (status, body) =
        classify(loaded_app(), json!({"tweet": "I really loved this movie"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "Positive");
    assert_eq!(body["processed"], "realli love movi");
}

#[tokio::test]
async fn test_classify_trims_before_normalizing() {
    let (status, body) = classify(loaded_app(), json!({"tweet": "   I love this!\n"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], "love");
}

#[tokio::test]
async fn test_stopwords_only_still_classifies() {
    let (status, body) = classify(loaded_app(), json!({"tweet": "it is what it is"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["processed"], "");
    // intercept alone decides
    assert_eq!(body["sentiment"], "Negative");
}

#[tokio::test]
async fn test_empty_tweet_rejected() {
    for tweet in ["", "   ", "\t\n"] {
        let (status, body) = classify(loaded_app(), json!({ "tweet": tweet })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No tweet provided"}));
    }
}

#[tokio::test]
async fn test_length_limit() {
    let at_limit = "a".repeat(500);
    let (status, _) = classify(loaded_app(), json!({ "tweet": at_limit })).await;
    assert_eq!(status, StatusCode::OK);

    let over_limit = "a".repeat(501);
    let (status, body) = classify(loaded_app(), json!({ "tweet": over_limit })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Tweet too long. Max 500 characters."}));
}

#[tokio::test]
async fn test_length_limit_counts_characters() {
    // 500 two-byte characters
    let tweet = "é".repeat(500);
    let (status, _) = classify(loaded_app(), json!({ "tweet": tweet })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_configured_length_limit() {
    let mut config = fixture_config();
    config.limits.max_tweet_chars = 10;
    let app = create_router(Arc::new(ServerState::load(config).unwrap()));

    let (status, body) = classify(app, json!({"tweet": "I love this so much"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Tweet too long. Max 10 characters.");
}

#[tokio::test]
async fn test_missing_or_invalid_tweet_field() {
    for body in [
        json!({}),
        json!({"text": "I love this!"}),
        json!({"tweet": null}),
        json!({"tweet": 7}),
        json!(["I love this!"]),
    ] {
        let (status, response) = classify(loaded_app(), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": "Invalid request format"}));
    }
}

#[tokio::test]
async fn test_malformed_body() {
    let (status, body) = send(loaded_app(), classify_request("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request format");

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/classify")
        .body(Body::from(r#"{"tweet": "I love this!"}"#))
        .unwrap();
    let (status, body) = send(loaded_app(), no_content_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request format");
}

#[tokio::test]
async fn test_not_ready_takes_precedence() {
    let (status, body) = classify(unloaded_app(), json!({"tweet": "I love this!"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Models not loaded properly"}));

    // even a broken request is answered with the readiness error
    let (status, body) = send(unloaded_app(), classify_request("{not json")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Models not loaded properly");
}

#[tokio::test]
async fn test_index_page() {
    let request = Request::get("/").body(Body::empty()).unwrap();
    let response = loaded_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("Tweet Sentiment"));
}

#[tokio::test]
async fn test_missing_index_page() {
    let mut config = fixture_config();
    config.web.index_path = fixture("no_such_page.html");
    let app = create_router(Arc::new(ServerState::load(config).unwrap()));

    let request = Request::get("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("Error loading page: "));
}

#[tokio::test]
async fn test_static_assets() {
    let request = Request::get("/static/style.css").body(Body::empty()).unwrap();
    let response = loaded_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::get("/static/missing.js").body(Body::empty()).unwrap();
    let response = loaded_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let request = Request::get("/health")
        .header("x-request-id", "abc-123")
        .body(Body::empty())
        .unwrap();
    let response = loaded_app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
