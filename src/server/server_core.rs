//! Server Core
//!
//! Main server implementation with Axum web framework

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::core::error::Result;
use crate::inference::SentimentService;
use crate::server::config::ServerConfig;
use crate::server::routes;
use crate::text::TweetNormalizer;

/// Server state shared across handlers
#[derive(Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: ServerConfig,
    /// Loaded inference context
    pub service: SentimentService,
}

impl ServerState {
    /// Create state around an already-built service
    pub fn new(config: ServerConfig, service: SentimentService) -> Self {
        let service = service.with_max_chars(config.limits.max_tweet_chars);
        Self { config, service }
    }

    /// Load the artifacts named in the configuration
    ///
    /// Missing or broken artifacts leave the service unready instead of
    /// failing; only an unusable normalizer is an error.
    pub fn load(config: ServerConfig) -> Result<Self> {
        let normalizer = TweetNormalizer::new()?;
        let service = SentimentService::load(
            &config.artifacts.model_path,
            &config.artifacts.vectorizer_path,
            normalizer,
        );
        if !service.is_ready() {
            warn!("Serving without a usable model; /classify will answer 500 until restarted with valid artifacts");
        }
        Ok(Self::new(config, service))
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    let static_dir = ServeDir::new(&state.config.web.static_dir);
    let cors_enabled = state.config.web.cors;

    let router = Router::new()
        // Page
        .route("/", get(routes::index::index))
        .nest_service("/static", static_dir)

        // Health check
        .route("/health", get(routes::health::health_check))

        // Classification
        .route("/classify", post(routes::classify::classify))

        // State
        .with_state(state)
        // Middleware
        .layer(PropagateRequestIdLayer::new(axum::http::HeaderName::from_static("x-request-id")))
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

/// Sentiment HTTP server
pub struct SentimentServer {
    config: ServerConfig,
}

impl SentimentServer {
    /// Create new server
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Load artifacts and serve until the process is stopped
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.config.bind_address();
        let state = Arc::new(ServerState::load(self.config)?);
        let router = create_router(state);

        info!("Starting sentiment server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
