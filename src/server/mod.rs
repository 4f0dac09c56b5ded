//! HTTP Server Module
//!
//! Serves the sentiment classifier over HTTP:
//! - `GET /` front page and `GET /static/*` assets
//! - `GET /health` artifact status
//! - `POST /classify` tweet classification

pub mod server_core;
pub mod config;
pub mod routes;
pub mod types;

pub use server_core::{create_router, SentimentServer, ServerState};
pub use config::ServerConfig;
pub use types::*;
