//! Server Configuration
//!
//! YAML-backed configuration. Every field has a default so an empty or
//! partial file is valid; CLI flags override whatever the file sets.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{Result, SentimentError};
use crate::MAX_TWEET_CHARS;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model artifact locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// Request limits
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Web front-end
    #[serde(default)]
    pub web: WebConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Model artifact locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Serialized classifier
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Serialized vectorizer
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            vectorizer_path: default_vectorizer_path(),
        }
    }
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum tweet length in characters, after trimming
    #[serde(default = "default_max_tweet_chars")]
    pub max_tweet_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tweet_chars: default_max_tweet_chars(),
        }
    }
}

/// Web front-end configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Page served at `/`
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Allow cross-origin requests
    #[serde(default = "default_true")]
    pub cors: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            static_dir: default_static_dir(),
            cors: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_model_path() -> PathBuf {
    PathBuf::from("trained_model.json")
}

fn default_vectorizer_path() -> PathBuf {
    PathBuf::from("vectorizer.json")
}

fn default_max_tweet_chars() -> usize {
    MAX_TWEET_CHARS
}

fn default_index_path() -> PathBuf {
    PathBuf::from("templates/index.html")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    /// Load from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SentimentError::Config {
            message: e.to_string(),
            path: Some(path.to_path_buf()),
        })?;
        Self::from_yaml(&content).map_err(|e| match e {
            SentimentError::Config { message, .. } => SentimentError::Config {
                message,
                path: Some(path.to_path_buf()),
            },
            other => other,
        })
    }

    /// Parse from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Reject settings the service cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_tweet_chars == 0 {
            return Err(SentimentError::Config {
                message: "limits.max_tweet_chars must be greater than zero".to_string(),
                path: None,
            });
        }
        Ok(())
    }

    /// Socket address string
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            artifacts: ArtifactConfig::default(),
            limits: LimitsConfig::default(),
            web: WebConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
