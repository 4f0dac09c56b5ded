//! tweet-sentiment CLI - serve, classify and inspect tweet sentiment
//!
//! - `serve`: run the HTTP service
//! - `classify`: classify a single text with the configured artifacts
//! - `normalize`: print the normalized form of a text

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tweet_sentiment::{
    SentimentServer, SentimentService, ServerConfig, TweetNormalizer, VERSION,
};

/// Tweet sentiment classifier
#[derive(Parser, Debug)]
#[command(name = "tweet-sentiment")]
#[command(author, version, about, long_about = None)]
#[command(about = "Positive/negative sentiment for short social-media posts")]
#[command(long_about = "
Classifies tweets as Positive or Negative using a pre-fitted vectorizer
and a pre-trained linear classifier stored as JSON artifacts.

Examples:
  # Start the HTTP service on the default port (5000)
  tweet-sentiment serve

  # Use a config file and override the port
  tweet-sentiment serve --config config.yaml --port 8080

  # Classify one text
  tweet-sentiment classify --text \"I love this!\"

  # Show what the model sees
  tweet-sentiment normalize --text \"I really loved this movie\"
")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Path to YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the classifier artifact
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Path to the vectorizer artifact
        #[arg(long)]
        vectorizer: Option<PathBuf>,
    },

    /// Classify a single text
    Classify {
        /// Text to classify
        #[arg(short, long)]
        text: String,

        /// Path to the classifier artifact
        #[arg(short, long, default_value = "trained_model.json")]
        model: PathBuf,

        /// Path to the vectorizer artifact
        #[arg(long, default_value = "vectorizer.json")]
        vectorizer: PathBuf,
    },

    /// Print the normalized form of a text
    Normalize {
        /// Text to normalize
        #[arg(short, long)]
        text: String,
    },
}

fn setup_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Resolve the effective log level: `--verbose` wins over the config file
fn log_level(verbose: bool, configured: &str) -> Level {
    if verbose {
        return Level::DEBUG;
    }
    configured.parse().unwrap_or(Level::INFO)
}

fn load_config(path: Option<&Path>) -> Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path)),
        None => Ok(ServerConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            model,
            vectorizer,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(model) = model {
                config.artifacts.model_path = model;
            }
            if let Some(vectorizer) = vectorizer {
                config.artifacts.vectorizer_path = vectorizer;
            }

            setup_logging(log_level(cli.verbose, &config.logging.level));
            info!("tweet-sentiment v{}", VERSION);
            info!("Model: {:?}", config.artifacts.model_path);
            info!("Vectorizer: {:?}", config.artifacts.vectorizer_path);

            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            runtime.block_on(SentimentServer::new(config).run())
        }

        Commands::Classify {
            text,
            model,
            vectorizer,
        } => {
            setup_logging(log_level(cli.verbose, "warn"));

            let normalizer = TweetNormalizer::new().context("Failed to build normalizer")?;
            let service = SentimentService::load(&model, &vectorizer, normalizer);
            if !service.is_ready() {
                bail!(
                    "Artifacts could not be loaded (model: {:?}, vectorizer: {:?})",
                    model,
                    vectorizer
                );
            }

            let result = service.classify(&text)?;
            println!("{} {}", result.sentiment, result.sentiment.emoji());
            println!("processed: {}", result.normalized);
            if cli.verbose {
                println!(
                    "class: {} score: {:.4}",
                    result.prediction.class, result.prediction.score
                );
            }
            Ok(())
        }

        Commands::Normalize { text } => {
            setup_logging(log_level(cli.verbose, "warn"));

            let normalizer = TweetNormalizer::new().context("Failed to build normalizer")?;
            println!("{}", normalizer.normalize(&text));
            Ok(())
        }
    }
}
