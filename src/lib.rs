//! Speaker-Harvest: a conference speaker directory scraper
//!
//! This crate walks a paginated speaker listing, follows every speaker to
//! their detail page, and flattens the results into a fixed-column CSV file.
//! Fetching is sequential with a fixed delay between requests and bounded
//! retries with exponential backoff.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod text;

use thiserror::Error;

/// Main error type for Speaker-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Speaker-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest, Harvester};
pub use model::{SpeakerIdentifier, SpeakerRecord, COLUMNS};
