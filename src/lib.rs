//! Tagsift: a resilient hashtag page scraper
//!
//! This crate fetches public hashtag listing pages over HTTP, parses the
//! returned HTML into structured post records, and aggregates results across
//! a bounded number of pages. Retries, proxy/identity rotation, and the
//! layered extraction heuristics are all deliberately defensive: every
//! failure mode degrades to an empty page, a zero counter, or an early stop,
//! never an unhandled fault.

pub mod config;
pub mod content;
pub mod output;
pub mod rotate;
pub mod scrape;

use thiserror::Error;

/// Main error type for Tagsift operations
#[derive(Debug, Error)]
pub enum TagsiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

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

/// Result type alias for Tagsift operations
pub type Result<T> = std::result::Result<T, TagsiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use content::{clean_content, compute_total_engagement, safe_int};
pub use rotate::{IdentityRotator, ProxyConfig, ProxyRotator};
pub use scrape::{scrape_hashtag, HashtagScraper, MediaType, Post};
