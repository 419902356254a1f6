//! Catalogue Crawler: a paginated book catalogue scraper
//!
//! This crate walks the listing pages of a public book catalogue, fetches the
//! detail page of every book it finds, extracts a typed record per book and
//! offers a small filter/export session over the resulting table.

pub mod book;
pub mod config;
pub mod crawler;
pub mod output;
pub mod session;
pub mod state;

use thiserror::Error;

/// Main error type for crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid crawl transition: {event} while {from}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
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

/// Errors raised while turning a detail page into a [`book::BookRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    #[error("malformed price: {raw:?}")]
    MalformedPrice { raw: String },
}

impl ExtractError {
    /// Name of the field that could not be extracted
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::MalformedPrice { .. } => "price",
        }
    }
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for record extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use book::{extract, Availability, BookRecord};
pub use config::Config;
pub use crawler::{crawl_catalogue, CrawlReport, Crawler};
pub use state::{CrawlPhase, CrawlState};
