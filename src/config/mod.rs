//! Configuration module for the catalogue crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so an absent file means "crawl the default catalogue".
//!
//! # Example
//!
//! ```no_run
//! use catalogue_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Request timeout: {}s", config.http.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogueConfig, Config, HttpConfig, OutputConfig, DEFAULT_ROOT_URL};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
