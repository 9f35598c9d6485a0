//! Configuration module for Title Finder
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Command-line flags are applied on top of it by the
//! binary.
//!
//! # Example
//!
//! ```no_run
//! use title_finder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("title-finder.toml")).unwrap();
//! println!("Workers: {}", config.pool.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, PoolConfig, ProxyConfig, ProxyCredentials, DEFAULT_ACCEPT_LANGUAGE,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{resolve_proxy, validate};
