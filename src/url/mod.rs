//! URL handling module for Title Finder
//!
//! This module turns raw input lines into fetchable targets and parses the
//! proxy address given on the command line or in the config file.

mod normalize;
mod proxy;

// Re-export main functions
pub use normalize::{has_http_scheme, normalize_target, with_default_scheme};
pub use proxy::parse_proxy;
