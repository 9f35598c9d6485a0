use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads a TOML settings file and validates it
///
/// # Returns
///
/// * `Ok(Config)` - Settings with defaults filled in for missing keys
/// * `Err(ConfigError)` - Unreadable file, bad TOML or a rejected value
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 digest of a settings file, logged at startup
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read(path)?;
    Ok(hash_bytes(&content))
}

fn hash_bytes(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Like [`load_config`], also returning the digest of the bytes parsed
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let digest = hash_bytes(text.as_bytes());
    Ok((parse_config(&text)?, digest))
}
