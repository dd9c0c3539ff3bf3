use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses and validates configuration from TOML text
///
/// Sections and keys that are absent keep their defaults, so an empty string
/// is a valid configuration.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Reads an audit configuration file
///
/// # Arguments
///
/// * `path` - TOML file with optional `[crawler]`, `[user-agent]` and `[output]` sections
///
/// # Returns
///
/// * `Ok(Config)` - The parsed configuration, already validated
/// * `Err(ConfigError)` - The file is unreadable, not TOML, or out of range
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use link_audit::config::load_config;
///
/// let config = load_config(Path::new("audit.toml")).unwrap();
/// println!("Slow mode: {}", config.crawler.slow_mode);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Hex-encoded SHA-256 of configuration text
fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Fingerprints a configuration file
///
/// The digest is logged at startup and written into the markdown summary, so
/// a report can be tied to the settings that produced it.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(hash_content(&content))
}

/// Reads a configuration file once, returning the parsed config and its fingerprint
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}
