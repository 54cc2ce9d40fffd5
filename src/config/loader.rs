//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `upstream.cat_api_key`.
pub const ENV_API_KEY: &str = "CAT_API_KEY";
/// Environment variable overriding `upstream.api_base_url`.
pub const ENV_BASE_URL: &str = "CAT_API_BASE_URL";
/// Environment variable overriding `upstream.sub_id`.
pub const ENV_SUB_ID: &str = "CAT_SUB_ID";
/// Environment variable overriding `listener.bind_address`.
pub const ENV_BIND: &str = "CAT_GATEWAY_BIND";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Resolve the effective configuration: file (or defaults), then environment
/// overrides, then validation.
pub fn load(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => GatewayConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply overrides from `lookup`. Empty values leave the setting untouched.
pub fn apply_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(v) = get(ENV_API_KEY) {
        config.upstream.cat_api_key = v;
    }
    if let Some(v) = get(ENV_BASE_URL) {
        config.upstream.api_base_url = v;
    }
    if let Some(v) = get(ENV_SUB_ID) {
        config.upstream.sub_id = v;
    }
    if let Some(v) = get(ENV_BIND) {
        config.listener.bind_address = v;
    }
}
