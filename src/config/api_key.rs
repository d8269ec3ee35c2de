use crate::utils::error::{Result, RseError};
use std::path::Path;

pub const API_KEY_FILE: &str = "api_key";

/// The `--key` flag wins; otherwise the key is read from `<config_dir>/api_key`.
pub fn resolve_api_key(flag: Option<&str>, config_dir: Option<&Path>) -> Result<String> {
    if let Some(key) = flag.map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    let dir = config_dir.ok_or_else(|| RseError::ConfigError {
        message: "API key not found: HOME is not set and no --key was given".to_string(),
    })?;
    read_api_key_file(&dir.join(API_KEY_FILE))
}

pub fn read_api_key_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| RseError::ConfigError {
        message: format!("API key not found: {}: {}", path.display(), e),
    })?;

    let key = content.trim();
    if key.is_empty() {
        return Err(RseError::ConfigError {
            message: format!("API key file is empty: {}", path.display()),
        });
    }

    tracing::debug!("Using API key from {}", path.display());
    Ok(key.to_string())
}
