use crate::config::MAX_TIMEOUT_SECS;
use crate::utils::error::{Result, RseError};
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const SETTINGS_FILE: &str = "config.toml";

/// Optional settings file, e.g.
///
/// ```toml
/// base_url = "https://api.rsecloud.com/api/v1"
/// timeout_seconds = 30
/// connect_timeout_seconds = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub connect_timeout_seconds: Option<u64>,
}

impl Settings {
    /// An explicit path must exist; the default file under `config_dir` is optional.
    pub fn load(explicit: Option<&Path>, config_dir: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match config_dir.map(|dir| dir.join(SETTINGS_FILE)) {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RseError::ConfigError {
            message: format!("Failed to read settings file {}: {}", path.display(), e),
        })?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(|e| RseError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            validate_url("base_url", base_url)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, MAX_TIMEOUT_SECS)?;
        }
        if let Some(timeout) = self.connect_timeout_seconds {
            validate_range("connect_timeout_seconds", timeout, 1, MAX_TIMEOUT_SECS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_settings() {
        let settings = Settings::from_toml_str(
            r#"
base_url = "http://localhost:8080/api/v1"
timeout_seconds = 15
"#,
        )
        .unwrap();
        assert_eq!(
            settings.base_url.as_deref(),
            Some("http://localhost:8080/api/v1")
        );
        assert_eq!(settings.timeout_seconds, Some(15));
        assert_eq!(settings.connect_timeout_seconds, None);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(Settings::from_toml_str("base_url = 5").is_err());
        assert!(Settings::from_toml_str("base_url = \"file:///etc\"").is_err());
        assert!(Settings::from_toml_str("timeout_seconds = 0").is_err());
        assert!(Settings::from_toml_str("retries = 3").is_err());
    }

    #[test]
    fn test_missing_default_file_is_fine() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            Settings::load(None, Some(dir.path())).unwrap(),
            Settings::default()
        );
        assert_eq!(Settings::load(None, None).unwrap(), Settings::default());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml")), None).unwrap_err();
        assert!(matches!(err, RseError::ConfigError { .. }));
    }
}
