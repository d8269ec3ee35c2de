pub mod api_key;
pub mod toml_config;

use crate::core::fetcher::{RseClient, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::core::router::QueryMode;
use crate::domain::model::{QueryDescriptor, DEFAULT_BASE_URL};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use toml_config::Settings;

pub const MAX_TIMEOUT_SECS: u64 = 3600;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "rsescan")]
#[command(about = "Look up subdomains and TLS certificates through the RSECloud API")]
pub struct CliConfig {
    /// Domain to fetch subdomains or certificates for
    #[arg(short = 'd', long = "domain")]
    pub domain: Option<String>,

    /// API key for authentication (defaults to ~/.config/rsescan/api_key)
    #[arg(long = "key")]
    pub key: Option<String>,

    /// Use the certificate search API (requires -d)
    #[arg(long = "cn")]
    pub certificate: bool,

    /// Organization name to search certificates by
    #[arg(long = "so")]
    pub org_name: Option<String>,

    /// Settings file (defaults to ~/.config/rsescan/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Total request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Connect timeout in seconds
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    pub fn query_mode(&self) -> Result<QueryMode> {
        QueryMode::from_flags(
            self.domain.as_deref(),
            self.org_name.as_deref(),
            self.certificate,
        )
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        self.query_mode()?;
        if let Some(base_url) = &self.base_url {
            validate_url("base_url", base_url)?;
        }
        if let Some(timeout) = self.timeout {
            validate_range("timeout", timeout, 1, MAX_TIMEOUT_SECS)?;
        }
        if let Some(timeout) = self.connect_timeout {
            validate_range("connect_timeout", timeout, 1, MAX_TIMEOUT_SECS)?;
        }
        Ok(())
    }
}

/// `$HOME/.config/rsescan`, if `HOME` is set.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(".config").join("rsescan"))
}

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub descriptor: QueryDescriptor,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl RuntimeConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        Self::resolve_in(cli, config_dir())
    }

    /// Flags win over the settings file, which wins over built-in defaults.
    pub fn resolve_in(cli: &CliConfig, config_dir: Option<PathBuf>) -> Result<Self> {
        cli.validate()?;
        let mode = cli.query_mode()?;

        let settings = Settings::load(cli.config.as_deref(), config_dir.as_deref())?;
        let base_url = cli
            .base_url
            .clone()
            .or(settings.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = cli
            .timeout
            .or(settings.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let connect_timeout = cli
            .connect_timeout
            .or(settings.connect_timeout_seconds)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);

        let api_key = api_key::resolve_api_key(cli.key.as_deref(), config_dir.as_deref())?;

        tracing::debug!(
            "Resolved {} query against {} (timeout {}s, connect {}s)",
            mode.query_type(),
            base_url,
            timeout,
            connect_timeout
        );

        Ok(Self {
            descriptor: mode.describe(&base_url, &api_key),
            timeout: Duration::from_secs(timeout),
            connect_timeout: Duration::from_secs(connect_timeout),
        })
    }

    pub fn client(&self) -> Result<RseClient> {
        RseClient::new(self.timeout, self.connect_timeout)
    }
}
