pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{CliConfig, RuntimeConfig};
pub use crate::core::{fetcher::RseClient, paginator::fetch_all, router::execute, router::QueryMode};
pub use utils::error::{Result, RseError};
