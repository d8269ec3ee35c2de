use thiserror::Error;

#[derive(Error, Debug)]
pub enum RseError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("API request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("Failed to decode response for page {page}: {source}")]
    DecodeError {
        page: u32,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to parse port {raw}: {reason}")]
    PortParseError { raw: String, reason: String },

    #[error("Invalid query type: {value}")]
    InvalidQueryType { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Config,
    Network,
    Decode,
    Record,
    System,
}

impl RseError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RseError::ValidationError { .. } | RseError::InvalidQueryType { .. } => {
                ErrorCategory::Validation
            }
            RseError::ConfigError { .. } | RseError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            RseError::NetworkError(_) | RseError::HttpStatusError { .. } => ErrorCategory::Network,
            RseError::DecodeError { .. } => ErrorCategory::Decode,
            RseError::PortParseError { .. } => ErrorCategory::Record,
            RseError::IoError(_) => ErrorCategory::System,
        }
    }

    /// Only per-record port failures are recoverable; everything else aborts the run.
    pub fn is_fatal(&self) -> bool {
        self.category() != ErrorCategory::Record
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RseError::ValidationError { message } => format!("Invalid arguments: {}", message),
            RseError::ConfigError { message } => format!("Configuration problem: {}", message),
            RseError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            RseError::NetworkError(e) if e.is_timeout() => {
                "The API did not answer in time".to_string()
            }
            RseError::NetworkError(e) if e.is_connect() => {
                "Could not connect to the API".to_string()
            }
            RseError::NetworkError(e) => format!("Request to the API failed: {}", e),
            RseError::HttpStatusError { status, .. } => {
                format!("The API rejected the request (HTTP {})", status)
            }
            RseError::DecodeError { page, .. } => {
                format!("The API returned an unexpected response for page {}", page)
            }
            RseError::PortParseError { raw, .. } => format!("Unusable port value {}", raw),
            RseError::InvalidQueryType { value } => format!("Unknown query type '{}'", value),
            RseError::IoError(e) => format!("I/O failure: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Use either -d, -d with --cn, or --so; --cn must be combined with -d"
            }
            ErrorCategory::Config => {
                "Pass --key or write the API key to ~/.config/rsescan/api_key"
            }
            ErrorCategory::Network => {
                "Check connectivity and the API key, or raise --timeout"
            }
            ErrorCategory::Decode => "Check --base-url points at the RSECloud API",
            ErrorCategory::Record => "The record was skipped",
            ErrorCategory::System => "Check that standard output is writable",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, RseError>;
