use crate::utils::error::{Result, RseError};
use serde_json::Value;

/// Turns a raw `port` field into a port number.
///
/// A JSON string is parsed as base-10; a JSON integer is taken as-is. Anything
/// else, including strings that do not parse and values above 65535, is an error.
pub fn normalize_port(raw: &Value) -> Result<u16> {
    if let Value::String(text) = raw {
        return text.parse::<u16>().map_err(|e| RseError::PortParseError {
            raw: raw.to_string(),
            reason: e.to_string(),
        });
    }

    if let Some(number) = raw.as_u64() {
        return u16::try_from(number).map_err(|_| RseError::PortParseError {
            raw: raw.to_string(),
            reason: "port out of range".to_string(),
        });
    }

    Err(RseError::PortParseError {
        raw: raw.to_string(),
        reason: "expected a string or an integer".to_string(),
    })
}
