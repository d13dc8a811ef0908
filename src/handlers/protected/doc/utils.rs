use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Decode a request argument that may arrive as JSON text or inline JSON.
///
/// Absent, `null` and blank-string arguments decode to `None`.
pub fn parse_json<T: DeserializeOwned>(value: Option<Value>) -> Result<Option<T>, ApiError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(None),
        Some(Value::String(text)) => Ok(Some(serde_json::from_str(&text)?)),
        Some(other) => Ok(Some(serde_json::from_value(other)?)),
    }
}
