//! The `{ success, message, data? }` envelope wrapped around API responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard API response body.
///
/// `data` is omitted when the payload is null, an empty array or an empty
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    /// Successful response carrying `data`.
    pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: non_empty(serde_json::to_value(data).unwrap_or(Value::Null)),
        }
    }

    /// Successful response with a message only.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Error response. `detail`, when present, is exposed as `data.error`.
    pub fn error(message: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: detail.map(|d| serde_json::json!({ "error": d })),
        }
    }
}

fn non_empty(value: Value) -> Option<Value> {
    match &value {
        Value::Null => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        _ => Some(value),
    }
}
