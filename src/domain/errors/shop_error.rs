//! Shop API error types.

use serde_json::Value;
use thiserror::Error;

/// Why a shop request settled as rejected.
///
/// Fetch slices treat every variant the same way; the distinction exists
/// for logging and for the one action that reports the server's reason.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ShopError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("server responded with HTTP {status}")]
    Http { status: u16, payload: Option<Value> },

    #[error("malformed response: {message}")]
    Malformed { message: String },

    #[error("response carried no data")]
    NoData { payload: Option<Value> },

    #[error("not signed in")]
    NotAuthenticated,

    #[error("request cancelled")]
    Cancelled,

    #[error("unexpected shop error: {message}")]
    Unexpected { message: String },
}

impl ShopError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates malformed response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// The raw rejection value: the server's JSON body when there was one,
    /// otherwise the error message as a JSON string.
    #[must_use]
    pub fn rejection_payload(&self) -> Value {
        match self {
            Self::Http {
                payload: Some(payload),
                ..
            }
            | Self::NoData {
                payload: Some(payload),
            } => payload.clone(),
            other => Value::String(other.to_string()),
        }
    }

    /// Human readable reason, preferring the server's `message` field.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.rejection_payload() {
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| self.to_string(), ToString::to_string),
            Value::String(s) => s,
            other => other.to_string(),
        }
    }
}
