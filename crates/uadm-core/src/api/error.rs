//! Error taxonomy for backend calls.

use serde_json::Value;

/// Shown whenever the request never produced a usable response.
pub const TRANSPORT_MESSAGE: &str = "Could not connect to the server or process its response.";

/// Shown when the backend rejects the session token.
pub const SESSION_EXPIRED_MESSAGE: &str =
    "Your session has expired or is invalid. Please log in again.";

/// Failure of a backend call.
///
/// Local form validation is not represented here: those failures are caught
/// before a request is built and never reach the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// HTTP 401 on an authenticated call. The session must be dropped.
    #[error("session rejected by the server")]
    Unauthorized,

    /// Any other non-success status.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Remote { status: u16, detail: Option<String> },

    /// Connection failure or an unreadable response body.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }

    /// Builds a remote error from a status code and raw response body.
    pub fn remote(status: u16, body: &[u8]) -> Self {
        ApiError::Remote {
            status,
            detail: extract_detail(body),
        }
    }

    /// Human-readable message for the operator.
    ///
    /// Remote errors use the backend's `detail` when present and `fallback`
    /// otherwise. Transport errors always use the connectivity message.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthorized => SESSION_EXPIRED_MESSAGE.to_string(),
            ApiError::Remote { detail, .. } => {
                detail.clone().unwrap_or_else(|| fallback.to_string())
            }
            ApiError::Transport(_) => TRANSPORT_MESSAGE.to_string(),
        }
    }
}

pub(crate) fn classify_reqwest_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Transport(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        ApiError::Transport(format!("Connection failed: {e}"))
    } else if e.is_request() {
        ApiError::Transport(format!("Request error: {e}"))
    } else {
        ApiError::Transport(format!("Network error: {e}"))
    }
}

/// Pulls the human-readable message out of an error body.
///
/// Understands `{"detail": "..."}` and the validation shape
/// `{"detail": [{"msg": "...", ...}]}`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let json: Value = serde_json::from_slice(body).ok()?;
    match json.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
