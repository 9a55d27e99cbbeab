//! Error type shared by the REST and auth clients

use serde::{Deserialize, Serialize};

/// Error returned by backend calls, carrying the HTTP status and the
/// response body text
///
/// Network and decode failures use status 0 with a pseudo error code.
///
/// # Examples
/// ```
/// use backend_client::RestError;
///
/// let error = RestError::new(404, "NotFound", "row not found");
/// assert_eq!(error.status(), 404);
/// assert!(error.is_not_found());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestError {
    status: u16,
    code: String,
    message: String,
}

impl RestError {
    /// Create a new backend error
    pub fn new(status: u16, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { status, code: code.into(), message: message.into() }
    }

    /// Create an error for a transport-level failure
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(0, "NetworkError", message)
    }

    /// Create an error for a response body that could not be decoded
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(0, "DecodeError", message)
    }

    /// HTTP status code (0 for transport/decode failures)
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Error code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message / response body text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the backend reported a missing row/resource
    pub fn is_not_found(&self) -> bool {
        self.status == 404 || self.status == 406
    }
}

impl std::fmt::Display for RestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Backend error {}: {} - {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for RestError {}

/// Error body shape returned by the backend's REST endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestErrorBody {
    /// Error code
    #[serde(default)]
    pub code: Option<String>,
    /// Error message
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_accessors() {
        let error = RestError::new(500, "Internal", "boom");
        assert_eq!(error.status(), 500);
        assert_eq!(error.code(), "Internal");
        assert_eq!(error.message(), "boom");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_network_error_status_zero() {
        let error = RestError::network("connection refused");
        assert_eq!(error.status(), 0);
        assert_eq!(error.code(), "NetworkError");
    }

    #[test]
    fn test_display() {
        let error = RestError::new(404, "NotFound", "missing");
        let text = format!("{error}");
        assert!(text.contains("404"));
        assert!(text.contains("NotFound"));
    }
}
