//! Maps integration error types

use thiserror::Error;

/// Errors that can occur while talking to a geodata backend
#[derive(Debug, Error)]
pub enum MapsError {
    /// A credential the backend needs is not configured
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// Connection to the backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Backend answered with an error status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Backend returned zero results
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend reported quota exhaustion
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl MapsError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::RateLimitExceeded
        )
    }

    /// Returns true when the backend simply had no match
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Map a reqwest transport error
    pub(crate) fn from_transport(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

/// Map a Google web-service `status` field onto [`MapsError`]
///
/// Returns `Ok(())` for `OK`.
pub(crate) fn check_google_status(
    status: &str,
    error_message: Option<&str>,
    subject: &str,
) -> Result<(), MapsError> {
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" | "NOT_FOUND" => Err(MapsError::NotFound(subject.to_string())),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(MapsError::RateLimitExceeded),
        other => Err(MapsError::RequestFailed(match error_message {
            Some(message) => format!("{other}: {message}"),
            None => other.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(MapsError::ConnectionFailed("x".to_string()).is_retryable());
        assert!(MapsError::Timeout { timeout_secs: 5 }.is_retryable());
        assert!(MapsError::RateLimitExceeded.is_retryable());
    }

    #[test]
    fn non_retryable_errors() {
        assert!(!MapsError::NotFound("x".to_string()).is_retryable());
        assert!(!MapsError::ParseError("x".to_string()).is_retryable());
        assert!(!MapsError::ConfigurationMissing("key".to_string()).is_retryable());
    }

    #[test]
    fn not_found_classification() {
        assert!(MapsError::NotFound("Atlantis".to_string()).is_not_found());
        assert!(!MapsError::RequestFailed("HTTP 500".to_string()).is_not_found());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            MapsError::Timeout { timeout_secs: 10 }.to_string(),
            "Request timed out after 10 seconds"
        );
        assert_eq!(
            MapsError::NotFound("Atlantis".to_string()).to_string(),
            "Not found: Atlantis"
        );
    }
}
