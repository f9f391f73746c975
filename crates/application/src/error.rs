//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// External service error (network, timeout, non-2xx)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Malformed or unexpected response content
    #[error("Parse error: {0}")]
    Parse(String),

    /// Lookup returned nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::RateLimited | ApplicationError::ExternalService(_)
        )
    }

    /// Check if this error means "no result" rather than a failure
    pub const fn is_not_found(&self) -> bool {
        matches!(self, ApplicationError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::ExternalService("timeout".to_string()).is_retryable());
        assert!(!ApplicationError::Parse("bad json".to_string()).is_retryable());
        assert!(!ApplicationError::Configuration("no key".to_string()).is_retryable());
    }

    #[test]
    fn domain_errors_convert() {
        let err: ApplicationError = DomainError::InvalidBudgetTier(9).into();
        assert!(matches!(err, ApplicationError::Domain(_)));
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn not_found_classification() {
        assert!(ApplicationError::NotFound("trip".to_string()).is_not_found());
        assert!(!ApplicationError::Internal("x".to_string()).is_not_found());
    }
}
