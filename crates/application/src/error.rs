//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Every geocoding provider failed for a place
    #[error("Geocoding failed: {0}")]
    GeocodingFailed(String),

    /// Every routing provider failed, or an endpoint could not be geocoded
    #[error("Routing failed: {0}")]
    RoutingFailed(String),

    /// Search is not configured or the provider refused the request
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller asked for something that cannot be done
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

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
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ExternalService(_) | Self::SearchUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::validation("distance_km must be positive").into();
        assert_eq!(err.to_string(), "Validation failed: distance_km must be positive");
    }

    #[test]
    fn routing_failed_message() {
        let err = ApplicationError::RoutingFailed("no route".to_string());
        assert_eq!(err.to_string(), "Routing failed: no route");
    }

    #[test]
    fn retryable_errors() {
        assert!(ApplicationError::RateLimited.is_retryable());
        assert!(ApplicationError::ExternalService("503".to_string()).is_retryable());
        assert!(!ApplicationError::GeocodingFailed("x".to_string()).is_retryable());
        assert!(!ApplicationError::NotFound("x".to_string()).is_retryable());
    }
}
