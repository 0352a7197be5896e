//! Port for secret storage and retrieval
//!
//! API keys for the keyed providers are looked up through this port so
//! that services never read environment variables or files directly.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for secret storage operations
///
/// Implementations can retrieve secrets from a host-provided secrets file,
/// from environment variables, or from a layered combination of both.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SecretStorePort: Send + Sync {
    /// Retrieve a secret by its key (e.g., "SERPER_API_KEY")
    ///
    /// Returns `NotFound` when the key is absent.
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError>;

    /// Check if a secret exists
    async fn exists(&self, key: &str) -> Result<bool, ApplicationError>;

    /// Check if the secret store is healthy and accessible
    async fn is_healthy(&self) -> bool;

    /// Retrieve a secret, treating a missing or blank value as `None`
    async fn get_optional(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        match self.get_secret(key).await {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(ApplicationError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
