//! Secret store that consults several backends in order

use std::sync::Arc;

use application::{error::ApplicationError, ports::SecretStorePort};
use async_trait::async_trait;

/// Combined secret store that tries multiple backends
///
/// The first store holding a key wins, so the host secrets file is listed
/// before the environment.
pub struct LayeredSecretStore {
    stores: Vec<Arc<dyn SecretStorePort>>,
}

impl std::fmt::Debug for LayeredSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredSecretStore")
            .field("stores_count", &self.stores.len())
            .finish()
    }
}

impl LayeredSecretStore {
    /// Create a layered secret store with the given backends, highest
    /// priority first
    pub fn new(stores: Vec<Arc<dyn SecretStorePort>>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl SecretStorePort for LayeredSecretStore {
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        let mut last_error = None;

        for store in &self.stores {
            match store.get_secret(key).await {
                Ok(value) if !value.trim().is_empty() => return Ok(value),
                Ok(_) | Err(ApplicationError::NotFound(_)) => {},
                Err(e) => {
                    last_error = Some(e);
                },
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ApplicationError::NotFound(format!("Secret not found in any store: {key}"))
        }))
    }

    async fn exists(&self, key: &str) -> Result<bool, ApplicationError> {
        for store in &self.stores {
            if store.exists(key).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn is_healthy(&self) -> bool {
        for store in &self.stores {
            if store.is_healthy().await {
                return true;
            }
        }
        false
    }
}
