//! TOML file secret store adapter
//!
//! Reads a host-provided secrets file such as:
//!
//! ```toml
//! MAPPLS_API_KEY = "..."
//! SERPER_API_KEY = "..."
//!
//! [mappls]
//! api_key = "..."   # reachable as "mappls/api_key"
//! ```
//!
//! The file is read once at construction. A missing file is an empty store.

use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::SecretStorePort};
use async_trait::async_trait;
use toml::{Table, Value};
use tracing::{debug, info, instrument};

/// Secret store backed by a TOML secrets file
#[derive(Clone)]
pub struct FileSecretStore {
    path: PathBuf,
    secrets: Table,
}

impl std::fmt::Debug for FileSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSecretStore")
            .field("path", &self.path)
            .field("keys", &self.secrets.len())
            .finish()
    }
}

impl FileSecretStore {
    /// Load the secrets file at `path`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file exists but cannot be read
    /// or is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            info!(path = %path.display(), "No secrets file found, continuing without it");
            return Ok(Self {
                path,
                secrets: Table::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            ApplicationError::Configuration(format!(
                "Failed to read secrets file {}: {e}",
                path.display()
            ))
        })?;

        Self::from_toml_str(&content).map(|store| Self { path, ..store })
    }

    /// Build a store from TOML text
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the text is not valid TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, ApplicationError> {
        let secrets: Table = toml::from_str(content).map_err(|e: toml::de::Error| {
            ApplicationError::Configuration(format!("Invalid secrets file: {}", e.message()))
        })?;

        Ok(Self {
            path: PathBuf::new(),
            secrets,
        })
    }

    /// Walk `a/b/c` through nested tables
    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut parts = key.trim().split('/');
        let first = parts.next()?;
        parts.try_fold(self.secrets.get(first)?, |value, part| {
            value.as_table().and_then(|table| table.get(part))
        })
    }
}

#[async_trait]
impl SecretStorePort for FileSecretStore {
    #[instrument(skip(self))]
    async fn get_secret(&self, key: &str) -> Result<String, ApplicationError> {
        match self.lookup(key) {
            Some(Value::String(value)) => {
                debug!("Retrieved secret from secrets file");
                Ok(value.clone())
            },
            Some(Value::Integer(value)) => Ok(value.to_string()),
            Some(Value::Table(_) | Value::Array(_)) => Err(ApplicationError::Configuration(
                format!("Secret {key} is not a scalar value"),
            )),
            Some(other) => Ok(other.to_string()),
            None => Err(ApplicationError::NotFound(format!(
                "Secret not found in secrets file: {key}"
            ))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, ApplicationError> {
        Ok(self.lookup(key).is_some())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
