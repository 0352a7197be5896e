//! Where API keys are looked up.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Secret store configuration
///
/// Keys are resolved from the host secrets file first and from environment
/// variables second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    /// TOML secrets file provided by the host (missing file = empty store)
    #[serde(default = "default_secrets_file")]
    pub file: PathBuf,

    /// Optional prefix for environment lookups (e.g. "TRAVEL" → `TRAVEL_SERPER_API_KEY`)
    #[serde(default)]
    pub env_prefix: Option<String>,

    /// Secret name of the Mappls key
    #[serde(default = "default_mappls_key_name")]
    pub mappls_key: String,

    /// Secret name of the Serper key
    #[serde(default = "default_serper_key_name")]
    pub serper_key: String,
}

fn default_secrets_file() -> PathBuf {
    PathBuf::from("secrets.toml")
}

fn default_mappls_key_name() -> String {
    "MAPPLS_API_KEY".to_string()
}

fn default_serper_key_name() -> String {
    "SERPER_API_KEY".to_string()
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            file: default_secrets_file(),
            env_prefix: None,
            mappls_key: default_mappls_key_name(),
            serper_key: default_serper_key_name(),
        }
    }
}

impl SecretsConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a key name is blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.mappls_key.trim().is_empty() || self.serper_key.trim().is_empty() {
            return Err("secrets key names must not be empty".to_string());
        }
        Ok(())
    }
}
