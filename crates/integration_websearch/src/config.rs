//! Web search configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Serper search API
#[derive(Clone, Serialize, Deserialize)]
pub struct WebSearchConfig {
    /// Serper API key, usually injected from the secret store
    #[serde(default, skip_serializing)]
    pub serper_api_key: Option<String>,

    /// Serper API base URL
    #[serde(default = "default_serper_base_url")]
    pub serper_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of results to request
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Result country (`gl`, ISO 3166-1 alpha-2, lowercase)
    #[serde(default = "default_result_country")]
    pub result_country: String,

    /// Result language (`hl`, ISO 639-1)
    #[serde(default = "default_result_language")]
    pub result_language: String,
}

fn default_serper_base_url() -> String {
    "https://google.serper.dev".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_results() -> usize {
    5
}

fn default_result_country() -> String {
    "in".to_string()
}

fn default_result_language() -> String {
    "en".to_string()
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            serper_api_key: None,
            serper_base_url: default_serper_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            result_country: default_result_country(),
            result_language: default_result_language(),
        }
    }
}

impl std::fmt::Debug for WebSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchConfig")
            .field(
                "serper_api_key",
                &self.serper_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("serper_base_url", &self.serper_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_results", &self.max_results)
            .field("result_country", &self.result_country)
            .field("result_language", &self.result_language)
            .finish()
    }
}

impl WebSearchConfig {
    /// Create a configuration for testing (no API key, short timeout)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            serper_api_key: None,
            timeout_secs: 5,
            max_results: 3,
            ..Default::default()
        }
    }

    /// Whether a non-blank API key is present
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.serper_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.serper_base_url.is_empty() {
            return Err("serper_base_url must not be empty".to_string());
        }

        if self.max_results == 0 {
            return Err("max_results must be greater than 0".to_string());
        }

        if self.max_results > 20 {
            return Err("max_results must be 20 or less".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}
