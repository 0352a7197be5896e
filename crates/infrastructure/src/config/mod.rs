//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `secrets`: where API keys are looked up
//!
//! Provider, search, fare and pricing sections reuse the config types of the
//! crates that consume them.

mod secrets;
mod server;

use std::path::Path;

use application::FareSearchConfig;
use domain::{CostPolicy, TransportMode};
use integration_geo::GeoConfig;
use integration_websearch::WebSearchConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

pub use secrets::SecretsConfig;
pub use server::ServerConfig;

/// Environment variable prefix, e.g. `TRAVEL_ADVISOR__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "TRAVEL_ADVISOR";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Geocoding and routing providers
    #[serde(default)]
    pub geo: GeoConfig,

    /// Web search (Serper)
    #[serde(default)]
    pub websearch: WebSearchConfig,

    /// Fare scraping from search snippets
    #[serde(default)]
    pub fares: FareSearchConfig,

    /// Pricing policy switches
    #[serde(default)]
    pub pricing: CostPolicy,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Secret lookup
    #[serde(default)]
    pub secrets: SecretsConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of `./config.toml`
    ///
    /// An explicit path must exist; the default file is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or an explicit file is
    /// missing.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            server: ServerConfig::for_testing(),
            geo: GeoConfig::for_testing(),
            websearch: WebSearchConfig::for_testing(),
            ..Default::default()
        }
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first invalid section's message.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.geo.validate()?;
        self.websearch.validate()?;
        self.fares.validate()?;
        self.telemetry.validate()?;
        self.secrets.validate()?;

        let budget = self.worst_case_plan_secs();
        if self.server.request_timeout_secs <= budget {
            return Err(format!(
                "server.request_timeout_secs ({}) must exceed {budget}s, the time a trip plan \
                 takes when every provider runs into its timeout",
                self.server.request_timeout_secs
            ));
        }
        Ok(())
    }

    /// Upper bound on one trip plan with every provider timing out
    ///
    /// Both endpoints go through the whole geocoder chain, then the router
    /// chain, then one fare search per mode, all in sequence.
    #[must_use]
    pub fn worst_case_plan_secs(&self) -> u64 {
        let geo = &self.geo;
        let spacing_secs = geo.nominatim.min_request_interval_ms.div_ceil(1000);
        let geocode = geo.mappls.timeout_secs + geo.nominatim.timeout_secs + spacing_secs;
        let route = geo.mappls.timeout_secs + geo.osrm.timeout_secs;
        let searches = self.websearch.timeout_secs * TransportMode::ALL.len() as u64;
        2 * geocode + route + searches
    }
}
