//! Provider configuration for geocoding and routing

use serde::{Deserialize, Serialize};

/// Configuration for the Mappls (MapmyIndia) geocoding and routing APIs
///
/// The API key itself is not part of this struct; it is resolved from the
/// secret store at startup so it never lands in a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapplsConfig {
    /// Base URL of the geocoding API (Atlas)
    #[serde(default = "default_mappls_geocode_base_url")]
    pub geocode_base_url: String,

    /// Base URL of the advanced maps routing API
    #[serde(default = "default_mappls_routing_base_url")]
    pub routing_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_mappls_geocode_base_url() -> String {
    "https://atlas.mappls.com".to_string()
}

fn default_mappls_routing_base_url() -> String {
    "https://apis.mappls.com/advancedmaps/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for MapplsConfig {
    fn default() -> Self {
        Self {
            geocode_base_url: default_mappls_geocode_base_url(),
            routing_base_url: default_mappls_routing_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MapplsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.geocode_base_url.is_empty() {
            return Err("mappls.geocode_base_url must not be empty".to_string());
        }
        if self.routing_base_url.is_empty() {
            return Err("mappls.routing_base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("mappls.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Optional country code filter (e.g. "in"), empty for worldwide
    #[serde(default)]
    pub country_filter: String,

    /// Minimum spacing between two requests (usage policy: 1 req/s)
    #[serde(default = "default_min_request_interval_ms")]
    pub min_request_interval_ms: u64,

    /// User agent sent with every request, required by the usage policy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_min_request_interval_ms() -> u64 {
    1100
}

fn default_user_agent() -> String {
    concat!("travel-advisor/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            timeout_secs: default_timeout_secs(),
            country_filter: String::new(),
            min_request_interval_ms: default_min_request_interval_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing (no politeness delay)
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            min_request_interval_ms: 0,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("nominatim.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("nominatim.timeout_secs must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("nominatim.user_agent must not be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration for an OSRM routing server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server
    #[serde(default = "default_osrm_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_osrm_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_osrm_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("osrm.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("osrm.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// All geo providers, as one config section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Mappls (primary geocoder and router, requires a key)
    #[serde(default)]
    pub mappls: MapplsConfig,

    /// Nominatim (fallback geocoder)
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// OSRM (fallback router)
    #[serde(default)]
    pub osrm: OsrmConfig,
}

impl GeoConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            mappls: MapplsConfig::for_testing(),
            nominatim: NominatimConfig::for_testing(),
            osrm: OsrmConfig::for_testing(),
        }
    }

    /// Validate every provider section
    ///
    /// # Errors
    ///
    /// Returns the first invalid section's message.
    pub fn validate(&self) -> Result<(), String> {
        self.mappls.validate()?;
        self.nominatim.validate()?;
        self.osrm.validate()
    }
}
