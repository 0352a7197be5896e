//! Geocoding adapter - Implements GeocodingPort using integration_geo

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::GeocodingPort;
use async_trait::async_trait;
use domain::{Coordinate, GeocodingProvider};
use integration_geo::{
    GeocodingClient, GeocodingError, MapplsConfig, MapplsGeocodingClient, NominatimConfig,
    NominatimGeocodingClient,
};
use tracing::{debug, instrument};

/// One geocoding provider exposed through the application port
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
    provider: GeocodingProvider,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl GeocodingAdapter {
    /// Wrap an arbitrary client under a provider label
    pub fn new(client: Arc<dyn GeocodingClient>, provider: GeocodingProvider) -> Self {
        Self { client, provider }
    }

    /// Mappls geocoder with the given key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client fails to
    /// initialize.
    pub fn mappls(config: &MapplsConfig, api_key: &str) -> Result<Self, ApplicationError> {
        let client = MapplsGeocodingClient::new(config, api_key)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client), GeocodingProvider::Mappls))
    }

    /// Nominatim geocoder
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn nominatim(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client), GeocodingProvider::Nominatim))
    }

    /// Map integration geocoding error to application error
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::AddressNotFound(place) => {
                ApplicationError::NotFound(format!("No coordinates for: {place}"))
            },
            GeocodingError::RateLimitExceeded { retry_after_secs } => {
                debug!(retry_after = ?retry_after_secs, "Geocoding rate limited");
                ApplicationError::RateLimited
            },
            GeocodingError::AuthenticationFailed(e) => {
                ApplicationError::Configuration(format!("Authentication failed: {e}"))
            },
            GeocodingError::ConnectionFailed(e)
            | GeocodingError::RequestFailed(e)
            | GeocodingError::ParseError(e) => ApplicationError::ExternalService(e),
            GeocodingError::Timeout { timeout_secs } => {
                ApplicationError::ExternalService(format!("Request timed out after {timeout_secs}s"))
            },
        }
    }
}

#[async_trait]
impl GeocodingPort for GeocodingAdapter {
    #[instrument(skip(self), fields(provider = %self.provider))]
    async fn geocode(&self, place: &str) -> Result<Coordinate, ApplicationError> {
        self.client.geocode(place).await.map_err(Self::map_error)
    }

    fn provider(&self) -> GeocodingProvider {
        self.provider
    }
}
