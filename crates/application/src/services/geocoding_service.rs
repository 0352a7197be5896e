//! Geocoding provider chain
//!
//! Providers are tried in the order they were registered. The first
//! coordinate wins; only when every provider has failed does the chain
//! report an error.

use std::fmt;
use std::sync::Arc;

use domain::{Coordinate, DomainError, GeocodingProvider};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::ApplicationError;
use crate::ports::GeocodingPort;

/// A place name resolved to a coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodedPlace {
    /// The place name as queried (trimmed)
    pub place: String,
    /// Best-match coordinate
    pub coordinate: Coordinate,
    /// Provider that answered
    pub provider: GeocodingProvider,
}

/// Ordered list of geocoding providers with fall-through on failure
#[derive(Clone, Default)]
pub struct GeocoderChain {
    providers: Vec<Arc<dyn GeocodingPort>>,
}

impl fmt::Debug for GeocoderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderChain")
            .field("providers", &self.providers())
            .finish()
    }
}

impl GeocoderChain {
    /// Create a chain from providers in priority order
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn GeocodingPort>>) -> Self {
        Self { providers }
    }

    /// Providers in the order they are tried
    #[must_use]
    pub fn providers(&self) -> Vec<GeocodingProvider> {
        self.providers.iter().map(|p| p.provider()).collect()
    }

    /// Whether no provider is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Resolve a place name, falling through providers until one succeeds
    #[instrument(skip(self))]
    pub async fn geocode(&self, place: &str) -> Result<GeocodedPlace, ApplicationError> {
        let place = place.trim();
        if place.is_empty() {
            return Err(DomainError::validation("place name must not be empty").into());
        }
        if self.providers.is_empty() {
            return Err(ApplicationError::GeocodingFailed(format!(
                "no geocoding provider configured for '{place}'"
            )));
        }

        let mut failures = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let name = provider.provider();
            match provider.geocode(place).await {
                Ok(coordinate) => {
                    debug!(provider = %name, %coordinate, "Place geocoded");
                    return Ok(GeocodedPlace {
                        place: place.to_string(),
                        coordinate,
                        provider: name,
                    });
                },
                Err(e) => {
                    warn!(provider = %name, error = %e, "Geocoding provider failed, trying next");
                    failures.push(format!("{name}: {e}"));
                },
            }
        }

        Err(ApplicationError::GeocodingFailed(format!(
            "no provider could locate '{place}' ({})",
            failures.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockGeocodingPort;

    fn provider_ok(kind: GeocodingProvider, lon: f64, lat: f64) -> Arc<dyn GeocodingPort> {
        let mut mock = MockGeocodingPort::new();
        mock.expect_provider().return_const(kind);
        mock.expect_geocode()
            .returning(move |_| Ok(Coordinate::new(lon, lat).unwrap()));
        Arc::new(mock)
    }

    fn provider_err(kind: GeocodingProvider, times: usize) -> Arc<dyn GeocodingPort> {
        let mut mock = MockGeocodingPort::new();
        mock.expect_provider().return_const(kind);
        mock.expect_geocode()
            .times(times)
            .returning(|place| Err(ApplicationError::NotFound(format!("no match for {place}"))));
        Arc::new(mock)
    }

    #[tokio::test]
    async fn primary_success_short_circuits() {
        let mut fallback = MockGeocodingPort::new();
        fallback
            .expect_provider()
            .return_const(GeocodingProvider::Nominatim);
        fallback.expect_geocode().never();

        let chain = GeocoderChain::new(vec![
            provider_ok(GeocodingProvider::Mappls, 77.2, 28.6),
            Arc::new(fallback),
        ]);

        let result = chain.geocode("Delhi").await.unwrap();
        assert_eq!(result.provider, GeocodingProvider::Mappls);
        assert_eq!(result.place, "Delhi");
    }

    #[tokio::test]
    async fn falls_back_when_primary_fails() {
        let chain = GeocoderChain::new(vec![
            provider_err(GeocodingProvider::Mappls, 1),
            provider_ok(GeocodingProvider::Nominatim, 75.8, 26.9),
        ]);

        let result = chain.geocode(" Jaipur ").await.unwrap();
        assert_eq!(result.provider, GeocodingProvider::Nominatim);
        assert_eq!(result.place, "Jaipur");
        assert!((result.coordinate.latitude() - 26.9).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn exhaustion_reports_every_provider() {
        let chain = GeocoderChain::new(vec![
            provider_err(GeocodingProvider::Mappls, 1),
            provider_err(GeocodingProvider::Nominatim, 1),
        ]);

        let err = chain.geocode("Atlantis").await.unwrap_err();
        let ApplicationError::GeocodingFailed(message) = err else {
            panic!("expected GeocodingFailed, got {err:?}");
        };
        assert!(message.contains("mappls"));
        assert!(message.contains("nominatim"));
    }

    #[tokio::test]
    async fn blank_place_rejected_before_any_call() {
        let chain = GeocoderChain::new(vec![provider_err(GeocodingProvider::Mappls, 0)]);
        let err = chain.geocode("   ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[tokio::test]
    async fn empty_chain_fails() {
        let chain = GeocoderChain::default();
        assert!(chain.is_empty());
        assert!(matches!(
            chain.geocode("Pune").await,
            Err(ApplicationError::GeocodingFailed(_))
        ));
    }

    #[test]
    fn providers_listed_in_order() {
        let chain = GeocoderChain::new(vec![
            provider_err(GeocodingProvider::Mappls, 0),
            provider_err(GeocodingProvider::Nominatim, 0),
        ]);
        assert_eq!(
            chain.providers(),
            vec![GeocodingProvider::Mappls, GeocodingProvider::Nominatim]
        );
    }
}
