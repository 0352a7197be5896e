//! Routing provider chain and the source/destination distance use case

use std::fmt;
use std::sync::Arc;

use domain::{Coordinate, DistanceResult, RoutingProvider};
use tracing::{debug, info, instrument, warn};

use super::geocoding_service::GeocoderChain;
use crate::error::ApplicationError;
use crate::ports::RoutingPort;

/// Ordered list of routing providers with fall-through on failure
#[derive(Clone, Default)]
pub struct RouterChain {
    providers: Vec<Arc<dyn RoutingPort>>,
}

impl fmt::Debug for RouterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterChain")
            .field("providers", &self.providers())
            .finish()
    }
}

impl RouterChain {
    /// Create a chain from providers in priority order
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn RoutingPort>>) -> Self {
        Self { providers }
    }

    /// Providers in the order they are tried
    #[must_use]
    pub fn providers(&self) -> Vec<RoutingProvider> {
        self.providers.iter().map(|p| p.provider()).collect()
    }

    /// Whether no provider is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Driving route between two coordinates from the first provider that answers
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    pub async fn route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<DistanceResult, ApplicationError> {
        if self.providers.is_empty() {
            return Err(ApplicationError::RoutingFailed(
                "no routing provider configured".to_string(),
            ));
        }

        let mut failures = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let name = provider.provider();
            match provider.route(from, to).await {
                Ok(result) => {
                    debug!(
                        provider = %name,
                        distance_km = result.distance_km,
                        duration_min = result.duration_min,
                        "Route found"
                    );
                    return Ok(result);
                },
                Err(e) => {
                    warn!(provider = %name, error = %e, "Routing provider failed, trying next");
                    failures.push(format!("{name}: {e}"));
                },
            }
        }

        Err(ApplicationError::RoutingFailed(format!(
            "no provider returned a route ({})",
            failures.join("; ")
        )))
    }
}

/// Geocodes both endpoints, then routes between them
#[derive(Debug, Clone, Default)]
pub struct RouteService {
    geocoder: GeocoderChain,
    router: RouterChain,
}

impl RouteService {
    /// Create a route service from its two provider chains
    #[must_use]
    pub const fn new(geocoder: GeocoderChain, router: RouterChain) -> Self {
        Self { geocoder, router }
    }

    /// The geocoding chain used for endpoints
    #[must_use]
    pub const fn geocoder(&self) -> &GeocoderChain {
        &self.geocoder
    }

    /// The routing chain
    #[must_use]
    pub const fn router(&self) -> &RouterChain {
        &self.router
    }

    /// Road distance and duration between two place names
    ///
    /// A geocoding failure for either endpoint aborts with `RoutingFailed`
    /// before any routing provider is contacted.
    #[instrument(skip(self))]
    pub async fn distance(
        &self,
        source: &str,
        destination: &str,
    ) -> Result<DistanceResult, ApplicationError> {
        let from = self
            .geocoder
            .geocode(source)
            .await
            .map_err(|e| locate_failed("source", e))?;
        let to = self
            .geocoder
            .geocode(destination)
            .await
            .map_err(|e| locate_failed("destination", e))?;

        let result = self.router.route(&from.coordinate, &to.coordinate).await?;
        info!(
            source = %from.place,
            destination = %to.place,
            distance_km = result.distance_km,
            provider = %result.provider,
            "Distance computed"
        );
        Ok(result)
    }
}

fn locate_failed(endpoint: &str, error: ApplicationError) -> ApplicationError {
    match error {
        ApplicationError::Domain(e) => ApplicationError::Domain(e),
        other => ApplicationError::RoutingFailed(format!("could not locate {endpoint}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{GeocodingPort, MockGeocodingPort, MockRoutingPort};
    use domain::GeocodingProvider;

    fn geocoder(fail_on: Option<&'static str>) -> GeocoderChain {
        let mut mock = MockGeocodingPort::new();
        mock.expect_provider().return_const(GeocodingProvider::Nominatim);
        mock.expect_geocode().returning(move |place| {
            if Some(place) == fail_on {
                Err(ApplicationError::NotFound(format!("no match for {place}")))
            } else {
                Ok(Coordinate::new(77.0, 28.0).unwrap())
            }
        });
        let port: Arc<dyn GeocodingPort> = Arc::new(mock);
        GeocoderChain::new(vec![port])
    }

    fn router_ok(kind: RoutingProvider, km: f64) -> Arc<dyn RoutingPort> {
        let mut mock = MockRoutingPort::new();
        mock.expect_provider().return_const(kind);
        mock.expect_route().returning(move |_, _| {
            Ok(DistanceResult::from_meters_seconds(km * 1000.0, km * 60.0, kind).unwrap())
        });
        Arc::new(mock)
    }

    fn router_err(kind: RoutingProvider, times: usize) -> Arc<dyn RoutingPort> {
        let mut mock = MockRoutingPort::new();
        mock.expect_provider().return_const(kind);
        mock.expect_route()
            .times(times)
            .returning(|_, _| Err(ApplicationError::ExternalService("HTTP 503".to_string())));
        Arc::new(mock)
    }

    #[tokio::test]
    async fn primary_router_answers() {
        let service = RouteService::new(
            geocoder(None),
            RouterChain::new(vec![
                router_ok(RoutingProvider::Mappls, 280.0),
                router_err(RoutingProvider::Osrm, 0),
            ]),
        );

        let result = service.distance("Delhi", "Jaipur").await.unwrap();
        assert_eq!(result.provider, RoutingProvider::Mappls);
        assert!((result.distance_km - 280.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn falls_back_to_osrm() {
        let service = RouteService::new(
            geocoder(None),
            RouterChain::new(vec![
                router_err(RoutingProvider::Mappls, 1),
                router_ok(RoutingProvider::Osrm, 281.5),
            ]),
        );

        let result = service.distance("Delhi", "Jaipur").await.unwrap();
        assert_eq!(result.provider, RoutingProvider::Osrm);
    }

    #[tokio::test]
    async fn geocode_failure_aborts_before_routing() {
        let service = RouteService::new(
            geocoder(Some("Atlantis")),
            RouterChain::new(vec![router_err(RoutingProvider::Mappls, 0)]),
        );

        let err = service.distance("Delhi", "Atlantis").await.unwrap_err();
        let ApplicationError::RoutingFailed(message) = err else {
            panic!("expected RoutingFailed, got {err:?}");
        };
        assert!(message.contains("destination"));
    }

    #[tokio::test]
    async fn exhausted_routers_report_routing_failed() {
        let service = RouteService::new(
            geocoder(None),
            RouterChain::new(vec![
                router_err(RoutingProvider::Mappls, 1),
                router_err(RoutingProvider::Osrm, 1),
            ]),
        );

        let err = service.distance("Delhi", "Jaipur").await.unwrap_err();
        assert!(matches!(err, ApplicationError::RoutingFailed(_)));
        assert!(err.to_string().contains("osrm"));
    }

    #[tokio::test]
    async fn blank_endpoint_stays_a_validation_error() {
        let service = RouteService::new(geocoder(None), RouterChain::default());
        let err = service.distance("", "Jaipur").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }
}
