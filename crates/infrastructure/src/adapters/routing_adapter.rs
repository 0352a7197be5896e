//! Routing adapter - Implements RoutingPort using integration_geo

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::RoutingPort;
use async_trait::async_trait;
use domain::{Coordinate, DistanceResult, RoutingProvider};
use integration_geo::{
    MapplsConfig, MapplsRoutingClient, OsrmConfig, OsrmRoutingClient, RoutingClient, RoutingError,
};
use tracing::{debug, instrument};

/// One routing provider exposed through the application port
pub struct RoutingAdapter {
    client: Arc<dyn RoutingClient>,
    provider: RoutingProvider,
}

impl std::fmt::Debug for RoutingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingAdapter")
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl RoutingAdapter {
    /// Wrap an arbitrary client under a provider label
    pub fn new(client: Arc<dyn RoutingClient>, provider: RoutingProvider) -> Self {
        Self { client, provider }
    }

    /// Mappls router with the given key
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client fails to
    /// initialize.
    pub fn mappls(config: &MapplsConfig, api_key: &str) -> Result<Self, ApplicationError> {
        let client = MapplsRoutingClient::new(config, api_key)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client), RoutingProvider::Mappls))
    }

    /// OSRM router
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn osrm(config: &OsrmConfig) -> Result<Self, ApplicationError> {
        let client =
            OsrmRoutingClient::new(config).map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client), RoutingProvider::Osrm))
    }

    /// Map integration routing error to application error
    fn map_error(err: RoutingError) -> ApplicationError {
        match err {
            RoutingError::NoRoute(reason) => ApplicationError::NotFound(format!("No route: {reason}")),
            RoutingError::RateLimitExceeded { retry_after_secs } => {
                debug!(retry_after = ?retry_after_secs, "Routing rate limited");
                ApplicationError::RateLimited
            },
            RoutingError::AuthenticationFailed(e) => {
                ApplicationError::Configuration(format!("Authentication failed: {e}"))
            },
            RoutingError::ConnectionFailed(e)
            | RoutingError::RequestFailed(e)
            | RoutingError::ParseError(e) => ApplicationError::ExternalService(e),
            RoutingError::Timeout { timeout_secs } => {
                ApplicationError::ExternalService(format!("Request timed out after {timeout_secs}s"))
            },
        }
    }
}

#[async_trait]
impl RoutingPort for RoutingAdapter {
    #[instrument(skip(self, from, to), fields(provider = %self.provider))]
    async fn route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<DistanceResult, ApplicationError> {
        let summary = self.client.route(from, to).await.map_err(Self::map_error)?;

        // A malformed upstream figure is a provider failure, not a caller error
        DistanceResult::from_meters_seconds(
            summary.distance_meters,
            summary.duration_seconds,
            self.provider,
        )
        .map_err(|e| ApplicationError::ExternalService(e.to_string()))
    }

    fn provider(&self) -> RoutingProvider {
        self.provider
    }
}

#[cfg(test)]
mod tests {
    use integration_geo::RouteSummary;

    use super::*;

    struct FixedClient(RouteSummary);

    #[async_trait]
    impl RoutingClient for FixedClient {
        async fn route(
            &self,
            _from: &Coordinate,
            _to: &Coordinate,
        ) -> Result<RouteSummary, RoutingError> {
            Ok(self.0)
        }
    }

    struct FailingClient;

    #[async_trait]
    impl RoutingClient for FailingClient {
        async fn route(
            &self,
            _from: &Coordinate,
            _to: &Coordinate,
        ) -> Result<RouteSummary, RoutingError> {
            Err(RoutingError::NoRoute("NoRoute".to_string()))
        }
    }

    fn endpoints() -> (Coordinate, Coordinate) {
        (
            Coordinate::new(73.8567, 18.5204).unwrap(),
            Coordinate::new(73.8278, 15.4909).unwrap(),
        )
    }

    #[tokio::test]
    async fn converts_meters_and_seconds() {
        let adapter = RoutingAdapter::new(
            Arc::new(FixedClient(RouteSummary {
                distance_meters: 450_000.0,
                duration_seconds: 30_600.0,
            })),
            RoutingProvider::Osrm,
        );
        let (from, to) = endpoints();
        let result = adapter.route(&from, &to).await.unwrap();

        assert!((result.distance_km - 450.0).abs() < 1e-9);
        assert!((result.duration_min - 510.0).abs() < 1e-9);
        assert_eq!(result.provider, RoutingProvider::Osrm);
    }

    #[tokio::test]
    async fn negative_upstream_distance_is_provider_failure() {
        let adapter = RoutingAdapter::new(
            Arc::new(FixedClient(RouteSummary {
                distance_meters: -1.0,
                duration_seconds: 10.0,
            })),
            RoutingProvider::Mappls,
        );
        let (from, to) = endpoints();
        assert!(matches!(
            adapter.route(&from, &to).await,
            Err(ApplicationError::ExternalService(_))
        ));
    }

    #[tokio::test]
    async fn no_route_maps_to_not_found() {
        let adapter = RoutingAdapter::new(Arc::new(FailingClient), RoutingProvider::Osrm);
        let (from, to) = endpoints();
        assert!(matches!(
            adapter.route(&from, &to).await,
            Err(ApplicationError::NotFound(_))
        ));
    }

    #[test]
    fn constructors_label_providers() {
        assert_eq!(
            RoutingAdapter::osrm(&OsrmConfig::for_testing()).unwrap().provider(),
            RoutingProvider::Osrm
        );
        assert_eq!(
            RoutingAdapter::mappls(&MapplsConfig::for_testing(), "k")
                .unwrap()
                .provider(),
            RoutingProvider::Mappls
        );
    }
}
