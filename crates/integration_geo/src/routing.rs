//! Road routing clients (driving profile)
//!
//! Both Mappls and OSRM take the endpoints as a `lon,lat;lon,lat` path
//! segment and answer with `{code, routes: [{distance, duration}]}`.

use std::time::Duration;

use async_trait::async_trait;
use domain::Coordinate;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument};

use crate::config::{MapplsConfig, OsrmConfig};
use crate::error::RoutingError;
use crate::models::{RouteResponse, RouteSummary};

/// Trait for routing clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Driving route between two coordinates
    async fn route(&self, from: &Coordinate, to: &Coordinate)
    -> Result<RouteSummary, RoutingError>;
}

/// `lon,lat;lon,lat`
#[must_use]
pub fn path_segment(from: &Coordinate, to: &Coordinate) -> String {
    format!("{};{}", from.to_path_segment(), to.to_path_segment())
}

/// Strips the request URL, which holds the Mappls key
fn map_send_error(e: reqwest::Error, timeout_secs: u64) -> RoutingError {
    let e = e.without_url();
    if e.is_timeout() {
        RoutingError::Timeout { timeout_secs }
    } else if e.is_connect() {
        RoutingError::ConnectionFailed(e.to_string())
    } else {
        RoutingError::RequestFailed(e.to_string())
    }
}

async fn read_route(response: Response) -> Result<RouteSummary, RoutingError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        return Err(RoutingError::RateLimitExceeded { retry_after_secs });
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(RoutingError::AuthenticationFailed(format!("HTTP {status}")));
    }
    if !status.is_success() {
        return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
    }

    let body: RouteResponse = response
        .json()
        .await
        .map_err(|e| RoutingError::ParseError(e.without_url().to_string()))?;

    body.into_summary().map_err(RoutingError::NoRoute)
}

/// Mappls advanced-maps routing client
pub struct MapplsRoutingClient {
    client: Client,
    config: MapplsConfig,
    api_key: String,
}

impl std::fmt::Debug for MapplsRoutingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapplsRoutingClient")
            .field("config", &self.config)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl MapplsRoutingClient {
    /// Create a new Mappls routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be
    /// initialized.
    pub fn new(config: &MapplsConfig, api_key: impl Into<String>) -> Result<Self, RoutingError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(RoutingError::AuthenticationFailed(
                "Mappls API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    fn route_url(&self, from: &Coordinate, to: &Coordinate) -> String {
        format!(
            "{}/{}/route_adv/driving/{}",
            self.config.routing_base_url,
            self.api_key,
            path_segment(from, to)
        )
    }
}

#[async_trait]
impl RoutingClient for MapplsRoutingClient {
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    async fn route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<RouteSummary, RoutingError> {
        debug!("Routing via Mappls");

        let response = self
            .client
            .get(self.route_url(from, to))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout_secs))?;

        let summary = read_route(response).await?;
        debug!(
            distance_m = summary.distance_meters,
            duration_s = summary.duration_seconds,
            "Mappls route found"
        );
        Ok(summary)
    }
}

/// OSRM routing client
#[derive(Debug)]
pub struct OsrmRoutingClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmRoutingClient {
    /// Create a new OSRM routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl RoutingClient for OsrmRoutingClient {
    #[instrument(skip(self, from, to), fields(from = %from, to = %to))]
    async fn route(
        &self,
        from: &Coordinate,
        to: &Coordinate,
    ) -> Result<RouteSummary, RoutingError> {
        let url = format!(
            "{}/route/v1/driving/{}",
            self.config.base_url,
            path_segment(from, to)
        );
        debug!("Routing via OSRM");

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "false")])
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout_secs))?;

        let summary = read_route(response).await?;
        debug!(
            distance_m = summary.distance_meters,
            duration_s = summary.duration_seconds,
            "OSRM route found"
        );
        Ok(summary)
    }
}
