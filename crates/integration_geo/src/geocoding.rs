//! Geocoding clients
//!
//! [`MapplsGeocodingClient`] talks to the keyed Mappls Atlas API,
//! [`NominatimGeocodingClient`] to the free OpenStreetMap Nominatim API.
//! Nominatim requests are spaced out to honour its 1 request/second policy.

use std::time::Duration;

use async_trait::async_trait;
use domain::Coordinate;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::config::{MapplsConfig, NominatimConfig};
use crate::error::GeocodingError;
use crate::models::Degrees;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Convert a free-form place name to coordinates
    async fn geocode(&self, place: &str) -> Result<Coordinate, GeocodingError>;
}

mod api {
    use super::{Degrees, Deserialize};

    #[derive(Debug, Deserialize)]
    pub struct NominatimResult {
        pub lat: Degrees,
        pub lon: Degrees,
        #[serde(default)]
        pub display_name: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct MapplsGeocodeResponse {
        #[serde(rename = "copResults", default)]
        pub cop_results: Option<CopResults>,
    }

    /// Mappls sends a single object for a precise match and a list otherwise
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    pub enum CopResults {
        One(MapplsPlace),
        Many(Vec<MapplsPlace>),
    }

    #[derive(Debug, Deserialize)]
    pub struct MapplsPlace {
        #[serde(default)]
        pub latitude: Option<Degrees>,
        #[serde(default)]
        pub longitude: Option<Degrees>,
        #[serde(rename = "formattedAddress", default)]
        pub formatted_address: Option<String>,
    }

    impl CopResults {
        pub fn first(self) -> Option<MapplsPlace> {
            match self {
                Self::One(place) => Some(place),
                Self::Many(places) => places.into_iter().next(),
            }
        }
    }
}

fn validated_place(place: &str) -> Result<&str, GeocodingError> {
    let place = place.trim();
    if place.is_empty() {
        return Err(GeocodingError::AddressNotFound(
            "Place name must not be empty".to_string(),
        ));
    }
    Ok(place)
}

/// Strips the request URL, which holds the Mappls key
fn map_send_error(e: reqwest::Error, timeout_secs: u64) -> GeocodingError {
    let e = e.without_url();
    if e.is_timeout() {
        GeocodingError::Timeout { timeout_secs }
    } else if e.is_connect() {
        GeocodingError::ConnectionFailed(e.to_string())
    } else {
        GeocodingError::RequestFailed(e.to_string())
    }
}

fn check_status(response: &Response) -> Result<(), GeocodingError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        return Err(GeocodingError::RateLimitExceeded { retry_after_secs });
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(GeocodingError::AuthenticationFailed(format!("HTTP {status}")));
    }
    if !status.is_success() {
        return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
    }
    Ok(())
}

fn to_coordinate(
    lat: Option<&Degrees>,
    lon: Option<&Degrees>,
    place: &str,
) -> Result<Coordinate, GeocodingError> {
    let lat = lat
        .and_then(Degrees::value)
        .ok_or_else(|| GeocodingError::ParseError(format!("Invalid latitude for {place}")))?;
    let lon = lon
        .and_then(Degrees::value)
        .ok_or_else(|| GeocodingError::ParseError(format!("Invalid longitude for {place}")))?;
    Coordinate::new(lon, lat).map_err(|e| GeocodingError::ParseError(e.to_string()))
}

/// Nominatim-based geocoding client with request spacing
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            last_request: Mutex::new(None),
        })
    }

    /// Wait until the minimum interval since the previous request has passed
    async fn rate_limit(&self) {
        let interval = Duration::from_millis(self.config.min_request_interval_ms);
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                let wait = interval.saturating_sub(elapsed);
                debug!(?wait, "Rate limiting geocoding request");
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<Coordinate, GeocodingError> {
        let place = validated_place(place)?;

        self.rate_limit().await;

        let url = format!("{}/search", self.config.base_url);
        let mut params = vec![
            ("q", place.to_string()),
            ("format", "json".to_string()),
            ("limit", "1".to_string()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%place, "Geocoding via Nominatim");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout_secs))?;

        check_status(&response)?;

        let results: Vec<api::NominatimResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.without_url().to_string()))?;

        let result = results
            .first()
            .ok_or_else(|| GeocodingError::AddressNotFound(place.to_string()))?;

        let coordinate = to_coordinate(Some(&result.lat), Some(&result.lon), place)?;
        debug!(
            %place,
            %coordinate,
            display_name = result.display_name.as_deref().unwrap_or_default(),
            "Geocoded place"
        );
        Ok(coordinate)
    }
}

/// Mappls Atlas geocoding client
pub struct MapplsGeocodingClient {
    client: Client,
    config: MapplsConfig,
    api_key: String,
}

impl std::fmt::Debug for MapplsGeocodingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapplsGeocodingClient")
            .field("config", &self.config)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl MapplsGeocodingClient {
    /// Create a new Mappls geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be
    /// initialized.
    pub fn new(config: &MapplsConfig, api_key: impl Into<String>) -> Result<Self, GeocodingError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeocodingError::AuthenticationFailed(
                "Mappls API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl GeocodingClient for MapplsGeocodingClient {
    #[instrument(skip(self))]
    async fn geocode(&self, place: &str) -> Result<Coordinate, GeocodingError> {
        let place = validated_place(place)?;

        let url = format!("{}/api/places/geocode", self.config.geocode_base_url);
        debug!(%place, "Geocoding via Mappls");

        let response = self
            .client
            .get(&url)
            .query(&[("address", place)])
            .header("Authorization", format!("bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| map_send_error(e, self.config.timeout_secs))?;

        check_status(&response)?;

        let body: api::MapplsGeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.without_url().to_string()))?;

        let result = body
            .cop_results
            .and_then(api::CopResults::first)
            .ok_or_else(|| GeocodingError::AddressNotFound(place.to_string()))?;

        let coordinate = to_coordinate(result.latitude.as_ref(), result.longitude.as_ref(), place)?;
        debug!(
            %place,
            %coordinate,
            address = result.formatted_address.as_deref().unwrap_or_default(),
            "Geocoded place"
        );
        Ok(coordinate)
    }
}
