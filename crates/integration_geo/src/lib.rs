//! Geocoding and road routing for Travel Advisor
//!
//! Two geocoders ([`MapplsGeocodingClient`], [`NominatimGeocodingClient`])
//! behind [`GeocodingClient`] and two routers ([`MapplsRoutingClient`],
//! [`OsrmRoutingClient`]) behind [`RoutingClient`]. Each client talks to a
//! single provider; ordering and fallback live in the application layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geo::{GeocodingClient, NominatimConfig, NominatimGeocodingClient};
//!
//! let client = NominatimGeocodingClient::new(&NominatimConfig::default())?;
//! let jaipur = client.geocode("Jaipur").await?;
//! ```

mod config;
mod error;
mod geocoding;
mod models;
mod routing;

pub use config::{GeoConfig, MapplsConfig, NominatimConfig, OsrmConfig};
pub use error::{GeocodingError, RoutingError};
pub use geocoding::{GeocodingClient, MapplsGeocodingClient, NominatimGeocodingClient};
pub use models::RouteSummary;
pub use routing::{MapplsRoutingClient, OsrmRoutingClient, RoutingClient, path_segment};
