//! Geocoding service port
//!
//! Resolves a free-text place name to a single best-match coordinate.

use async_trait::async_trait;
use domain::{Coordinate, GeocodingProvider};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for one geocoding provider
///
/// An empty result set is an error, never a success, so that a provider
/// chain can fall through to the next source.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve a place name to its best-match coordinate
    async fn geocode(&self, place: &str) -> Result<Coordinate, ApplicationError>;

    /// Which provider this adapter talks to
    fn provider(&self) -> GeocodingProvider;
}
