//! Routing results and provider identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Service that resolved a place name to coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeocodingProvider {
    /// MapmyIndia Mappls geocode API (keyed)
    Mappls,
    /// OpenStreetMap Nominatim (free)
    Nominatim,
}

impl fmt::Display for GeocodingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mappls => write!(f, "mappls"),
            Self::Nominatim => write!(f, "nominatim"),
        }
    }
}

/// Service that computed a road route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingProvider {
    /// MapmyIndia Mappls route_adv API (keyed)
    Mappls,
    /// Public OSRM server (free)
    Osrm,
}

impl fmt::Display for RoutingProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mappls => write!(f, "mappls"),
            Self::Osrm => write!(f, "osrm"),
        }
    }
}

/// Road distance and driving duration between two places
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Road distance in kilometres
    pub distance_km: f64,
    /// Driving duration in minutes
    pub duration_min: f64,
    /// Provider that answered
    pub provider: RoutingProvider,
}

impl DistanceResult {
    /// Build from the raw units routing APIs return
    ///
    /// # Errors
    ///
    /// Returns a validation error for negative or non-finite values.
    pub fn from_meters_seconds(
        meters: f64,
        seconds: f64,
        provider: RoutingProvider,
    ) -> Result<Self, DomainError> {
        if !meters.is_finite() || meters < 0.0 {
            return Err(DomainError::validation(format!(
                "route distance must be a non-negative number, got {meters}"
            )));
        }
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(DomainError::validation(format!(
                "route duration must be a non-negative number, got {seconds}"
            )));
        }
        Ok(Self {
            distance_km: meters / 1000.0,
            duration_min: seconds / 60.0,
            provider,
        })
    }
}
