//! Door-to-door travel time per mode

use crate::entities::TimeEstimate;
use crate::errors::DomainError;
use crate::value_objects::{PerMode, TransportMode};

/// Fixed airport time added to every flight, in minutes
pub const FLIGHT_OVERHEAD_MIN: f64 = 50.0;

/// Average cruising speed in km/h
#[must_use]
pub const fn average_speed_kmh(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Bus => 42.0,
        TransportMode::Train => 60.0,
        TransportMode::Flight => 830.0,
    }
}

/// Minutes per mode for a road distance, rounded to one decimal
///
/// # Errors
///
/// Returns a validation error if the distance is negative or not finite.
pub fn estimate_time(distance_km: f64) -> Result<TimeEstimate, DomainError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(DomainError::validation(format!(
            "distance_km must be a non-negative number, got {distance_km}"
        )));
    }

    Ok(PerMode::from_fn(|mode| {
        let mut minutes = distance_km / average_speed_kmh(mode) * 60.0;
        if mode == TransportMode::Flight {
            minutes += FLIGHT_OVERHEAD_MIN;
        }
        round_tenth(minutes)
    }))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
