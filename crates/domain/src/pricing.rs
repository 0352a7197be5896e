//! Tiered fare model for bus, train and flight
//!
//! Prices are built in a fixed order: tiered base cost, demand multiplier,
//! live-fare override, per-km floor, rounding to whole rupees and finally
//! round-trip doubling. Rounding before doubling keeps a round trip at
//! exactly twice the one-way price.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::entities::{CostEstimate, LiveFares};
use crate::errors::DomainError;
use crate::value_objects::{PerMode, StartDate, TransportMode, TripType};

/// Booking inside this many days pays the near-term surcharge
const NEAR_TERM_DAYS: i64 = 7;
/// Booking inside this many days pays the mid-term surcharge
const MID_TERM_DAYS: i64 = 15;
const NEAR_TERM_SURCHARGE: f64 = 0.25;
const MID_TERM_SURCHARGE: f64 = 0.15;
const WEEKEND_SURCHARGE: f64 = 0.10;

/// Tiered per-km rate for bus travel
#[must_use]
pub fn bus_rate(distance_km: f64) -> f64 {
    if distance_km <= 400.0 {
        2.8
    } else if distance_km <= 800.0 {
        2.4
    } else {
        2.1
    }
}

/// Tiered per-km rate for train travel
///
/// Long routes are priced higher because they are usually booked in AC class.
#[must_use]
pub fn train_rate(distance_km: f64) -> f64 {
    if distance_km <= 400.0 {
        1.6
    } else if distance_km <= 800.0 {
        1.4
    } else {
        1.8
    }
}

/// Per-km rate and minimum base fare for flights
#[must_use]
pub fn flight_rate(distance_km: f64) -> (f64, f64) {
    if distance_km <= 600.0 {
        (6.0, 2500.0)
    } else if distance_km <= 1200.0 {
        (5.2, 3500.0)
    } else {
        (4.8, 4500.0)
    }
}

/// Minimum price per km, enforced after every other adjustment
#[must_use]
pub const fn floor_rate(mode: TransportMode) -> f64 {
    match mode {
        TransportMode::Bus => 1.8,
        TransportMode::Train => 1.0,
        TransportMode::Flight => 3.5,
    }
}

/// One-way formula price before demand adjustment
#[must_use]
pub fn base_cost(distance_km: f64) -> PerMode<f64> {
    let (rate, base_fare) = flight_rate(distance_km);
    PerMode::new(
        distance_km * bus_rate(distance_km),
        distance_km * train_rate(distance_km),
        base_fare.max(distance_km * rate),
    )
}

/// Date-driven price inflation
///
/// Starts at 1.0, adds 0.25 for travel within a week (including dates in
/// the past), otherwise 0.15 within two weeks, and a further 0.10 when the
/// travel date falls on a Saturday or Sunday.
#[must_use]
pub fn demand_multiplier(travel: NaiveDate, today: NaiveDate) -> f64 {
    let days_until = (travel - today).num_days();

    let mut multiplier = 1.0;
    if days_until < NEAR_TERM_DAYS {
        multiplier += NEAR_TERM_SURCHARGE;
    } else if days_until < MID_TERM_DAYS {
        multiplier += MID_TERM_SURCHARGE;
    }
    if matches!(travel.weekday(), Weekday::Sat | Weekday::Sun) {
        multiplier += WEEKEND_SURCHARGE;
    }
    multiplier
}

/// Knobs that are a business decision rather than part of the formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostPolicy {
    /// Double a scraped fare on a round trip like any formula price
    ///
    /// When off, the scraped figure is taken as already covering both legs
    /// and only the doubled floor is enforced.
    pub double_live_fares_on_round_trip: bool,
}

impl Default for CostPolicy {
    fn default() -> Self {
        Self {
            double_live_fares_on_round_trip: true,
        }
    }
}

/// Everything the cost model needs for one estimate
#[derive(Debug, Clone, Copy)]
pub struct CostInputs<'a> {
    /// Road distance in km
    pub distance_km: f64,
    /// Departure date as typed by the user
    pub start_date: &'a StartDate,
    /// One-way or round trip
    pub trip_type: TripType,
    /// Reference date for the booking window
    pub today: NaiveDate,
    /// Scraped fares that override the formula price per mode
    pub live_fares: Option<&'a LiveFares>,
}

/// Final per-mode price in whole rupees
///
/// # Errors
///
/// Returns a validation error if the distance is negative or not finite.
pub fn estimate_cost(inputs: &CostInputs<'_>, policy: CostPolicy) -> Result<CostEstimate, DomainError> {
    let distance_km = inputs.distance_km;
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(DomainError::validation(format!(
            "distance_km must be a non-negative number, got {distance_km}"
        )));
    }

    let travel = inputs.start_date.travel_date_or(inputs.today);
    let multiplier = demand_multiplier(travel, inputs.today);
    let base = base_cost(distance_km);

    Ok(PerMode::from_fn(|mode| {
        let floor = distance_km * floor_rate(mode);
        let live_fare = inputs.live_fares.and_then(|fares| fares.get(mode));

        let price = live_fare.map_or(*base.get(mode) * multiplier, to_price);
        let one_way = round_with_floor(price.max(floor), floor);

        match (inputs.trip_type, live_fare) {
            (TripType::Oneway, _) => one_way,
            (TripType::Round, Some(_)) if !policy.double_live_fares_on_round_trip => {
                one_way.max(ceil_price(2.0 * floor))
            }
            (TripType::Round, _) => one_way * 2,
        }
    }))
}

/// Nearest whole rupee, bumped up to the floor when rounding would cross it
fn round_with_floor(price: f64, floor: f64) -> u64 {
    let rounded = to_rupees(price.round());
    if to_price(rounded) < floor {
        ceil_price(floor)
    } else {
        rounded
    }
}

fn ceil_price(value: f64) -> u64 {
    to_rupees(value.ceil())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_rupees(value: f64) -> u64 {
    value.max(0.0) as u64
}

#[allow(clippy::cast_precision_loss)]
fn to_price(rupees: u64) -> f64 {
    rupees as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Thursday
    fn today() -> NaiveDate {
        ymd(2026, 1, 1)
    }

    // Wednesday, 34 days after today()
    fn far_weekday() -> StartDate {
        StartDate::new("2026-02-04")
    }

    fn estimate(distance_km: f64, start: &StartDate, trip_type: TripType) -> CostEstimate {
        let inputs = CostInputs {
            distance_km,
            start_date: start,
            trip_type,
            today: today(),
            live_fares: None,
        };
        estimate_cost(&inputs, CostPolicy::default()).unwrap()
    }

    #[test]
    fn test_500km_reference_prices() {
        let cost = estimate(500.0, &far_weekday(), TripType::Oneway);
        assert_eq!(cost, PerMode::new(1200, 700, 3000));
    }

    #[test]
    fn test_zero_distance_flight_is_base_fare() {
        let cost = estimate(0.0, &far_weekday(), TripType::Oneway);
        assert_eq!(cost.flight, 2500);
        assert_eq!(cost.bus, 0);
        assert_eq!(cost.train, 0);
    }

    #[test]
    fn test_round_trip_doubles() {
        let start = far_weekday();
        let one_way = estimate(733.0, &start, TripType::Oneway);
        let round = estimate(733.0, &start, TripType::Round);
        assert_eq!(round, one_way.map(|_, v| v * 2));
    }

    #[test]
    fn test_bracket_boundaries_are_inclusive_on_lower_side() {
        assert!((bus_rate(400.0) - 2.8).abs() < f64::EPSILON);
        assert!((bus_rate(400.1) - 2.4).abs() < f64::EPSILON);
        assert!((bus_rate(800.0) - 2.4).abs() < f64::EPSILON);
        assert!((bus_rate(800.1) - 2.1).abs() < f64::EPSILON);

        assert!((train_rate(400.0) - 1.6).abs() < f64::EPSILON);
        assert!((train_rate(800.0) - 1.4).abs() < f64::EPSILON);
        assert!((train_rate(801.0) - 1.8).abs() < f64::EPSILON);

        assert_eq!(flight_rate(600.0), (6.0, 2500.0));
        assert_eq!(flight_rate(601.0), (5.2, 3500.0));
        assert_eq!(flight_rate(1200.0), (5.2, 3500.0));
        assert_eq!(flight_rate(1201.0), (4.8, 4500.0));
    }

    #[test]
    fn test_boundary_prices() {
        let start = far_weekday();
        assert_eq!(estimate(400.0, &start, TripType::Oneway).bus, 1120);
        assert_eq!(estimate(800.0, &start, TripType::Oneway).train, 1120);
        assert_eq!(estimate(600.0, &start, TripType::Oneway).flight, 3600);
        assert_eq!(estimate(1200.0, &start, TripType::Oneway).flight, 6240);
    }

    #[test]
    fn test_multiplier_neutral() {
        assert!((demand_multiplier(ymd(2026, 2, 4), today()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_near_term() {
        // Friday, 1 day out
        assert!((demand_multiplier(ymd(2026, 1, 2), today()) - 1.25).abs() < 1e-9);
        // same day
        assert!((demand_multiplier(today(), today()) - 1.25).abs() < 1e-9);
        // past date
        assert!((demand_multiplier(ymd(2025, 12, 30), today()) - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_mid_term() {
        // Thursday, exactly 7 days out
        assert!((demand_multiplier(ymd(2026, 1, 8), today()) - 1.15).abs() < 1e-9);
        // Thursday, 14 days out
        assert!((demand_multiplier(ymd(2026, 1, 15), today()) - 1.15).abs() < 1e-9);
        // Friday, 15 days out
        assert!((demand_multiplier(ymd(2026, 1, 16), today()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_multiplier_weekend() {
        // Saturday, 3 days out
        assert!((demand_multiplier(ymd(2026, 1, 3), today()) - 1.35).abs() < 1e-9);
        // Saturday, 9 days out
        assert!((demand_multiplier(ymd(2026, 1, 10), today()) - 1.25).abs() < 1e-9);
        // Sunday, 31 days out
        assert!((demand_multiplier(ymd(2026, 2, 1), today()) - 1.10).abs() < 1e-9);
    }

    #[test]
    fn test_unparseable_date_uses_today() {
        let cost = estimate(500.0, &StartDate::new("whenever"), TripType::Oneway);
        // today() is a Thursday, so only the near-term surcharge applies
        assert_eq!(cost, PerMode::new(1500, 875, 3750));
    }

    #[test]
    fn test_live_fare_overrides_formula() {
        let fares: LiveFares = [(TransportMode::Flight, 4650)].into_iter().collect();
        let start = far_weekday();
        let inputs = CostInputs {
            distance_km: 500.0,
            start_date: &start,
            trip_type: TripType::Oneway,
            today: today(),
            live_fares: Some(&fares),
        };
        let cost = estimate_cost(&inputs, CostPolicy::default()).unwrap();
        assert_eq!(cost, PerMode::new(1200, 700, 4650));
    }

    #[test]
    fn test_live_fare_below_floor_is_raised() {
        let fares: LiveFares = [(TransportMode::Bus, 400)].into_iter().collect();
        let start = far_weekday();
        let inputs = CostInputs {
            distance_km: 500.0,
            start_date: &start,
            trip_type: TripType::Oneway,
            today: today(),
            live_fares: Some(&fares),
        };
        let cost = estimate_cost(&inputs, CostPolicy::default()).unwrap();
        assert_eq!(cost.bus, 900);
    }

    #[test]
    fn test_live_fare_round_trip_policy() {
        let fares: LiveFares = [(TransportMode::Train, 1200)].into_iter().collect();
        let start = far_weekday();
        let inputs = CostInputs {
            distance_km: 500.0,
            start_date: &start,
            trip_type: TripType::Round,
            today: today(),
            live_fares: Some(&fares),
        };

        let doubled = estimate_cost(&inputs, CostPolicy::default()).unwrap();
        assert_eq!(doubled.train, 2400);

        let policy = CostPolicy {
            double_live_fares_on_round_trip: false,
        };
        let single = estimate_cost(&inputs, policy).unwrap();
        assert_eq!(single.train, 1200);
        assert_eq!(single.bus, 2400);

        let cheap: LiveFares = [(TransportMode::Train, 600)].into_iter().collect();
        let inputs = CostInputs {
            live_fares: Some(&cheap),
            ..inputs
        };
        // doubled floor is 2 * 500 * 1.0
        assert_eq!(estimate_cost(&inputs, policy).unwrap().train, 1000);
    }

    #[test]
    fn test_floor_rounds_up() {
        // 0.3 km train: formula 0.48, floor 0.3, nearest rupee 0 would break the floor
        let cost = estimate(0.3, &far_weekday(), TripType::Oneway);
        assert_eq!(cost.train, 1);
    }

    #[test]
    fn test_rejects_bad_distance() {
        let start = far_weekday();
        for distance_km in [-1.0, f64::NAN, f64::INFINITY] {
            let inputs = CostInputs {
                distance_km,
                start_date: &start,
                trip_type: TripType::Oneway,
                today: today(),
                live_fares: None,
            };
            assert!(estimate_cost(&inputs, CostPolicy::default()).is_err());
        }
    }
}
