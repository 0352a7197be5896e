//! Trip request and the ranked plan built for it

use serde::{Deserialize, Serialize};

use super::estimates::{CostEstimate, TimeEstimate};
use super::route::DistanceResult;
use crate::errors::DomainError;
use crate::value_objects::{StartDate, TransportMode, TripPriority, TripType};

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Origin city or place
    pub source: String,
    /// Destination city or place
    pub destination: String,
    /// Departure date as typed
    pub start_date: StartDate,
    /// One-way or round trip
    #[serde(default)]
    pub trip_type: TripType,
    /// Maximum spend in INR for the whole trip
    #[serde(default)]
    pub budget: Option<u64>,
    /// Time or budget first
    #[serde(default)]
    pub priority: TripPriority,
}

impl TripRequest {
    /// Check that both endpoints are present and distinct
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.source.trim().is_empty() {
            return Err(DomainError::validation("source must not be empty"));
        }
        if self.destination.trim().is_empty() {
            return Err(DomainError::validation("destination must not be empty"));
        }
        if self.source.trim().eq_ignore_ascii_case(self.destination.trim()) {
            return Err(DomainError::validation(
                "source and destination must be different places",
            ));
        }
        Ok(())
    }
}

/// One mode as it compares against the request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelOption {
    /// Transport mode
    pub mode: TransportMode,
    /// Estimated minutes for one leg
    pub minutes: f64,
    /// Price for the whole trip (both legs on a round trip)
    pub cost: u64,
    /// Whether `cost` fits the budget; true when no budget was given
    pub within_budget: bool,
}

/// Structured answer for one trip request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Request echo
    pub request: TripRequest,
    /// Road distance used for every estimate
    pub distance: DistanceResult,
    /// Per-mode travel time
    pub time: TimeEstimate,
    /// Per-mode price
    pub cost: CostEstimate,
    /// Whether scraped fares replaced any formula price
    pub live_fares_used: bool,
    /// All modes in presentation order
    pub options: Vec<TravelOption>,
    /// Best option within budget for the chosen priority
    pub recommended: Option<TransportMode>,
}

impl TripPlan {
    /// Combine the estimates and rank the modes
    ///
    /// Only options within budget are eligible. `Time` picks the fastest and
    /// breaks ties on price; `Budget` picks the cheapest and breaks ties on
    /// time. No recommendation is made when nothing fits.
    #[must_use]
    pub fn assemble(
        request: TripRequest,
        distance: DistanceResult,
        time: TimeEstimate,
        cost: CostEstimate,
        live_fares_used: bool,
    ) -> Self {
        let options: Vec<TravelOption> = TransportMode::ALL
            .into_iter()
            .map(|mode| {
                let price = *cost.get(mode);
                TravelOption {
                    mode,
                    minutes: *time.get(mode),
                    cost: price,
                    within_budget: request.budget.is_none_or(|budget| price <= budget),
                }
            })
            .collect();

        let eligible = options.iter().filter(|o| o.within_budget);
        let recommended = match request.priority {
            TripPriority::Time => eligible
                .min_by(|a, b| a.minutes.total_cmp(&b.minutes).then(a.cost.cmp(&b.cost))),
            TripPriority::Budget => eligible
                .min_by(|a, b| a.cost.cmp(&b.cost).then(a.minutes.total_cmp(&b.minutes))),
        }
        .map(|o| o.mode);

        Self {
            request,
            distance,
            time,
            cost,
            live_fares_used,
            options,
            recommended,
        }
    }

    /// Look up the option for a mode
    #[must_use]
    pub fn option(&self, mode: TransportMode) -> Option<&TravelOption> {
        self.options.iter().find(|o| o.mode == mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RoutingProvider;
    use crate::value_objects::PerMode;

    fn request(budget: Option<u64>, priority: TripPriority) -> TripRequest {
        TripRequest {
            source: "Delhi".to_string(),
            destination: "Jaipur".to_string(),
            start_date: StartDate::new("2026-03-05"),
            trip_type: TripType::Oneway,
            budget,
            priority,
        }
    }

    fn plan(budget: Option<u64>, priority: TripPriority) -> TripPlan {
        let distance = DistanceResult {
            distance_km: 500.0,
            duration_min: 480.0,
            provider: RoutingProvider::Osrm,
        };
        TripPlan::assemble(
            request(budget, priority),
            distance,
            PerMode::new(714.3, 500.0, 86.1),
            PerMode::new(1200, 700, 3000),
            false,
        )
    }

    #[test]
    fn test_budget_priority_picks_cheapest() {
        assert_eq!(plan(None, TripPriority::Budget).recommended, Some(TransportMode::Train));
    }

    #[test]
    fn test_time_priority_picks_fastest() {
        assert_eq!(plan(None, TripPriority::Time).recommended, Some(TransportMode::Flight));
    }

    #[test]
    fn test_time_priority_respects_budget() {
        let plan = plan(Some(1500), TripPriority::Time);
        assert_eq!(plan.recommended, Some(TransportMode::Train));
        assert!(!plan.option(TransportMode::Flight).unwrap().within_budget);
        assert!(plan.option(TransportMode::Bus).unwrap().within_budget);
    }

    #[test]
    fn test_nothing_within_budget() {
        let plan = plan(Some(100), TripPriority::Budget);
        assert_eq!(plan.recommended, None);
        assert!(plan.options.iter().all(|o| !o.within_budget));
    }

    #[test]
    fn test_budget_boundary_is_inclusive() {
        let plan = plan(Some(700), TripPriority::Time);
        assert_eq!(plan.recommended, Some(TransportMode::Train));
    }

    #[test]
    fn test_budget_tie_broken_by_time() {
        let distance = DistanceResult {
            distance_km: 100.0,
            duration_min: 90.0,
            provider: RoutingProvider::Mappls,
        };
        let plan = TripPlan::assemble(
            request(None, TripPriority::Budget),
            distance,
            PerMode::new(142.9, 100.0, 57.2),
            PerMode::new(400, 400, 2500),
            false,
        );
        assert_eq!(plan.recommended, Some(TransportMode::Train));
    }

    #[test]
    fn test_validate() {
        assert!(request(None, TripPriority::Time).validate().is_ok());

        let mut blank = request(None, TripPriority::Time);
        blank.source = "  ".to_string();
        assert!(blank.validate().is_err());

        let mut same = request(None, TripPriority::Time);
        same.destination = "delhi".to_string();
        assert!(same.validate().is_err());
    }

    #[test]
    fn test_request_deserialization_defaults() {
        let json = r#"{"source":"Pune","destination":"Goa","start_date":"2026-05-01"}"#;
        let req: TripRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.trip_type, TripType::Oneway);
        assert_eq!(req.priority, TripPriority::Budget);
        assert_eq!(req.budget, None);
    }
}
