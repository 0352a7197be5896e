//! Cost estimation use case: formula prices, optionally reconciled with live fares

use std::fmt;
use std::sync::Arc;

use domain::{
    CostEstimate, CostInputs, CostPolicy, LiveFares, StartDate, TripType, estimate_cost,
};
use serde::Serialize;
use tracing::{debug, instrument};

use super::fare_service::FareService;
use crate::error::ApplicationError;
use crate::ports::ClockPort;

/// A cost estimate together with the fares that shaped it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostQuote {
    /// Final per-mode price
    pub cost: CostEstimate,
    /// Scraped fares that overrode formula prices, if any
    pub live_fares: Option<LiveFares>,
}

impl CostQuote {
    /// Whether any scraped fare was applied
    #[must_use]
    pub fn used_live_fares(&self) -> bool {
        self.live_fares.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// Produces per-mode prices for a distance and travel date
#[derive(Clone)]
pub struct CostService {
    fares: FareService,
    clock: Arc<dyn ClockPort>,
    policy: CostPolicy,
}

impl fmt::Debug for CostService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostService")
            .field("fares", &self.fares)
            .field("today", &self.clock.today())
            .field("policy", &self.policy)
            .finish()
    }
}

impl CostService {
    /// Create a cost service
    #[must_use]
    pub fn new(fares: FareService, clock: Arc<dyn ClockPort>, policy: CostPolicy) -> Self {
        Self {
            fares,
            clock,
            policy,
        }
    }

    /// Live fare lookup used for enrichment
    #[must_use]
    pub const fn fares(&self) -> &FareService {
        &self.fares
    }

    /// Today's date according to the injected clock
    #[must_use]
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    /// Per-mode price, enriched with live fares when both endpoints are named
    pub async fn estimate(
        &self,
        distance_km: f64,
        start_date: &StartDate,
        trip_type: TripType,
        source: Option<&str>,
        destination: Option<&str>,
    ) -> Result<CostEstimate, ApplicationError> {
        self.quote(distance_km, start_date, trip_type, source, destination)
            .await
            .map(|quote| quote.cost)
    }

    /// Per-mode price plus the live fares that were applied
    ///
    /// The distance is validated before any search is issued. Fare lookup
    /// failures never surface; the formula price is used instead.
    #[instrument(skip(self, start_date, trip_type), fields(start_date = %start_date, trip_type = %trip_type))]
    pub async fn quote(
        &self,
        distance_km: f64,
        start_date: &StartDate,
        trip_type: TripType,
        source: Option<&str>,
        destination: Option<&str>,
    ) -> Result<CostQuote, ApplicationError> {
        let inputs = CostInputs {
            distance_km,
            start_date,
            trip_type,
            today: self.clock.today(),
            live_fares: None,
        };
        let formula = estimate_cost(&inputs, self.policy)?;

        let live_fares = match (non_blank(source), non_blank(destination)) {
            (Some(source), Some(destination)) => {
                self.fares.live_fares(source, destination, start_date).await
            },
            _ => None,
        };

        let cost = match &live_fares {
            Some(fares) => estimate_cost(
                &CostInputs {
                    live_fares: Some(fares),
                    ..inputs
                },
                self.policy,
            )?,
            None => formula,
        };

        debug!(bus = cost.bus, train = cost.train, flight = cost.flight, "Cost estimated");
        Ok(CostQuote { cost, live_fares })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, MockWebSearchPort};
    use crate::services::fare_service::FareSearchConfig;
    use chrono::NaiveDate;
    use domain::{PerMode, SearchResult, TransportMode};

    fn clock() -> Arc<dyn ClockPort> {
        // Thursday
        Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()))
    }

    fn service(search: Option<MockWebSearchPort>) -> CostService {
        let search = search.map(|s| Arc::new(s) as Arc<dyn crate::ports::WebSearchPort>);
        CostService::new(
            FareService::new(search, FareSearchConfig::default()),
            clock(),
            CostPolicy::default(),
        )
    }

    fn flight_only_search() -> MockWebSearchPort {
        let mut search = MockWebSearchPort::new();
        search.expect_get_results().returning(|query, _| {
            if query.starts_with("flight") {
                Ok(vec![SearchResult::new(
                    "Flights".to_string(),
                    "https://www.makemytrip.com/flights".to_string(),
                    "Fares from ₹4,650".to_string(),
                    "www.makemytrip.com".to_string(),
                    1,
                )])
            } else {
                Ok(Vec::new())
            }
        });
        search
    }

    #[tokio::test]
    async fn formula_only_without_endpoints() {
        let mut search = MockWebSearchPort::new();
        search.expect_get_results().never();

        let quote = service(Some(search))
            .quote(500.0, &StartDate::new("2026-02-04"), TripType::Oneway, None, None)
            .await
            .unwrap();

        assert_eq!(quote.cost, PerMode::new(1200, 700, 3000));
        assert!(!quote.used_live_fares());
    }

    #[tokio::test]
    async fn live_fare_overrides_one_mode() {
        let quote = service(Some(flight_only_search()))
            .quote(
                500.0,
                &StartDate::new("2026-02-04"),
                TripType::Oneway,
                Some("Delhi"),
                Some("Jaipur"),
            )
            .await
            .unwrap();

        assert_eq!(quote.cost, PerMode::new(1200, 700, 4650));
        assert!(quote.used_live_fares());
        assert_eq!(
            quote.live_fares.unwrap().get(TransportMode::Flight),
            Some(4650)
        );
    }

    #[tokio::test]
    async fn blank_endpoint_skips_enrichment() {
        let mut search = MockWebSearchPort::new();
        search.expect_get_results().never();

        let cost = service(Some(search))
            .estimate(500.0, &StartDate::new("2026-02-04"), TripType::Round, Some("Delhi"), Some(" "))
            .await
            .unwrap();

        assert_eq!(cost, PerMode::new(2400, 1400, 6000));
    }

    #[tokio::test]
    async fn invalid_distance_fails_before_search() {
        let mut search = MockWebSearchPort::new();
        search.expect_get_results().never();

        let err = service(Some(search))
            .estimate(-5.0, &StartDate::new("2026-02-04"), TripType::Oneway, Some("Delhi"), Some("Jaipur"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[tokio::test]
    async fn unparseable_date_prices_as_today() {
        let cost = service(None)
            .estimate(500.0, &StartDate::new("tomorrow-ish"), TripType::Oneway, None, None)
            .await
            .unwrap();

        assert_eq!(cost, PerMode::new(1500, 875, 3750));
    }
}
