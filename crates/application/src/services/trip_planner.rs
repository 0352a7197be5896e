//! Plans one trip end to end: route, time, cost, then ranking

use std::sync::Arc;

use domain::{TripPlan, TripRequest, estimate_time};
use tracing::{info, instrument};

use super::cost_service::CostService;
use super::routing_service::RouteService;
use crate::error::ApplicationError;

/// Runs the serial route → time → cost chain for a trip request
#[derive(Debug, Clone)]
pub struct TripPlanner {
    routes: Arc<RouteService>,
    costs: Arc<CostService>,
}

impl TripPlanner {
    /// Create a planner over the shared route and cost services
    #[must_use]
    pub const fn new(routes: Arc<RouteService>, costs: Arc<CostService>) -> Self {
        Self { routes, costs }
    }

    /// Build a ranked plan for the request
    #[instrument(skip(self, request), fields(source = %request.source, destination = %request.destination))]
    pub async fn plan(&self, request: TripRequest) -> Result<TripPlan, ApplicationError> {
        request.validate()?;

        let distance = self
            .routes
            .distance(&request.source, &request.destination)
            .await?;
        let time = estimate_time(distance.distance_km)?;
        let quote = self
            .costs
            .quote(
                distance.distance_km,
                &request.start_date,
                request.trip_type,
                Some(request.source.as_str()),
                Some(request.destination.as_str()),
            )
            .await?;

        let live_fares_used = quote.used_live_fares();
        let plan = TripPlan::assemble(request, distance, time, quote.cost, live_fares_used);
        info!(
            distance_km = plan.distance.distance_km,
            recommended = ?plan.recommended,
            live_fares_used,
            "Trip planned"
        );
        Ok(plan)
    }
}
