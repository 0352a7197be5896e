//! Trip planning endpoint

use axum::{Json, extract::State};
use domain::{StartDate, TripPlan, TripPriority, TripRequest, TripType};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Trip planning request body
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlanTripRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub source: String,

    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub destination: String,

    /// Departure date, `YYYY-MM-DD` preferred; anything else prices as today
    #[validate(length(max = 64, message = "must be at most 64 characters"))]
    #[serde(default)]
    pub start_date: String,

    /// `oneway` or `round` (aliases accepted)
    #[serde(default)]
    pub trip_type: Option<String>,

    /// Maximum spend in INR
    #[validate(range(min = 1, message = "must be positive"))]
    #[serde(default)]
    pub budget: Option<u64>,

    /// `time` or `budget`
    #[serde(default)]
    pub priority: Option<String>,
}

impl TryFrom<PlanTripRequest> for TripRequest {
    type Error = ApiError;

    fn try_from(body: PlanTripRequest) -> Result<Self, Self::Error> {
        let trip_type = body
            .trip_type
            .as_deref()
            .map(str::parse::<TripType>)
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
            .unwrap_or_default();
        let priority = body
            .priority
            .as_deref()
            .map(str::parse::<TripPriority>)
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?
            .unwrap_or_default();

        Ok(Self {
            source: body.source,
            destination: body.destination,
            start_date: StartDate::new(body.start_date),
            trip_type,
            budget: body.budget,
            priority,
        })
    }
}

/// Plan a trip: route, per-mode time and cost, ranked against budget
#[instrument(skip(state, body), fields(source = %body.source, destination = %body.destination))]
pub async fn plan_trip(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<PlanTripRequest>,
) -> Result<Json<TripPlan>, ApiError> {
    let request = TripRequest::try_from(body)?;
    let plan = state.planner.plan(request).await?;
    Ok(Json(plan))
}
