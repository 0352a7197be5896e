//! Tool surface exposed to the orchestrating agent
//!
//! Every call produces a [`ToolOutcome`]. Errors are turned into a failure
//! message the agent can read and recover from; nothing here propagates.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use domain::{
    DomainError, GeocodingProvider, RoutingProvider, StartDate, TripType, estimate_time,
};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::cost_service::CostService;
use super::routing_service::RouteService;
use crate::error::ApplicationError;
use crate::ports::WebSearchPort;

/// Results requested from the web search tool
const WEB_SEARCH_RESULTS: u32 = 5;

/// Tools the agent can call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TravelTool {
    /// Road distance between two places
    GetDistance,
    /// Per-mode price
    EstimateCost,
    /// Per-mode travel time
    EstimateTime,
    /// Scraped fares only
    LiveFares,
    /// Free-form disruption/event search
    WebSearch,
}

impl TravelTool {
    /// Every tool, in listing order
    pub const ALL: [Self; 5] = [
        Self::GetDistance,
        Self::EstimateCost,
        Self::EstimateTime,
        Self::LiveFares,
        Self::WebSearch,
    ];

    /// Name the agent calls the tool by
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GetDistance => "get_distance",
            Self::EstimateCost => "estimate_cost",
            Self::EstimateTime => "estimate_time",
            Self::LiveFares => "live_fares",
            Self::WebSearch => "web_search",
        }
    }

    /// Short label used in failure messages
    const fn label(&self) -> &'static str {
        match self {
            Self::GetDistance => "Distance",
            Self::EstimateCost => "Cost",
            Self::EstimateTime => "Time",
            Self::LiveFares => "Fare",
            Self::WebSearch => "Search",
        }
    }

    /// What the tool does, phrased for the agent
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::GetDistance => {
                "Get road distance (km) and driving duration (minutes) between two places. \
                 Legacy input: source,destination"
            },
            Self::EstimateCost => {
                "Estimate total travel cost in INR for bus, train and flight. Uses live \
                 fares when source and destination are given. Legacy input: \
                 distance_km[,start_date[,trip_type[,source,destination]]]"
            },
            Self::EstimateTime => {
                "Estimate travel time in minutes per mode. Legacy input: distance_km[,duration_min]"
            },
            Self::LiveFares => {
                "Look up current fares from booking sites. Returns null when none are found. \
                 Legacy input: source,destination,start_date"
            },
            Self::WebSearch => "Search the web for live travel disruptions or events.",
        }
    }

    /// Argument names; optional ones end in `?`
    #[must_use]
    pub const fn arguments(&self) -> &'static [&'static str] {
        match self {
            Self::GetDistance => &["source", "destination"],
            Self::EstimateCost => &[
                "distance_km",
                "start_date",
                "trip_type",
                "source?",
                "destination?",
            ],
            Self::EstimateTime => &["distance_km"],
            Self::LiveFares => &["source", "destination", "start_date"],
            Self::WebSearch => &["query"],
        }
    }
}

impl fmt::Display for TravelTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TravelTool {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .trim_end_matches("_tool")
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "getdistance" | "distance" => Ok(Self::GetDistance),
            "estimatecost" | "cost" => Ok(Self::EstimateCost),
            "estimatetime" | "time" => Ok(Self::EstimateTime),
            "livefares" | "fares" => Ok(Self::LiveFares),
            "websearch" | "search" => Ok(Self::WebSearch),
            _ => Err(ApplicationError::NotFound(format!("unknown tool '{}'", s.trim()))),
        }
    }
}

/// Tool listing entry
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    /// Tool name
    pub name: &'static str,
    /// What the tool does
    pub description: &'static str,
    /// Argument names
    pub arguments: &'static [&'static str],
}

/// A structured tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool name
    pub tool: String,
    /// Named arguments
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    /// Build a call from a tool name and JSON arguments
    pub fn new(tool: impl Into<String>, arguments: Value) -> Self {
        Self {
            tool: tool.into(),
            arguments,
        }
    }
}

/// Result of one tool invocation as the agent sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    /// Tool name
    pub tool: String,
    /// Whether the tool produced a result
    pub success: bool,
    /// JSON result, or the failure message as a string
    pub output: Value,
}

impl ToolOutcome {
    fn success(tool: TravelTool, output: Value) -> Self {
        Self {
            tool: tool.name().to_string(),
            success: true,
            output,
        }
    }

    fn failure(tool: TravelTool, error: &ApplicationError) -> Self {
        Self {
            tool: tool.name().to_string(),
            success: false,
            output: Value::String(format!("{} tool failed. Error: {error}", tool.label())),
        }
    }

    fn unknown(name: &str) -> Self {
        let available = TravelTool::ALL.map(|t| t.name()).join(", ");
        Self {
            tool: name.to_string(),
            success: false,
            output: Value::String(format!(
                "Unknown tool '{name}'. Available tools: {available}"
            )),
        }
    }

    /// Output as display text: strings verbatim, anything else as JSON
    #[must_use]
    pub fn output_text(&self) -> String {
        match &self.output {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// Which collaborators are wired up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Geocoding providers in fallback order
    pub geocoders: Vec<GeocodingProvider>,
    /// Routing providers in fallback order
    pub routers: Vec<RoutingProvider>,
    /// Search provider name, if search is configured
    pub web_search: Option<String>,
}

impl Capabilities {
    /// Whether distances can be computed at all
    #[must_use]
    pub fn can_route(&self) -> bool {
        !self.geocoders.is_empty() && !self.routers.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct DistanceArgs {
    source: String,
    destination: String,
}

#[derive(Debug, Deserialize)]
struct CostArgs {
    #[serde(deserialize_with = "number_or_string")]
    distance_km: f64,
    #[serde(default)]
    start_date: Option<StartDate>,
    #[serde(default)]
    trip_type: TripType,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    destination: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimeArgs {
    #[serde(deserialize_with = "number_or_string")]
    distance_km: f64,
}

#[derive(Debug, Deserialize)]
struct FareArgs {
    source: String,
    destination: String,
    start_date: StartDate,
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
}

/// Agents pass numbers both as JSON numbers and as strings
fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("'{text}' is not a number"))),
    }
}

fn parse_args<T: DeserializeOwned>(tool: TravelTool, arguments: Value) -> Result<T, ApplicationError> {
    serde_json::from_value(arguments).map_err(|e| {
        DomainError::validation(format!("invalid arguments for {tool}: {e}")).into()
    })
}

fn to_output<T: Serialize>(value: &T) -> Result<Value, ApplicationError> {
    serde_json::to_value(value)
        .map_err(|e| ApplicationError::Internal(format!("failed to serialize tool output: {e}")))
}

/// Turn legacy comma-separated input into named arguments
fn legacy_arguments(tool: TravelTool, input: &str) -> Result<Value, ApplicationError> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    let arguments = match (tool, parts.as_slice()) {
        (TravelTool::GetDistance, [source, destination]) => {
            json!({"source": source, "destination": destination})
        },
        (TravelTool::EstimateCost, [distance]) => json!({"distance_km": distance}),
        (TravelTool::EstimateCost, [distance, date]) => {
            json!({"distance_km": distance, "start_date": date})
        },
        (TravelTool::EstimateCost, [distance, date, trip_type]) => {
            json!({"distance_km": distance, "start_date": date, "trip_type": trip_type})
        },
        (TravelTool::EstimateCost, [distance, date, trip_type, source, destination]) => json!({
            "distance_km": distance,
            "start_date": date,
            "trip_type": trip_type,
            "source": source,
            "destination": destination,
        }),
        (TravelTool::EstimateTime, [distance] | [distance, _]) => json!({"distance_km": distance}),
        (TravelTool::LiveFares, [source, destination, date]) => {
            json!({"source": source, "destination": destination, "start_date": date})
        },
        (TravelTool::WebSearch, _) => json!({"query": input.trim()}),
        (tool, _) => {
            return Err(DomainError::validation(format!(
                "unexpected input '{input}' for {tool}, expected {}",
                tool.arguments().join(",")
            ))
            .into());
        },
    };
    Ok(arguments)
}

/// Dispatches agent tool calls onto the travel services
#[derive(Clone)]
pub struct TravelToolService {
    routes: Arc<RouteService>,
    costs: Arc<CostService>,
    search: Option<Arc<dyn WebSearchPort>>,
}

impl fmt::Debug for TravelToolService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TravelToolService")
            .field("routes", &self.routes)
            .field("costs", &self.costs)
            .field("search", &self.search.as_ref().map(|s| s.provider_name()))
            .finish()
    }
}

impl TravelToolService {
    /// Create the tool surface
    #[must_use]
    pub fn new(
        routes: Arc<RouteService>,
        costs: Arc<CostService>,
        search: Option<Arc<dyn WebSearchPort>>,
    ) -> Self {
        Self {
            routes,
            costs,
            search,
        }
    }

    /// Tool listing for the agent
    #[must_use]
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        TravelTool::ALL
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name(),
                description: tool.description(),
                arguments: tool.arguments(),
            })
            .collect()
    }

    /// Which providers and optional features are configured
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            geocoders: self.routes.geocoder().providers(),
            routers: self.routes.router().providers(),
            web_search: self
                .search
                .as_ref()
                .map(|s| s.provider_name().to_string()),
        }
    }

    /// Run a structured tool call
    #[instrument(skip(self, call), fields(tool = %call.tool))]
    pub async fn invoke(&self, call: ToolCall) -> ToolOutcome {
        let Ok(tool) = call.tool.parse::<TravelTool>() else {
            warn!("Unknown tool requested");
            return ToolOutcome::unknown(call.tool.trim());
        };
        let result = self.run(tool, call.arguments).await;
        Self::finish(tool, result)
    }

    /// Run a tool from the legacy comma-separated text interface
    #[instrument(skip(self))]
    pub async fn invoke_text(&self, tool: &str, input: &str) -> ToolOutcome {
        let Ok(parsed) = tool.parse::<TravelTool>() else {
            warn!("Unknown tool requested");
            return ToolOutcome::unknown(tool.trim());
        };
        let result = match legacy_arguments(parsed, input) {
            Ok(arguments) => self.run(parsed, arguments).await,
            Err(e) => Err(e),
        };
        Self::finish(parsed, result)
    }

    fn finish(tool: TravelTool, result: Result<Value, ApplicationError>) -> ToolOutcome {
        match result {
            Ok(output) => {
                info!(%tool, "Tool call succeeded");
                ToolOutcome::success(tool, output)
            },
            Err(e) => {
                warn!(%tool, error = %e, "Tool call failed");
                ToolOutcome::failure(tool, &e)
            },
        }
    }

    async fn run(&self, tool: TravelTool, arguments: Value) -> Result<Value, ApplicationError> {
        match tool {
            TravelTool::GetDistance => {
                let args: DistanceArgs = parse_args(tool, arguments)?;
                let result = self.routes.distance(&args.source, &args.destination).await?;
                to_output(&result)
            },
            TravelTool::EstimateCost => {
                let args: CostArgs = parse_args(tool, arguments)?;
                let start_date = args.start_date.unwrap_or_else(|| StartDate::new(""));
                let cost = self
                    .costs
                    .estimate(
                        args.distance_km,
                        &start_date,
                        args.trip_type,
                        args.source.as_deref(),
                        args.destination.as_deref(),
                    )
                    .await?;
                to_output(&cost)
            },
            TravelTool::EstimateTime => {
                let args: TimeArgs = parse_args(tool, arguments)?;
                to_output(&estimate_time(args.distance_km)?)
            },
            TravelTool::LiveFares => {
                let args: FareArgs = parse_args(tool, arguments)?;
                let fares = self
                    .costs
                    .fares()
                    .live_fares(&args.source, &args.destination, &args.start_date)
                    .await;
                to_output(&fares)
            },
            TravelTool::WebSearch => {
                let args: SearchArgs = parse_args(tool, arguments)?;
                let query = args.query.trim();
                if query.is_empty() {
                    return Err(DomainError::validation("query must not be empty").into());
                }
                let Some(search) = &self.search else {
                    return Err(ApplicationError::SearchUnavailable(
                        "web search is not configured".to_string(),
                    ));
                };
                let text = search.search_for_llm(query, WEB_SEARCH_RESULTS).await?;
                Ok(Value::String(text))
            },
        }
    }
}
