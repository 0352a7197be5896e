//! Travel Advisor CLI
//!
//! Runs the travel tools and the trip planner from the command line and
//! prints JSON.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::{Context, bail};
use application::ToolCall;
use clap::{Parser, Subcommand};
use domain::{StartDate, TripPriority, TripRequest, TripType};
use infrastructure::{AppConfig, TravelServices, init_telemetry};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

/// Travel Advisor CLI
#[derive(Debug, Parser)]
#[command(name = "travel-advisor")]
#[command(author, version, about = "Route, time and fare estimates for Indian trips", long_about = None)]
struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, env = "TRAVEL_ADVISOR_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print compact single-line JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a place name to coordinates
    Geocode {
        /// City or place name
        place: String,
    },

    /// Road distance and driving time between two places
    Distance {
        source: String,
        destination: String,
    },

    /// Per-mode travel time for a distance
    Time {
        /// Distance in kilometres
        distance_km: f64,
    },

    /// Per-mode price for a distance
    ///
    /// Example: travel-advisor cost 280 --date 2026-11-20 --source Delhi --destination Jaipur
    Cost {
        /// Distance in kilometres
        distance_km: f64,

        /// Travel date (YYYY-MM-DD); anything else prices as today
        #[arg(short, long, default_value = "")]
        date: String,

        /// oneway or round
        #[arg(short, long, default_value = "oneway")]
        trip_type: TripType,

        /// Origin, enables live-fare lookup together with --destination
        #[arg(long, requires = "destination")]
        source: Option<String>,

        /// Destination, enables live-fare lookup together with --source
        #[arg(long, requires = "source")]
        destination: Option<String>,
    },

    /// Fares scraped from booking-site search results
    Fares {
        source: String,
        destination: String,

        /// Travel date (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        date: String,
    },

    /// Web search formatted as citations
    Search {
        /// Search query
        query: String,
    },

    /// Plan a whole trip and recommend a mode
    Plan {
        source: String,
        destination: String,

        /// Travel date (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        date: String,

        /// oneway or round
        #[arg(short, long, default_value = "oneway")]
        trip_type: TripType,

        /// Maximum spend in INR
        #[arg(short, long)]
        budget: Option<u64>,

        /// time or budget
        #[arg(short, long, default_value = "budget")]
        priority: TripPriority,
    },

    /// List the tools the agent can call
    Tools,
}

impl Commands {
    /// The tool call a command maps onto, if it is a plain tool invocation
    fn tool_call(&self) -> Option<ToolCall> {
        let call = match self {
            Self::Distance {
                source,
                destination,
            } => ToolCall::new(
                "get_distance",
                json!({"source": source, "destination": destination}),
            ),
            Self::Time { distance_km } => {
                ToolCall::new("estimate_time", json!({"distance_km": distance_km}))
            },
            Self::Cost {
                distance_km,
                date,
                trip_type,
                source,
                destination,
            } => ToolCall::new(
                "estimate_cost",
                json!({
                    "distance_km": distance_km,
                    "start_date": date,
                    "trip_type": trip_type.as_str(),
                    "source": source,
                    "destination": destination,
                }),
            ),
            Self::Fares {
                source,
                destination,
                date,
            } => ToolCall::new(
                "live_fares",
                json!({"source": source, "destination": destination, "start_date": date}),
            ),
            Self::Search { query } => ToolCall::new("web_search", json!({"query": query})),
            Self::Geocode { .. } | Self::Plan { .. } | Self::Tools => return None,
        };
        Some(call)
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{text}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    config.telemetry = config.telemetry.with_verbosity(cli.verbose);
    init_telemetry(&config.telemetry)?;
    config.validate().map_err(anyhow::Error::msg)?;
    debug!(command = ?cli.command, "Running command");

    let services = TravelServices::from_config(&config).await?;

    if let Some(call) = cli.command.tool_call() {
        let outcome = services.tools.invoke(call).await;
        if !outcome.success {
            bail!(outcome.output_text());
        }
        return match outcome.output {
            Value::String(text) => {
                println!("{text}");
                Ok(())
            },
            output => print_json(&output, cli.compact),
        };
    }

    match cli.command {
        Commands::Geocode { place } => {
            let resolved = services.routes.geocoder().geocode(&place).await?;
            print_json(&resolved, cli.compact)
        },
        Commands::Plan {
            source,
            destination,
            date,
            trip_type,
            budget,
            priority,
        } => {
            let request = TripRequest {
                source,
                destination,
                start_date: StartDate::new(date),
                trip_type,
                budget,
                priority,
            };
            let plan = services.planner.plan(request).await?;
            print_json(&plan, cli.compact)
        },
        Commands::Tools => print_json(&services.tools.descriptors(), cli.compact),
        _ => Ok(()),
    }
}
