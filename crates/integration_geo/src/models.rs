//! Wire models shared by the geocoding and routing clients

use serde::{Deserialize, Serialize};

/// Raw result of a road route query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Route length in meters
    pub distance_meters: f64,
    /// Driving time in seconds
    pub duration_seconds: f64,
}

/// A latitude or longitude that some providers send as a JSON string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    pub(crate) fn value(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// `{code, routes: [{distance, duration}]}` as returned by OSRM and Mappls
#[derive(Debug, Deserialize)]
pub(crate) struct RouteResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub routes: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteLeg {
    pub distance: f64,
    pub duration: f64,
}

impl RouteResponse {
    /// First route when the service reports success, otherwise the reason
    pub(crate) fn into_summary(self) -> Result<RouteSummary, String> {
        if let Some(code) = self
            .code
            .as_deref()
            .filter(|code| !code.eq_ignore_ascii_case("ok"))
        {
            return Err(format!("service answered with code {code}"));
        }

        self.routes
            .into_iter()
            .next()
            .map(|leg| RouteSummary {
                distance_meters: leg.distance,
                duration_seconds: leg.duration,
            })
            .ok_or_else(|| "response contained no routes".to_string())
    }
}
