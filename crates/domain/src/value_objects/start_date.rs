//! Travel start date as typed by the user

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;


const INPUT_FORMAT: &str = "%Y-%m-%d";
const QUERY_FORMAT: &str = "%d %B %Y";

/// A start date that keeps the raw input next to its parsed form
///
/// The agent passes dates as free text. A malformed date is not fatal: the
/// demand model falls back to "today" and search queries reuse the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartDate {
    raw: String,
    parsed: Option<NaiveDate>,
}

impl StartDate {
    /// Wrap user input, parsing it as `YYYY-MM-DD` when possible
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = NaiveDate::parse_from_str(raw.trim(), INPUT_FORMAT).ok();
        Self { raw, parsed }
    }

    /// Build from an already valid date
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            raw: date.format(INPUT_FORMAT).to_string(),
            parsed: Some(date),
        }
    }

    /// The text exactly as supplied
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed date, if the input was well formed
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.parsed
    }

    /// The travel date, or `today` when the input could not be parsed
    #[must_use]
    pub fn travel_date_or(&self, today: NaiveDate) -> NaiveDate {
        self.parsed.unwrap_or(today)
    }

    /// Human-readable form for search queries, e.g. "05 March 2026"
    #[must_use]
    pub fn query_label(&self) -> String {
        self.parsed.map_or_else(
            || self.raw.clone(),
            |date| date.format(QUERY_FORMAT).to_string(),
        )
    }
}

impl fmt::Display for StartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for StartDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Serialize for StartDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for StartDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}
