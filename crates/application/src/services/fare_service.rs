//! Live fare scraping from booking-site search snippets
//!
//! Best effort only: a mode whose search fails or yields no plausible price
//! is left out, and the whole lookup degrades to `None` rather than failing.

use std::fmt;
use std::sync::{Arc, LazyLock};

use domain::{LiveFares, StartDate, TransportMode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::ports::WebSearchPort;

/// Modes are searched in this order
const FARE_QUERY_ORDER: [TransportMode; 3] =
    [TransportMode::Flight, TransportMode::Train, TransportMode::Bus];

/// Currency marker followed by an amount, e.g. "₹4500", "Rs. 4,800", "INR 1,20,000"
static PRICE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:₹|\brs\.?|\binr)\s*(\d{1,3}(?:,\d{2,3})+|\d+)").ok()
});

/// Tuning for fare searches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareSearchConfig {
    /// Booking sites the search is restricted to
    #[serde(default = "default_sites")]
    pub sites: Vec<String>,

    /// Snippets read per mode
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Smallest believable fare in INR
    #[serde(default = "default_min_fare")]
    pub min_fare: u64,

    /// Largest believable fare in INR
    #[serde(default = "default_max_fare")]
    pub max_fare: u64,
}

fn default_sites() -> Vec<String> {
    [
        "makemytrip.com",
        "goibibo.com",
        "ixigo.com",
        "cleartrip.com",
        "redbus.in",
        "irctc.co.in",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Upper bound on snippets read per mode
const MAX_FARE_SNIPPETS: u32 = 5;

const fn default_max_results() -> u32 {
    MAX_FARE_SNIPPETS
}

const fn default_min_fare() -> u64 {
    300
}

const fn default_max_fare() -> u64 {
    50_000
}

impl Default for FareSearchConfig {
    fn default() -> Self {
        Self {
            sites: default_sites(),
            max_results: default_max_results(),
            min_fare: default_min_fare(),
            max_fare: default_max_fare(),
        }
    }
}

impl FareSearchConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_results == 0 || self.max_results > MAX_FARE_SNIPPETS {
            return Err(format!(
                "fares.max_results must be between 1 and {MAX_FARE_SNIPPETS}, got {}",
                self.max_results
            ));
        }
        if self.min_fare > self.max_fare {
            return Err(format!(
                "fares.min_fare ({}) must not exceed fares.max_fare ({})",
                self.min_fare, self.max_fare
            ));
        }
        if self.sites.iter().any(|site| site.trim().is_empty()) {
            return Err("fares.sites must not contain blank entries".to_string());
        }
        Ok(())
    }
}

/// All currency-prefixed amounts in a piece of text, in order of appearance
#[must_use]
pub fn extract_prices(text: &str) -> Vec<u64> {
    let Some(pattern) = PRICE_PATTERN.as_ref() else {
        return Vec::new();
    };
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().replace(',', "").parse().ok())
        .collect()
}

/// Median of the values, averaging the middle pair for even counts
#[must_use]
pub fn median(values: &[u64]) -> Option<u64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        // round half up
        Some((sorted[mid - 1] + sorted[mid]).div_ceil(2))
    }
}

/// Looks up current fares through a web search provider
#[derive(Clone, Default)]
pub struct FareService {
    search: Option<Arc<dyn WebSearchPort>>,
    config: FareSearchConfig,
}

impl fmt::Debug for FareService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FareService")
            .field("search", &self.search.as_ref().map(|s| s.provider_name()))
            .field("config", &self.config)
            .finish()
    }
}

impl FareService {
    /// Create a fare service; `None` disables live fares entirely
    #[must_use]
    pub fn new(search: Option<Arc<dyn WebSearchPort>>, config: FareSearchConfig) -> Self {
        Self { search, config }
    }

    /// Whether a search provider is configured
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.search.is_some()
    }

    /// The search provider, if configured
    #[must_use]
    pub fn search_port(&self) -> Option<&Arc<dyn WebSearchPort>> {
        self.search.as_ref()
    }

    /// Natural-language query restricted to the configured booking sites
    #[must_use]
    pub fn build_query(
        &self,
        mode: TransportMode,
        source: &str,
        destination: &str,
        date_label: &str,
    ) -> String {
        let mut query = format!(
            "{mode} ticket price from {} to {} on {date_label}",
            source.trim(),
            destination.trim()
        );
        if !self.config.sites.is_empty() {
            let sites = self
                .config
                .sites
                .iter()
                .map(|site| format!("site:{site}"))
                .collect::<Vec<_>>()
                .join(" OR ");
            query.push_str(&format!(" ({sites})"));
        }
        query
    }

    /// Median plausible fare across a set of snippets
    #[must_use]
    pub fn fare_from_snippets<'a>(&self, snippets: impl IntoIterator<Item = &'a str>) -> Option<u64> {
        let range = self.config.min_fare..=self.config.max_fare;
        let prices: Vec<u64> = snippets
            .into_iter()
            .flat_map(extract_prices)
            .filter(|price| range.contains(price))
            .collect();
        median(&prices)
    }

    /// Scrape one fare per mode; `None` when nothing usable was found
    #[instrument(skip(self, start_date), fields(start_date = %start_date))]
    pub async fn live_fares(
        &self,
        source: &str,
        destination: &str,
        start_date: &StartDate,
    ) -> Option<LiveFares> {
        let Some(search) = &self.search else {
            debug!("No search provider configured, skipping live fares");
            return None;
        };

        let date_label = start_date.query_label();
        let mut fares = LiveFares::new();

        for mode in FARE_QUERY_ORDER {
            let query = self.build_query(mode, source, destination, &date_label);
            match search.get_results(&query, self.config.max_results).await {
                Ok(results) => {
                    let fare = self.fare_from_snippets(results.iter().map(|r| r.snippet.as_str()));
                    if let Some(fare) = fare {
                        debug!(%mode, fare, snippets = results.len(), "Live fare extracted");
                        fares.insert(mode, fare);
                    } else {
                        debug!(%mode, snippets = results.len(), "No plausible fare in snippets");
                    }
                },
                Err(e) => {
                    warn!(%mode, error = %e, "Fare search failed, omitting mode");
                },
            }
        }

        if fares.is_empty() {
            None
        } else {
            info!(modes = fares.len(), "Live fares found");
            Some(fares)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::MockWebSearchPort;
    use domain::SearchResult;

    #[test]
    fn default_config_is_valid() {
        assert!(FareSearchConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_fare_range_is_invalid() {
        let config = FareSearchConfig {
            min_fare: 60_000,
            ..FareSearchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn snippet_count_is_capped() {
        let at_cap = FareSearchConfig {
            max_results: MAX_FARE_SNIPPETS,
            ..FareSearchConfig::default()
        };
        assert!(at_cap.validate().is_ok());

        for max_results in [0, MAX_FARE_SNIPPETS + 1, 10] {
            let config = FareSearchConfig {
                max_results,
                ..FareSearchConfig::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.contains("fares.max_results"), "{err}");
        }
    }

    fn snippet(text: &str, position: u32) -> SearchResult {
        SearchResult::new(
            format!("Result {position}"),
            format!("https://www.ixigo.com/{position}"),
            text.to_string(),
            "www.ixigo.com".to_string(),
            position,
        )
    }

    #[test]
    fn extracts_symbol_and_abbreviation_forms() {
        assert_eq!(extract_prices("Fares from ₹4500 one way"), vec![4500]);
        assert_eq!(extract_prices("Tickets at Rs 4,800 only"), vec![4800]);
        assert_eq!(extract_prices("Rs.1,250 and INR 2300"), vec![1250, 2300]);
        assert_eq!(extract_prices("₹ 1,20,000 charter"), vec![120_000]);
    }

    #[test]
    fn ignores_bare_numbers() {
        assert!(extract_prices("Call 9876543210 or visit on 12 March 2026").is_empty());
        assert!(extract_prices("Travel hours 45").is_empty());
    }

    #[test]
    fn median_of_odd_and_even_counts() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[700]), Some(700));
        assert_eq!(median(&[900, 300, 600]), Some(600));
        assert_eq!(median(&[4500, 4800]), Some(4650));
        assert_eq!(median(&[1000, 1001]), Some(1001));
    }

    #[test]
    fn fare_from_snippets_filters_out_of_range() {
        let service = FareService::default();
        let fare = service.fare_from_snippets([
            "Flights from ₹4500",
            "Cheapest Rs 4,800",
            "Convenience fee ₹99",
            "Charter ₹75,000",
        ]);
        assert_eq!(fare, Some(4650));
    }

    #[test]
    fn fare_from_snippets_none_when_all_filtered() {
        let service = FareService::default();
        assert_eq!(service.fare_from_snippets(["fee ₹50", "Rs 99999"]), None);
    }

    #[test]
    fn query_includes_date_mode_and_sites() {
        let service = FareService::default();
        let query = service.build_query(TransportMode::Train, "Delhi", "Jaipur", "05 March 2026");
        assert!(query.starts_with("train ticket price from Delhi to Jaipur on 05 March 2026"));
        assert!(query.contains("site:irctc.co.in"));
        assert!(query.contains(" OR "));
    }

    #[test]
    fn query_without_sites_has_no_filter() {
        let config = FareSearchConfig {
            sites: Vec::new(),
            ..FareSearchConfig::default()
        };
        let service = FareService::new(None, config);
        let query = service.build_query(TransportMode::Bus, "Pune", "Goa", "soon");
        assert_eq!(query, "bus ticket price from Pune to Goa on soon");
    }

    #[tokio::test]
    async fn disabled_without_search_provider() {
        let service = FareService::default();
        assert!(!service.is_enabled());
        let fares = service
            .live_fares("Delhi", "Jaipur", &StartDate::new("2026-03-05"))
            .await;
        assert!(fares.is_none());
    }

    #[tokio::test]
    async fn per_mode_failures_are_omitted() {
        let mut search = MockWebSearchPort::new();
        search.expect_get_results().times(3).returning(|query, max| {
            assert_eq!(max, 5);
            assert!(query.contains("05 March 2026"));
            if query.starts_with("flight") {
                Ok(vec![
                    snippet("Delhi to Jaipur flights from ₹4500", 1),
                    snippet("Book now Rs 4,800 one way", 2),
                ])
            } else if query.starts_with("train") {
                Ok(vec![snippet("Fee ₹120, helpline 1800 111 139", 1)])
            } else {
                Err(ApplicationError::SearchUnavailable("HTTP 429".to_string()))
            }
        });

        let service = FareService::new(Some(Arc::new(search)), FareSearchConfig::default());
        let fares = service
            .live_fares("Delhi", "Jaipur", &StartDate::new("2026-03-05"))
            .await
            .unwrap();

        assert_eq!(fares.len(), 1);
        assert_eq!(fares.get(TransportMode::Flight), Some(4650));
        assert_eq!(fares.get(TransportMode::Train), None);
        assert_eq!(fares.get(TransportMode::Bus), None);
    }

    #[tokio::test]
    async fn nothing_extracted_is_none() {
        let mut search = MockWebSearchPort::new();
        search
            .expect_get_results()
            .returning(|_, _| Ok(vec![snippet("No prices here", 1)]));

        let service = FareService::new(Some(Arc::new(search)), FareSearchConfig::default());
        let fares = service
            .live_fares("Delhi", "Jaipur", &StartDate::new("next week"))
            .await;
        assert!(fares.is_none());
    }

    #[tokio::test]
    async fn malformed_date_is_passed_through_raw() {
        let mut search = MockWebSearchPort::new();
        search.expect_get_results().returning(|query, _| {
            assert!(query.contains("on next friday"));
            Ok(vec![snippet("Bus fares Rs 650", 1)])
        });

        let service = FareService::new(Some(Arc::new(search)), FareSearchConfig::default());
        let fares = service
            .live_fares("Pune", "Goa", &StartDate::new("next friday"))
            .await
            .unwrap();
        assert_eq!(fares.len(), 3);
        assert_eq!(fares.get(TransportMode::Bus), Some(650));
    }
}
