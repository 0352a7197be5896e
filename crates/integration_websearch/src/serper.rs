//! Serper (Google Search API) client

use std::time::{Duration, Instant};

use async_trait::async_trait;
use domain::{SearchResult, WebSearchResponse};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{SearchProvider, WebSearchConfig, WebSearchError};

/// Serper API request/response types
mod api {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Serialize)]
    pub struct SearchRequest<'a> {
        pub q: &'a str,
        pub num: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub gl: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub hl: Option<&'a str>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        #[serde(default)]
        pub organic: Vec<OrganicResult>,
    }

    #[derive(Debug, Deserialize)]
    pub struct OrganicResult {
        #[serde(default)]
        pub title: String,
        pub link: String,
        #[serde(default)]
        pub snippet: String,
        #[serde(default)]
        pub position: Option<u32>,
    }
}

/// Serper search client
pub struct SerperSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout_secs: u64,
    result_country: String,
    result_language: String,
}

impl std::fmt::Debug for SerperSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerperSearchClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl SerperSearchClient {
    /// Create a new Serper client
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &WebSearchConfig) -> Result<Self, WebSearchError> {
        let api_key = config
            .serper_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                WebSearchError::ConfigurationError("Serper API key is required".to_string())
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WebSearchError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.serper_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            result_country: config.result_country.clone(),
            result_language: config.result_language.clone(),
        })
    }

    fn non_empty(value: &str) -> Option<&str> {
        let value = value.trim();
        (!value.is_empty()).then_some(value)
    }

    fn build_request<'a>(&'a self, query: &'a str, max_results: usize) -> api::SearchRequest<'a> {
        api::SearchRequest {
            q: query,
            num: max_results,
            gl: Self::non_empty(&self.result_country),
            hl: Self::non_empty(&self.result_language),
        }
    }

    /// Host part of a result link, "unknown" if the link is not a URL
    fn extract_domain(link: &str) -> String {
        url::Url::parse(link)
            .ok()
            .and_then(|u| u.host_str().map(ToString::to_string))
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Convert API results to domain results, renumbering missing positions
    fn convert_results(response: api::SearchResponse, max_results: usize) -> Vec<SearchResult> {
        response
            .organic
            .into_iter()
            .take(max_results)
            .zip(1_u32..)
            .map(|(r, rank)| {
                let source = Self::extract_domain(&r.link);
                SearchResult::new(r.title, r.link, r.snippet, source, r.position.unwrap_or(rank))
            })
            .collect()
    }
}

#[async_trait]
impl SearchProvider for SerperSearchClient {
    #[instrument(skip(self), fields(provider = "serper"))]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<WebSearchResponse, WebSearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(WebSearchError::InvalidQuery(
                "Query must not be empty".to_string(),
            ));
        }
        let max_results = max_results.max(1);

        let url = format!("{}/search", self.base_url);
        debug!(url = %url, "Executing Serper search");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&self.build_request(query, max_results))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WebSearchError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else if e.is_connect() {
                    WebSearchError::ConnectionFailed(e.to_string())
                } else {
                    WebSearchError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());
            return Err(WebSearchError::RateLimitExceeded {
                retry_after_secs: retry_after,
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(WebSearchError::AuthenticationFailed(
                "Invalid Serper API key".to_string(),
            ));
        }

        if !status.is_success() {
            return Err(WebSearchError::RequestFailed(format!("HTTP {status}")));
        }

        let body: api::SearchResponse = response
            .json()
            .await
            .map_err(|e| WebSearchError::ParseError(e.to_string()))?;

        let elapsed = start.elapsed();
        let results = Self::convert_results(body, max_results);

        if results.is_empty() {
            return Err(WebSearchError::NoResults {
                query: query.to_string(),
            });
        }

        debug!(
            results = results.len(),
            time_ms = elapsed.as_millis(),
            "Serper search completed"
        );

        Ok(WebSearchResponse::new(
            query.to_string(),
            results,
            self.provider_name().to_string(),
        ))
    }

    async fn is_healthy(&self) -> bool {
        match self.search("test", 1).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Serper health check failed");
                false
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        "serper"
    }
}
