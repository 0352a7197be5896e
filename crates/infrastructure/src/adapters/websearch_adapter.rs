//! Web search adapter - Implements WebSearchPort using integration_websearch

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{SearchOptions, WebSearchPort};
use async_trait::async_trait;
use domain::WebSearchResponse;
use integration_websearch::{SearchProvider, SerperSearchClient, WebSearchConfig, WebSearchError};
use tracing::{debug, instrument};

/// Adapter for web search through Serper
pub struct WebSearchAdapter {
    client: Arc<dyn SearchProvider>,
    default_max_results: usize,
}

impl std::fmt::Debug for WebSearchAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSearchAdapter")
            .field("provider", &self.client.provider_name())
            .field("default_max_results", &self.default_max_results)
            .finish()
    }
}

impl WebSearchAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured or the HTTP client fails to
    /// initialize.
    pub fn new(config: &WebSearchConfig) -> Result<Self, ApplicationError> {
        let client = SerperSearchClient::new(config).map_err(Self::map_error)?;
        Ok(Self::with_provider(Arc::new(client), config.max_results))
    }

    /// Wrap any search provider
    pub fn with_provider(client: Arc<dyn SearchProvider>, default_max_results: usize) -> Self {
        Self {
            client,
            default_max_results,
        }
    }

    /// Map integration web search error to application error
    ///
    /// Missing keys and refused requests make search unavailable, which
    /// callers treat as "no enrichment".
    fn map_error(err: WebSearchError) -> ApplicationError {
        match err {
            WebSearchError::ConfigurationError(e)
            | WebSearchError::AuthenticationFailed(e)
            | WebSearchError::RequestFailed(e)
            | WebSearchError::ConnectionFailed(e) => ApplicationError::SearchUnavailable(e),
            WebSearchError::RateLimitExceeded { retry_after_secs } => {
                debug!(retry_after = ?retry_after_secs, "Web search rate limited");
                ApplicationError::RateLimited
            },
            WebSearchError::ParseError(e) => ApplicationError::ExternalService(e),
            WebSearchError::NoResults { query } => {
                ApplicationError::NotFound(format!("No search results for: {query}"))
            },
            WebSearchError::InvalidQuery(e) => ApplicationError::InvalidOperation(e),
            WebSearchError::Timeout { timeout_secs } => {
                ApplicationError::ExternalService(format!("Request timed out after {timeout_secs}s"))
            },
        }
    }
}

#[async_trait]
impl WebSearchPort for WebSearchAdapter {
    #[instrument(skip(self, options), fields(query_len = query.len()))]
    async fn search(
        &self,
        query: &str,
        options: Option<SearchOptions>,
    ) -> Result<WebSearchResponse, ApplicationError> {
        let max_results = options
            .and_then(|o| o.max_results)
            .map_or(self.default_max_results, |n| n as usize);

        let result = self.client.search(query, max_results).await;

        match &result {
            Ok(response) => {
                debug!(
                    results = response.results.len(),
                    provider = %response.provider,
                    "Retrieved search results"
                );
            },
            Err(e) => {
                debug!(error = %e, "Search failed");
            },
        }

        result.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }

    fn provider_name(&self) -> &str {
        self.client.provider_name()
    }
}
