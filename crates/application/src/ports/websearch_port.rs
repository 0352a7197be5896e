//! Web search service port
//!
//! Used both for scraping fares out of booking-site snippets and for the
//! free-form disruption/event search tool.

use async_trait::async_trait;
use domain::entities::{SearchResult, WebSearchResponse};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Options for web search queries
///
/// Result locale is a property of the configured backend, not of a query.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum number of results to return (default: 5)
    pub max_results: Option<u32>,
}

impl SearchOptions {
    /// Create new search options with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum results
    #[must_use]
    pub const fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }
}

/// Port for web search operations
#[allow(clippy::struct_field_names)] // automock generates struct with prefixes
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WebSearchPort: Send + Sync {
    /// Perform a web search with the given query
    async fn search(
        &self,
        query: &str,
        options: Option<SearchOptions>,
    ) -> Result<WebSearchResponse, ApplicationError>;

    /// Search and return formatted results ready for LLM context
    async fn search_for_llm(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<String, ApplicationError> {
        let options = SearchOptions::new().with_max_results(max_results);
        let response = self.search(query, Some(options)).await?;
        Ok(response.format_for_llm())
    }

    /// Get individual search results
    async fn get_results(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, ApplicationError> {
        let options = SearchOptions::new().with_max_results(max_results);
        let response = self.search(query, Some(options)).await?;
        Ok(response.results)
    }

    /// Check if the web search service is available
    async fn is_available(&self) -> bool;

    /// Name of the search backend, e.g. "serper"
    fn provider_name(&self) -> &str;
}
