//! Web search entities used for fare scraping and disruption lookups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MAX_SNIPPET_CHARS: usize = 200;

/// A single organic search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Title of the page
    pub title: String,

    /// Link to the page
    pub url: String,

    /// Short snippet shown by the search engine
    pub snippet: String,

    /// Source domain (e.g., "www.redbus.in")
    pub source: String,

    /// Position in search results (1-indexed)
    pub position: u32,
}

impl SearchResult {
    /// Create a new search result
    #[must_use]
    pub const fn new(
        title: String,
        url: String,
        snippet: String,
        source: String,
        position: u32,
    ) -> Self {
        Self {
            title,
            url,
            snippet,
            source,
            position,
        }
    }

    /// Format as a citation line for LLM context
    ///
    /// Returns a string like: "\[1\] Title - source.com: Snippet..."
    #[must_use]
    pub fn format_citation(&self) -> String {
        let snippet = if self.snippet.chars().count() > MAX_SNIPPET_CHARS {
            let head: String = self.snippet.chars().take(MAX_SNIPPET_CHARS - 3).collect();
            format!("{head}...")
        } else {
            self.snippet.clone()
        };
        format!(
            "[{}] {} - {}: {}",
            self.position, self.title, self.source, snippet
        )
    }

    /// Format as a footnote reference
    #[must_use]
    pub fn format_footnote(&self) -> String {
        format!("[{}] {}", self.position, self.url)
    }
}

/// Response from a web search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSearchResponse {
    /// Original search query
    pub query: String,

    /// Organic results in rank order
    pub results: Vec<SearchResult>,

    /// When the search ran
    pub timestamp: DateTime<Utc>,

    /// Search provider used (e.g., "serper")
    pub provider: String,
}

impl WebSearchResponse {
    /// Create a new search response stamped with the current time
    #[must_use]
    pub fn new(query: String, results: Vec<SearchResult>, provider: String) -> Self {
        Self {
            query,
            results,
            timestamp: Utc::now(),
            provider,
        }
    }

    /// Format all results as citation context for the agent
    #[must_use]
    pub fn format_for_llm(&self) -> String {
        if self.results.is_empty() {
            return format!("No web search results found for: {}", self.query);
        }

        let mut output = format!(
            "Web search results for \"{}\" ({} results):\n\n",
            self.query,
            self.results.len()
        );

        for result in &self.results {
            output.push_str(&result.format_citation());
            output.push_str("\n\n");
        }

        output.push_str("Sources:\n");
        for result in &self.results {
            output.push_str(&result.format_footnote());
            output.push('\n');
        }

        output
    }

    /// Snippets in rank order
    pub fn snippets(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|r| r.snippet.as_str())
    }

    /// Check if the response has any results
    #[must_use]
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}
