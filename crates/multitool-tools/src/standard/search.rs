//! # Search Tools
//!
//! Web search and URL fetching. Both are mocked: they return canned data
//! shaped like a real backend's so a model can exercise the flow offline.

use async_trait::async_trait;
use multitool_core::{CallContext, Tool, TypedTool};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("query_required")]
    QueryRequired,

    #[error("url_required")]
    UrlRequired,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SearchWebArgs {
    /// The search query.
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchWebResponse {
    pub query: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct FetchUrlArgs {
    /// The URL to fetch.
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchUrlResponse {
    pub url: String,
    pub content: String,
}

#[derive(Debug, Default)]
pub struct SearchWebTool;

impl SearchWebTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TypedTool for SearchWebTool {
    type Args = SearchWebArgs;
    type Output = SearchWebResponse;
    type Error = SearchError;

    fn name(&self) -> &str {
        "search_web"
    }

    fn description(&self) -> &str {
        "Performs a web search (mocked)."
    }

    async fn call(&self, _ctx: &CallContext, args: SearchWebArgs) -> Result<SearchWebResponse, SearchError> {
        let query = args.query.trim();
        if query.is_empty() {
            return Err(SearchError::QueryRequired);
        }
        tracing::debug!(query, "mock web search");

        let results = (1..=2)
            .map(|n| SearchResult {
                title: format!("Result {} for {}", n, query),
                url: format!("https://example.com/search/{}", n),
            })
            .collect();
        Ok(SearchWebResponse {
            query: query.to_string(),
            results,
        })
    }
}

#[derive(Debug, Default)]
pub struct FetchUrlTool;

impl FetchUrlTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TypedTool for FetchUrlTool {
    type Args = FetchUrlArgs;
    type Output = FetchUrlResponse;
    type Error = SearchError;

    fn name(&self) -> &str {
        "fetch_url_content"
    }

    fn description(&self) -> &str {
        "Fetches content from a URL (mocked)."
    }

    async fn call(&self, _ctx: &CallContext, args: FetchUrlArgs) -> Result<FetchUrlResponse, SearchError> {
        let url = args.url.trim();
        if url.is_empty() {
            return Err(SearchError::UrlRequired);
        }
        tracing::debug!(url, "mock url fetch");

        Ok(FetchUrlResponse {
            url: url.to_string(),
            content: format!(
                "<html><head><title>{url}</title></head><body>Mock content of {url}</body></html>"
            ),
        })
    }
}

/// Tools of the `search` category.
pub fn search_tools() -> Vec<Tool> {
    vec![
        Tool::from_typed(SearchWebTool::new()),
        Tool::from_typed(FetchUrlTool::new()),
    ]
}
