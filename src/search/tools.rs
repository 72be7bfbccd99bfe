use std::sync::Arc;
use std::time::Duration;

use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::search::config::{MAX_QUERY_LENGTH, MAX_SEARCH_LIMIT};
use crate::search::engine::{CancelFlag, SearchEngine, SearchError, SearchOptions};
use crate::search::outputs::{CrossReferenceOutput, SearchDocsOutput};
use crate::util::{ErrorOutput, OutputFormat, ToolOutput};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchDocsParams {
    #[schemars(description = "Search term, matched case-insensitively against each line")]
    pub query: String,
    #[schemars(description = "Restrict the search to one technology id (optional)")]
    pub technology: Option<String>,
    #[schemars(description = "Category folder within the technology (optional)")]
    pub category: Option<String>,
    #[schemars(description = "Maximum number of results to return (default: 10)")]
    pub limit: Option<usize>,
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchCrossReferenceParams {
    #[schemars(description = "Search term, matched case-insensitively against each line")]
    pub query: String,
    #[schemars(description = "Technology ids to include in the search")]
    pub technologies: Vec<String>,
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone)]
pub struct SearchTools {
    engine: Arc<SearchEngine>,
    timeout: Duration,
}

impl SearchTools {
    pub fn new(engine: Arc<SearchEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    pub async fn search_docs(&self, params: SearchDocsParams) -> String {
        let format = params.format.unwrap_or_default();

        if let Err(message) = validate_query(&params.query) {
            return ErrorOutput::new(message).render(format);
        }
        let limit = params.limit;
        if limit.is_some_and(|l| l > MAX_SEARCH_LIMIT) {
            return ErrorOutput::new(format!("Limit must not exceed {MAX_SEARCH_LIMIT}"))
                .render(format);
        }

        let options = SearchOptions {
            technology: params.technology.clone(),
            category: params.category.clone(),
            limit,
        };
        let query = params.query.clone();

        match self
            .run(move |engine, cancel| engine.search_cancellable(&query, &options, cancel))
            .await
        {
            Ok(results) => SearchDocsOutput {
                query: params.query,
                technology: params.technology,
                category: params.category,
                total_results: results.len(),
                results,
            }
            .render(format),
            Err(message) => ErrorOutput::new(format!("Search failed: {message}")).render(format),
        }
    }

    pub async fn search_cross_reference(&self, params: SearchCrossReferenceParams) -> String {
        let format = params.format.unwrap_or_default();

        if let Err(message) = validate_query(&params.query) {
            return ErrorOutput::new(message).render(format);
        }
        if params.technologies.is_empty() {
            return ErrorOutput::new("At least one technology is required").render(format);
        }

        let query = params.query.clone();
        let technologies = params.technologies.clone();

        match self
            .run(move |engine, cancel| {
                engine.search_cross_reference_cancellable(&query, &technologies, cancel)
            })
            .await
        {
            Ok(results) => CrossReferenceOutput {
                query: params.query,
                technologies: params.technologies,
                total_results: results.len(),
                results,
            }
            .render(format),
            Err(message) => {
                ErrorOutput::new(format!("Cross reference search failed: {message}")).render(format)
            }
        }
    }

    /// Run a search on the blocking pool, cancelling it once the timeout elapses
    async fn run<T, F>(&self, search: F) -> Result<T, String>
    where
        T: Send + 'static,
        F: FnOnce(&SearchEngine, &CancelFlag) -> Result<T, SearchError> + Send + 'static,
    {
        let engine = self.engine.clone();
        let cancel = CancelFlag::default();
        let task_cancel = cancel.clone();

        let handle = tokio::task::spawn_blocking(move || search(engine.as_ref(), &task_cancel));

        match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(result)) => result.map_err(|e| e.to_string()),
            Ok(Err(e)) => Err(format!("search task failed: {e}")),
            Err(_) => {
                cancel.cancel();
                tracing::warn!("Search cancelled after {:?}", self.timeout);
                Err(timeout_message(self.timeout))
            }
        }
    }
}

fn timeout_message(timeout: Duration) -> String {
    format!("search was cancelled after exceeding the {timeout:?} time limit")
}

fn validate_query(query: &str) -> Result<(), String> {
    if query.trim().is_empty() {
        return Err("The 'query' parameter is required".to_string());
    }
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(format!(
            "Query must not exceed {MAX_QUERY_LENGTH} characters"
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert!(validate_query("router").is_ok());
        assert!(validate_query("   ").is_err());
        assert!(validate_query(&"x".repeat(MAX_QUERY_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_timeout_message_keeps_sub_second_precision() {
        assert!(timeout_message(Duration::from_millis(250)).contains("250ms time limit"));
        assert!(timeout_message(Duration::from_secs(30)).contains("30s time limit"));
    }
}
