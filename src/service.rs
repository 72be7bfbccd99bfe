use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::task::JoinError;

use crate::catalog::{
    CatalogTools,
    tools::{GetCategoriesParams, GetCorpusStatusParams, ListTechnologiesParams},
};
use crate::config::DocsConfig;
use crate::search::{
    SearchEngine, SearchTools,
    config::DEFAULT_SEARCH_TIMEOUT_SECS,
    tools::{SearchCrossReferenceParams, SearchDocsParams},
};
use crate::util::{ErrorOutput, OutputFormat, ToolOutput};

#[derive(Debug, Clone)]
pub struct FullstackDocsService {
    search_tools: SearchTools,
    catalog_tools: CatalogTools,
    tool_router: ToolRouter<Self>,
}

impl FullstackDocsService {
    pub fn new(config: DocsConfig) -> Self {
        Self::with_timeout(config, Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS))
    }

    pub fn with_timeout(config: DocsConfig, search_timeout: Duration) -> Self {
        let config = Arc::new(config);
        let engine = Arc::new(SearchEngine::new(config.clone()));

        Self {
            search_tools: SearchTools::new(engine, search_timeout),
            catalog_tools: CatalogTools::new(config),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl FullstackDocsService {
    // Search tools
    #[tool(
        description = "Search the offline documentation of the configured full-stack technologies. Matches the query case-insensitively against every line and returns the best ranked matches with 3 lines of context on each side. Headings rank above code, code above prose. Optionally restrict to one technology and a category folder within it."
    )]
    pub async fn search_docs(&self, params: Parameters<SearchDocsParams>) -> String {
        self.search_tools.search_docs(params.0).await
    }

    #[tool(
        description = "Search several technologies at once and rank the combined matches. Technologies that the correlation table links to a topic mentioned in the query get a relevance boost. Use this for questions that span layers, e.g. 'form validation' across symfony, javascript and html."
    )]
    pub async fn search_cross_reference(
        &self,
        params: Parameters<SearchCrossReferenceParams>,
    ) -> String {
        self.search_tools.search_cross_reference(params.0).await
    }

    // Catalog tools
    #[tool(
        description = "List all technologies with offline documentation, with their versions and ids. Use the id as the 'technology' argument of the search tools."
    )]
    pub async fn list_technologies(&self, params: Parameters<ListTechnologiesParams>) -> String {
        self.catalog_tools.list_technologies(params.0)
    }

    #[tool(
        description = "Get the documentation categories of a technology. Use a category with search_docs to narrow a search to that part of the documentation."
    )]
    pub async fn get_categories(&self, params: Parameters<GetCategoriesParams>) -> String {
        self.catalog_tools.get_categories(params.0)
    }

    #[tool(
        description = "Report the state of the documentation on disk for each technology: resolved path, whether it exists, file count, total size and last modification time. Use to diagnose empty search results."
    )]
    pub async fn get_corpus_status(&self, params: Parameters<GetCorpusStatusParams>) -> String {
        let format = params.0.format.unwrap_or_default();
        let catalog_tools = self.catalog_tools.clone();
        tokio::task::spawn_blocking(move || catalog_tools.get_corpus_status(params.0))
            .await
            .unwrap_or_else(|e| task_failed("Failed to read corpus status", &e, format))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for FullstackDocsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "fullstack-docs-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "MCP server for searching offline full-stack documentation. Use list_technologies to see which documentation sets are available, get_categories to find the sections of one technology, search_docs for a focused search and search_cross_reference when a question spans several technologies. If a search returns nothing unexpectedly, get_corpus_status shows whether the documentation is present on disk.".to_string(),
            ),
            ..Default::default()
        }
    }
}

fn task_failed(context: &str, error: &JoinError, format: OutputFormat) -> String {
    ErrorOutput::new(format!("{context}: {error}")).render(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_task_failure_respects_format() {
        let error = tokio::task::spawn_blocking(|| panic!("walk \"failed\""))
            .await
            .unwrap_err();

        let json = task_failed("Failed to read corpus status", &error, OutputFormat::Json);
        let output: ErrorOutput = serde_json::from_str(&json).unwrap();
        assert!(output.error.starts_with("Failed to read corpus status: "));

        let markdown = task_failed("Failed to read corpus status", &error, OutputFormat::Markdown);
        assert!(markdown.starts_with("Error: Failed to read corpus status"));
    }
}
