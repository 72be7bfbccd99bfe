use std::sync::Arc;

use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::catalog::outputs::{
    CorpusStatusOutput, GetCategoriesOutput, ListTechnologiesOutput, TechnologyInfo,
};
use crate::catalog::{corpus_status, technology_status};
use crate::config::DocsConfig;
use crate::util::{ErrorOutput, OutputFormat, ToolOutput};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListTechnologiesParams {
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetCategoriesParams {
    #[schemars(description = "The technology id")]
    pub technology: String,
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct GetCorpusStatusParams {
    #[schemars(description = "Only report this technology id (optional)")]
    pub technology: Option<String>,
    #[schemars(description = "Response format: 'markdown' (default) or 'json'")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone)]
pub struct CatalogTools {
    config: Arc<DocsConfig>,
}

impl CatalogTools {
    pub fn new(config: Arc<DocsConfig>) -> Self {
        Self { config }
    }

    pub fn list_technologies(&self, params: ListTechnologiesParams) -> String {
        let technologies = self
            .config
            .technologies()
            .map(|(id, profile)| TechnologyInfo {
                id: id.to_string(),
                name: profile.name.clone(),
                version: profile.version.clone(),
                categories: profile.categories.clone(),
            })
            .collect();

        ListTechnologiesOutput { technologies }.render(params.format.unwrap_or_default())
    }

    pub fn get_categories(&self, params: GetCategoriesParams) -> String {
        let format = params.format.unwrap_or_default();

        if params.technology.trim().is_empty() {
            return ErrorOutput::new("The 'technology' parameter is required").render(format);
        }

        match self.config.profile(&params.technology) {
            Some(profile) => GetCategoriesOutput {
                technology: params.technology.clone(),
                name: profile.name.clone(),
                categories: profile.categories.clone(),
            }
            .render(format),
            None => ErrorOutput::new(format!("Technology '{}' not found", params.technology))
                .render(format),
        }
    }

    /// Walks the documentation roots, so callers on an async runtime should
    /// run this on the blocking pool.
    pub fn get_corpus_status(&self, params: GetCorpusStatusParams) -> String {
        let format = params.format.unwrap_or_default();

        let statuses = match params.technology.as_deref() {
            Some(tech) => match technology_status(&self.config, tech) {
                Some(status) => vec![status],
                None => {
                    return ErrorOutput::new(format!("Technology '{tech}' not found"))
                        .render(format);
                }
            },
            None => corpus_status(&self.config),
        };

        CorpusStatusOutput::new(statuses).render(format)
    }
}
