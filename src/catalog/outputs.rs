//! Output types for catalog tools

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::ToolOutput;

/// Summary of one configured technology
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnologyInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    pub categories: Vec<String>,
}

/// Output from list_technologies operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ListTechnologiesOutput {
    pub technologies: Vec<TechnologyInfo>,
}

impl ToolOutput for ListTechnologiesOutput {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Available technologies\n\n");
        for tech in &self.technologies {
            let _ = writeln!(out, "- **{}** ({}) `{}`", tech.name, tech.version, tech.id);
        }
        out.push_str("\nUse `search_docs` to search within a specific technology.");
        out
    }
}

/// Output from get_categories operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GetCategoriesOutput {
    pub technology: String,
    pub name: String,
    pub categories: Vec<String>,
}

impl ToolOutput for GetCategoriesOutput {
    fn to_markdown(&self) -> String {
        let mut out = format!("# Categories for {}\n\n", self.name);
        for category in &self.categories {
            let _ = writeln!(out, "- {category}");
        }
        out.push_str("\nUse these categories with `search_docs` to narrow your search.");
        out
    }
}

/// State of one technology's documentation on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnologyStatus {
    pub technology: String,
    pub name: String,
    pub version: String,
    pub docs_path: String,
    pub exists: bool,
    pub file_count: usize,
    pub size_bytes: u64,
    /// Human readable `size_bytes`
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Output from get_corpus_status operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CorpusStatusOutput {
    pub technologies: Vec<TechnologyStatus>,
    pub total_files: usize,
    pub missing: Vec<String>,
}

impl CorpusStatusOutput {
    pub fn new(technologies: Vec<TechnologyStatus>) -> Self {
        let total_files = technologies.iter().map(|t| t.file_count).sum();
        let missing = technologies
            .iter()
            .filter(|t| !t.exists)
            .map(|t| t.technology.clone())
            .collect();
        Self {
            technologies,
            total_files,
            missing,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl ToolOutput for CorpusStatusOutput {
    fn to_markdown(&self) -> String {
        let mut out = String::from("# Documentation status\n\n");
        out.push_str("| Technology | Version | Files | Size | Last modified | Path |\n");
        out.push_str("|---|---|---|---|---|---|\n");

        for t in &self.technologies {
            let modified = t
                .last_modified
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            let path = if t.exists {
                format!("`{}`", t.docs_path)
            } else {
                format!("`{}` (missing)", t.docs_path)
            };
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                t.name, t.version, t.file_count, t.size, modified, path
            );
        }

        let _ = write!(out, "\n{} documentation file(s) in total.", self.total_files);
        if !self.missing.is_empty() {
            let _ = write!(out, "\nMissing documentation: {}.", self.missing.join(", "));
        }
        out
    }
}
