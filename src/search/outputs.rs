//! Output types for search tools
//!
//! These types are the return values of the search tool methods. They render
//! either as Markdown for direct display or as JSON, and can be deserialized
//! in tests for type-safe validation.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::search::config::CROSS_REFERENCE_PER_TECH;
use crate::search::engine::SearchMatch;
use crate::util::ToolOutput;

/// Output from search_docs operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchDocsOutput {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub total_results: usize,
    pub results: Vec<SearchMatch>,
}

impl SearchDocsOutput {
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

impl ToolOutput for SearchDocsOutput {
    fn to_markdown(&self) -> String {
        if self.results.is_empty() {
            return format!("No results found for \"{}\".", self.query);
        }

        let mut out = format!("# Search results for \"{}\"\n\n", self.query);
        let _ = write!(out, "{} result(s) found.\n\n", self.results.len());

        for m in &self.results {
            out.push_str("## ");
            out.push_str(&m.technology);
            if let Some(category) = &m.category {
                let _ = write!(out, " > {category}");
            }
            out.push_str("\n\n");

            let _ = write!(out, "**File:** `{}` (line {})\n\n", m.file, m.line);
            let _ = write!(out, "**Score:** {:.2}\n\n", m.score);
            push_context(&mut out, &m.content);
            out.push_str("---\n\n");
        }

        out
    }
}

/// Output from search_cross_reference operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CrossReferenceOutput {
    pub query: String,
    pub technologies: Vec<String>,
    pub total_results: usize,
    pub results: Vec<SearchMatch>,
}

impl CrossReferenceOutput {
    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    /// Matches grouped by technology, in order of first appearance in the ranking
    pub fn by_technology(&self) -> Vec<(&str, Vec<&SearchMatch>)> {
        let mut groups: Vec<(&str, Vec<&SearchMatch>)> = Vec::new();
        for m in &self.results {
            match groups.iter_mut().find(|(tech, _)| *tech == m.technology) {
                Some((_, group)) => group.push(m),
                None => groups.push((m.technology.as_str(), vec![m])),
            }
        }
        groups
    }
}

impl ToolOutput for CrossReferenceOutput {
    fn to_markdown(&self) -> String {
        if self.results.is_empty() {
            return format!(
                "No results found for \"{}\" in technologies: {}.",
                self.query,
                self.technologies.join(", ")
            );
        }

        let mut out = format!("# Cross reference search for \"{}\"\n\n", self.query);
        let _ = write!(out, "Technologies: {}\n\n", self.technologies.join(", "));
        let _ = write!(out, "{} correlated result(s) found.\n\n", self.results.len());

        for (tech, matches) in self.by_technology() {
            let _ = write!(out, "## {}\n\n", tech.to_uppercase());
            for m in matches.into_iter().take(CROSS_REFERENCE_PER_TECH) {
                let _ = write!(out, "### {} (line {})\n\n", m.file, m.line);
                push_context(&mut out, &m.content);
            }
            out.push_str("---\n\n");
        }

        out
    }
}

fn push_context(out: &mut String, content: &str) {
    out.push_str("```\n");
    out.push_str(content);
    out.push_str("\n```\n\n");
}
