use std::cmp::Ordering;
use std::fs;
use std::path::{Component, Path};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

use crate::config::DocsConfig;
use crate::search::config::{CONTEXT_LINES, DEFAULT_SEARCH_LIMIT};
use crate::search::correlate::correlate;
use crate::search::scoring::score_line;
use crate::walker;

/// One matching line with its surrounding context
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchMatch {
    /// Id of the owning technology profile
    pub technology: String,
    /// Path relative to the technology's documentation root, `/` separated
    pub file: String,
    /// 1-based line number of the match
    pub line: usize,
    /// Context window centered on the match
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub score: f64,
}

/// Filters accepted by [`SearchEngine::search`]
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub technology: Option<String>,
    pub category: Option<String>,
    /// Defaults to [`DEFAULT_SEARCH_LIMIT`]
    pub limit: Option<usize>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search was cancelled before completion")]
    Cancelled,
}

/// Cooperative cancellation signal shared with a running search
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::SeqCst)
    }

    fn check(&self) -> Result<(), SearchError> {
        if self.is_cancelled() {
            Err(SearchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Substring search over the configured documentation corpora.
///
/// The engine holds only the immutable configuration snapshot; every call
/// re-walks the filesystem and keeps its results local, so one instance can
/// serve concurrent queries without locking.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: Arc<DocsConfig>,
}

impl SearchEngine {
    pub fn new(config: Arc<DocsConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Search one technology, or all of them when none is given.
    ///
    /// Unknown technology ids yield an empty list.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchMatch> {
        self.search_cancellable(query, options, &CancelFlag::default())
            .unwrap_or_default()
    }

    pub fn search_cancellable(
        &self,
        query: &str,
        options: &SearchOptions,
        cancel: &CancelFlag,
    ) -> Result<Vec<SearchMatch>, SearchError> {
        let technologies: Vec<&str> = match options.technology.as_deref() {
            Some(tech) => vec![tech],
            None => self.config.technology_ids().collect(),
        };

        let mut results = Vec::new();
        for tech in technologies {
            cancel.check()?;
            results.extend(self.search_technology(
                query,
                tech,
                options.category.as_deref(),
                cancel,
            )?);
        }

        rank(&mut results);
        results.truncate(options.limit.unwrap_or(DEFAULT_SEARCH_LIMIT));

        tracing::debug!("Search for '{}' returned {} matches", query, results.len());
        Ok(results)
    }

    /// Search several technologies and boost those correlated with the query topic.
    ///
    /// No limit is applied: every match is returned in ranked order.
    pub fn search_cross_reference(&self, query: &str, technologies: &[String]) -> Vec<SearchMatch> {
        self.search_cross_reference_cancellable(query, technologies, &CancelFlag::default())
            .unwrap_or_default()
    }

    pub fn search_cross_reference_cancellable(
        &self,
        query: &str,
        technologies: &[String],
        cancel: &CancelFlag,
    ) -> Result<Vec<SearchMatch>, SearchError> {
        let mut seen: Vec<&str> = Vec::with_capacity(technologies.len());
        let mut results = Vec::new();

        for tech in technologies {
            if seen.contains(&tech.as_str()) {
                continue;
            }
            seen.push(tech.as_str());

            cancel.check()?;
            results.extend(self.search_technology(query, tech, None, cancel)?);
        }

        let results = correlate(results, query, self.config.correlations());
        tracing::debug!(
            "Cross reference search for '{}' across {:?} returned {} matches",
            query,
            seen,
            results.len()
        );
        Ok(results)
    }

    fn search_technology(
        &self,
        query: &str,
        technology: &str,
        category: Option<&str>,
        cancel: &CancelFlag,
    ) -> Result<Vec<SearchMatch>, SearchError> {
        let (Some(profile), Some(root)) = (
            self.config.profile(technology),
            self.config.docs_root(technology),
        ) else {
            return Ok(Vec::new());
        };

        if !root.is_dir() {
            tracing::warn!(
                "Documentation path not found for {}: {}",
                technology,
                root.display()
            );
            return Ok(Vec::new());
        }

        let query_lower = query.to_lowercase();
        let mut results = Vec::new();

        for path in walker::list_files(&root, &profile.file_extensions) {
            cancel.check()?;

            let Ok(relative) = path.strip_prefix(&root) else {
                continue;
            };
            if let Some(category) = category {
                if !relative.starts_with(category) {
                    continue;
                }
            }

            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Error reading file {}: {}", path.display(), e);
                    continue;
                }
            };

            let file_name_lower = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            let file = relative_display(relative);
            let inferred = infer_category(relative, &profile.categories);
            let lines: Vec<&str> = text.lines().collect();

            for (index, line) in lines.iter().enumerate() {
                if !line.to_lowercase().contains(&query_lower) {
                    continue;
                }
                results.push(SearchMatch {
                    technology: technology.to_string(),
                    file: file.clone(),
                    line: index + 1,
                    content: extract_context(&lines, index, CONTEXT_LINES),
                    category: inferred.clone(),
                    score: score_line(
                        line,
                        &query_lower,
                        &file_name_lower,
                        self.config.weights(),
                    ),
                });
            }
        }

        Ok(results)
    }
}

/// Lines `[index - radius, index + radius]`, clipped to the file, joined by newlines
pub fn extract_context(lines: &[&str], index: usize, radius: usize) -> String {
    let start = index.saturating_sub(radius);
    let end = (index + radius + 1).min(lines.len());
    lines[start..end].join("\n")
}

/// Infer a category from the directory segments of a root-relative path.
///
/// For each directory segment in order, the first declared category that the
/// lowercased segment contains wins. The file name itself is not inspected.
pub fn infer_category(relative: &Path, categories: &[String]) -> Option<String> {
    let directories = relative.parent()?;

    directories.components().find_map(|component| {
        let Component::Normal(segment) = component else {
            return None;
        };
        let segment = segment.to_string_lossy().to_lowercase();
        categories
            .iter()
            .find(|category| segment.contains(&category.to_lowercase()))
            .cloned()
    })
}

/// Order by descending score, then ascending content length
pub fn rank(matches: &mut [SearchMatch]) {
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.content.len().cmp(&b.content.len()))
    });
}

fn relative_display(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(score: f64, content: &str) -> SearchMatch {
        SearchMatch {
            technology: "demo".to_string(),
            file: "a.md".to_string(),
            line: 1,
            content: content.to_string(),
            category: None,
            score,
        }
    }

    #[test]
    fn test_context_window_matches_clipped_range() {
        let lines: Vec<String> = (1..=10).map(|i| format!("line {i}")).collect();
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        let n = lines.len();

        for i in 1..=n {
            let start = i.saturating_sub(3).max(1);
            let end = (i + 3).min(n);
            let expected = (start..=end)
                .map(|k| format!("line {k}"))
                .collect::<Vec<_>>()
                .join("\n");
            assert_eq!(extract_context(&lines, i - 1, 3), expected, "line {i}");
        }
    }

    #[test]
    fn test_context_window_short_file() {
        let lines = vec!["only"];
        assert_eq!(extract_context(&lines, 0, 3), "only");
    }

    #[test]
    fn test_infer_category_from_directories() {
        let categories = vec!["controller".to_string(), "routing".to_string()];

        assert_eq!(
            infer_category(Path::new("book/Routing/intro.md"), &categories),
            Some("routing".to_string())
        );
        assert_eq!(infer_category(Path::new("routing.md"), &categories), None);
        assert_eq!(infer_category(Path::new("misc/intro.md"), &categories), None);
    }

    #[test]
    fn test_infer_category_substring_heuristic() {
        let categories = vec!["controller".to_string()];
        assert_eq!(
            infer_category(Path::new("microcontroller/gpio.md"), &categories),
            Some("controller".to_string())
        );
    }

    #[test]
    fn test_infer_category_first_segment_wins() {
        let categories = vec!["routing".to_string(), "forms".to_string()];
        assert_eq!(
            infer_category(Path::new("forms/routing/x.md"), &categories),
            Some("forms".to_string())
        );
    }

    #[test]
    fn test_rank_orders_by_score_then_length() {
        let mut matches = vec![
            sample(2.0, "long content"),
            sample(5.0, "x"),
            sample(2.0, "short"),
        ];
        rank(&mut matches);

        let order: Vec<_> = matches.iter().map(|m| (m.score, m.content.as_str())).collect();
        assert_eq!(
            order,
            vec![(5.0, "x"), (2.0, "short"), (2.0, "long content")]
        );
    }

    #[test]
    fn test_cancel_flag() {
        let flag = CancelFlag::default();
        let shared = flag.clone();
        assert!(flag.check().is_ok());
        shared.cancel();
        assert_eq!(flag.check(), Err(SearchError::Cancelled));
    }
}
