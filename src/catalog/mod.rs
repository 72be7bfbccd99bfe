//! # Catalog Module
//!
//! Pure lookups over the technology catalog, plus a per-technology status
//! report of the documentation on disk.

pub mod outputs;
pub mod tools;

use std::fs;

use chrono::{DateTime, Utc};

use crate::catalog::outputs::TechnologyStatus;
use crate::config::DocsConfig;
use crate::util::format_bytes;
use crate::walker;

pub use tools::CatalogTools;

/// Inspect the documentation root of one technology.
///
/// Returns `None` for an unknown technology id.
pub fn technology_status(config: &DocsConfig, technology: &str) -> Option<TechnologyStatus> {
    let profile = config.profile(technology)?;
    let root = config.docs_root(technology)?;

    let files = walker::list_files(&root, &profile.file_extensions);
    let mut size_bytes = 0u64;
    let mut last_modified: Option<DateTime<Utc>> = None;

    for file in &files {
        let Ok(metadata) = fs::metadata(file) else {
            continue;
        };
        size_bytes += metadata.len();
        if let Ok(modified) = metadata.modified() {
            let modified = DateTime::<Utc>::from(modified);
            if last_modified.is_none_or(|latest| modified > latest) {
                last_modified = Some(modified);
            }
        }
    }

    Some(TechnologyStatus {
        technology: technology.to_string(),
        name: profile.name.clone(),
        version: profile.version.clone(),
        docs_path: root.display().to_string(),
        exists: root.is_dir(),
        file_count: files.len(),
        size_bytes,
        size: format_bytes(size_bytes),
        last_modified,
    })
}

/// Status of every configured technology, in id order
pub fn corpus_status(config: &DocsConfig) -> Vec<TechnologyStatus> {
    config
        .technology_ids()
        .filter_map(|id| technology_status(config, id))
        .collect()
}
