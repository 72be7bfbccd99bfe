//! Recursive enumeration of documentation files
//!
//! The walker is re-run on every query, there is no caching. Unreadable
//! entries are logged and skipped so that one bad directory never hides the
//! rest of a corpus.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// List every file under `root` whose name ends with one of `extensions`.
///
/// A missing root yields an empty list. Entries are visited in file name
/// order so repeated calls on an unchanged tree return the same sequence.
/// Symbolic links are followed. A link that points back at one of its own
/// ancestors is reported as an error by walkdir, logged and skipped.
pub fn list_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if !root.is_dir() {
        return files;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                if has_extension(&entry.file_name().to_string_lossy(), extensions) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), e),
        }
    }

    files
}

fn has_extension(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}
