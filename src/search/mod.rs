//! # Search Module
//!
//! Line-level substring search over the documentation corpora described by
//! the technology catalog.
//!
//! ## Key Components
//!
//! - [`engine`] - Corpus scan, context windows, ranking and truncation
//! - [`scoring`] - Per-line relevance score from the configured weights
//! - [`correlate`] - Cross-technology re-scoring from the correlation table
//! - [`tools`] - MCP tool implementations for search operations
//! - [`outputs`] - Markdown/JSON renderings of search results
//! - [`config`] - Constants for search functionality

pub mod config;
pub mod correlate;
pub mod engine;
pub mod outputs;
pub mod scoring;
pub mod tools;

pub use engine::{CancelFlag, SearchEngine, SearchError, SearchMatch, SearchOptions};
pub use tools::SearchTools;
