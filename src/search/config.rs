//! # Search Configuration Module
//!
//! Provides the fixed constants used by the search engine and its tools.
//! Tunable relevance weights live in the technology catalog instead, see
//! [`crate::config::ScoreWeights`].

/// Default limit for search results
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Maximum allowed limit for search results
pub const MAX_SEARCH_LIMIT: usize = 1000;

/// Maximum allowed query length in characters
pub const MAX_QUERY_LENGTH: usize = 1000;

/// Lines of context kept on each side of a matching line
pub const CONTEXT_LINES: usize = 3;

/// Bonus applied exactly once to every matching line
pub const EXACT_MATCH_BONUS: f64 = 1.0;

/// Score multiplier for matches of a technology correlated with the query topic
pub const CORRELATION_BONUS: f64 = 1.2;

/// Matches shown per technology in the Markdown cross reference report
pub const CROSS_REFERENCE_PER_TECH: usize = 3;

/// Default time budget for one search call, in seconds
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;
