//! Line relevance scoring
//!
//! ```text
//! score = base_weight(line) + exact_match_bonus + filename_bonus + title_bonus
//! ```
//!
//! All weights except the exact match bonus come from the catalog's
//! [`ScoreWeights`].

use crate::config::ScoreWeights;
use crate::search::config::EXACT_MATCH_BONUS;

/// Structural kind of a documentation line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading,
    Code,
    Content,
}

impl LineKind {
    /// Classify a raw line. A leading `#` wins over any backtick on the line.
    pub fn of(line: &str) -> Self {
        if line.starts_with('#') {
            LineKind::Heading
        } else if line.contains('`') {
            LineKind::Code
        } else {
            LineKind::Content
        }
    }

    fn weight(self, weights: &ScoreWeights) -> f64 {
        match self {
            LineKind::Heading => weights.heading,
            LineKind::Code => weights.code,
            LineKind::Content => weights.content,
        }
    }
}

/// Score a line already known to contain the query.
///
/// `query_lower` and `file_name_lower` must be lowercased by the caller.
pub fn score_line(
    line: &str,
    query_lower: &str,
    file_name_lower: &str,
    weights: &ScoreWeights,
) -> f64 {
    let kind = LineKind::of(line);
    let mut score = kind.weight(weights) + EXACT_MATCH_BONUS;

    if file_name_lower.contains(query_lower) {
        score += weights.filename;
    }

    if kind == LineKind::Heading && line.to_lowercase().contains(query_lower) {
        score += weights.title;
    }

    score
}
