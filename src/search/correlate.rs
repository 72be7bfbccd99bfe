//! Cross-technology correlation re-scoring

use std::collections::BTreeMap;

use crate::config::CorrelationTable;
use crate::search::config::CORRELATION_BONUS;
use crate::search::engine::{SearchMatch, rank};

/// Group matches by `(technology, category)`, boost groups whose technology
/// is correlated with a topic contained in the query, and re-rank.
pub fn correlate(
    matches: Vec<SearchMatch>,
    query: &str,
    table: &CorrelationTable,
) -> Vec<SearchMatch> {
    let query_lower = query.to_lowercase();

    let mut groups: BTreeMap<(String, Option<String>), Vec<SearchMatch>> = BTreeMap::new();
    for m in matches {
        groups
            .entry((m.technology.clone(), m.category.clone()))
            .or_default()
            .push(m);
    }

    let mut correlated = Vec::new();
    for ((technology, _), mut group) in groups {
        if table.correlates(&query_lower, &technology) {
            for m in &mut group {
                m.score *= CORRELATION_BONUS;
            }
        }
        correlated.extend(group);
    }

    rank(&mut correlated);
    correlated
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn table() -> CorrelationTable {
        CorrelationTable::new(HashMap::from([(
            "routing".to_string(),
            vec!["symfony".to_string(), "php".to_string()],
        )]))
    }

    fn sample(technology: &str, score: f64) -> SearchMatch {
        SearchMatch {
            technology: technology.to_string(),
            file: "x.md".to_string(),
            line: 1,
            content: "x".to_string(),
            category: None,
            score,
        }
    }

    #[test]
    fn test_correlated_technology_is_boosted() {
        let results = correlate(
            vec![sample("symfony", 3.0), sample("css", 4.0)],
            "Routing basics",
            &table(),
        );

        assert_eq!(results[0].technology, "css");
        assert_eq!(results[0].score, 4.0);
        assert_eq!(results[1].technology, "symfony");
        assert_eq!(results[1].score, 3.0 * 1.2);
    }

    #[test]
    fn test_boost_can_reorder() {
        let results = correlate(
            vec![sample("css", 3.5), sample("php", 3.0)],
            "routing",
            &table(),
        );

        assert_eq!(results[0].technology, "php");
    }

    #[test]
    fn test_no_topic_in_query_leaves_scores() {
        let results = correlate(vec![sample("symfony", 3.0)], "forms", &table());
        assert_eq!(results[0].score, 3.0);
    }
}
