//! Technology detection for editor integrations
//!
//! Maps an editor language id and file name to the technology whose
//! documentation is most likely relevant. Kept apart from the search engine:
//! callers use the result as the `technology` filter of a search.

/// Editor language id to technology id
const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("php", "php"),
    ("javascript", "javascript"),
    ("typescript", "javascript"),
    ("html", "html"),
    ("css", "css"),
    ("scss", "css"),
    ("sass", "css"),
    ("sql", "mysql"),
    ("yaml", "symfony"),
];

/// File name fragments that mark a PHP file as Symfony code
const SYMFONY_PATTERNS: &[&str] = &["Controller", "Entity", "Repository", "Service", "Command"];

/// Ordered heuristics, checked before the language table
const HEURISTICS: &[fn(&str, &str) -> Option<&'static str>] = &[webpack_config, symfony_class];

fn webpack_config(language: &str, filename: &str) -> Option<&'static str> {
    (matches!(language, "json" | "yaml") && filename.contains("webpack")).then_some("webpack")
}

fn symfony_class(language: &str, filename: &str) -> Option<&'static str> {
    (language == "php" && SYMFONY_PATTERNS.iter().any(|p| filename.contains(p)))
        .then_some("symfony")
}

/// Detect the technology for a file open in an editor
pub fn detect_technology(language_id: &str, filename: &str) -> Option<&'static str> {
    let language = language_id.to_lowercase();

    HEURISTICS
        .iter()
        .find_map(|heuristic| heuristic(&language, filename))
        .or_else(|| {
            LANGUAGE_TABLE
                .iter()
                .find(|(lang, _)| *lang == language)
                .map(|(_, tech)| *tech)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_table() {
        assert_eq!(detect_technology("typescript", "app.ts"), Some("javascript"));
        assert_eq!(detect_technology("scss", "main.scss"), Some("css"));
        assert_eq!(detect_technology("sql", "schema.sql"), Some("mysql"));
        assert_eq!(detect_technology("yaml", "services.yaml"), Some("symfony"));
        assert_eq!(detect_technology("php", "index.php"), Some("php"));
    }

    #[test]
    fn test_filename_heuristics() {
        assert_eq!(
            detect_technology("php", "src/Controller/BlogController.php"),
            Some("symfony")
        );
        assert_eq!(detect_technology("json", "webpack.config.json"), Some("webpack"));
        assert_eq!(detect_technology("yaml", "webpack.yaml"), Some("webpack"));
    }

    #[test]
    fn test_unknown_language() {
        assert_eq!(detect_technology("json", "package.json"), None);
        assert_eq!(detect_technology("rust", "main.rs"), None);
    }
}
