//! # Configuration Module
//!
//! Loads the technology catalog that drives every search: the documentation
//! profiles, the topic correlation table and the scoring weights.
//!
//! The configuration is read once at startup and never mutated afterwards.
//! Any failure here is fatal since the engine cannot operate without its
//! catalog.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Static descriptor for one documentation set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TechnologyProfile {
    pub name: String,
    pub version: String,
    pub docs_path: PathBuf,
    #[serde(default)]
    pub categories: Vec<String>,
    pub file_extensions: Vec<String>,
}

/// Named weights used by the line scorer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    pub heading: f64,
    pub code: f64,
    pub content: f64,
    pub filename: f64,
    pub title: f64,
}

impl ScoreWeights {
    fn validate(&self) -> Result<()> {
        let weights = [
            ("heading", self.heading),
            ("code", self.code),
            ("content", self.content),
            ("filename", self.filename),
            ("title", self.title),
        ];
        for (name, value) in weights {
            if !value.is_finite() {
                bail!("Search weight '{name}' must be a finite number, got {value}");
            }
        }
        Ok(())
    }
}

/// Topic keyword to related technology ids
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CorrelationTable(HashMap<String, Vec<String>>);

impl CorrelationTable {
    pub fn new(entries: HashMap<String, Vec<String>>) -> Self {
        Self(
            entries
                .into_iter()
                .map(|(topic, techs)| (topic.to_lowercase(), techs))
                .collect(),
        )
    }

    /// Whether `technology` is correlated with any topic contained in the query
    pub fn correlates(&self, query_lower: &str, technology: &str) -> bool {
        self.0.iter().any(|(topic, techs)| {
            query_lower.contains(topic.as_str()) && techs.iter().any(|t| t == technology)
        })
    }

    pub fn topics(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

/// On-disk shape of the configuration document
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    technologies: BTreeMap<String, TechnologyProfile>,
    #[serde(default)]
    correlations: HashMap<String, Vec<String>>,
    search_weights: ScoreWeights,
}

/// Immutable configuration snapshot shared by the engine and the tools
#[derive(Debug, Clone)]
pub struct DocsConfig {
    technologies: BTreeMap<String, TechnologyProfile>,
    correlations: CorrelationTable,
    weights: ScoreWeights,
    base_dir: PathBuf,
}

impl DocsConfig {
    /// Default configuration location (`~/.fullstack-docs-mcp/technologies.json`)
    pub fn default_path() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .context("Failed to get home directory")?
            .join(".fullstack-docs-mcp")
            .join("technologies.json"))
    }

    /// Load the configuration file.
    ///
    /// Relative documentation paths resolve against `docs_root` when given,
    /// otherwise against the directory containing the configuration file.
    pub fn load(path: &Path, docs_root: Option<&Path>) -> Result<Self> {
        if !path.exists() {
            bail!("Configuration file not found: {}", path.display());
        }

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let base_dir = resolve_base_dir(path, docs_root)?;

        Self::from_json_str(&json, base_dir)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))
    }

    /// Parse a configuration document held in memory
    pub fn from_json_str(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let raw: RawConfig =
            serde_json::from_str(json).context("Failed to parse configuration JSON")?;

        if raw.technologies.is_empty() {
            bail!("Configuration declares no technologies");
        }
        for (id, profile) in &raw.technologies {
            if profile.file_extensions.is_empty() {
                bail!("Technology '{id}' declares no file extensions");
            }
        }
        raw.search_weights.validate()?;

        let correlations = CorrelationTable::new(raw.correlations);
        for (topic, techs) in correlations.topics() {
            for tech in techs {
                if !raw.technologies.contains_key(tech) {
                    tracing::warn!(
                        "Correlation topic '{}' references unknown technology '{}'",
                        topic,
                        tech
                    );
                }
            }
        }

        Ok(Self {
            technologies: raw.technologies,
            correlations,
            weights: raw.search_weights,
            base_dir: base_dir.into(),
        })
    }

    /// Configured technology ids in sorted order
    pub fn technology_ids(&self) -> impl Iterator<Item = &str> {
        self.technologies.keys().map(String::as_str)
    }

    pub fn technologies(&self) -> impl Iterator<Item = (&str, &TechnologyProfile)> {
        self.technologies.iter().map(|(id, p)| (id.as_str(), p))
    }

    pub fn profile(&self, technology: &str) -> Option<&TechnologyProfile> {
        self.technologies.get(technology)
    }

    pub fn categories(&self, technology: &str) -> &[String] {
        self.profile(technology)
            .map(|p| p.categories.as_slice())
            .unwrap_or(&[])
    }

    pub fn correlations(&self) -> &CorrelationTable {
        &self.correlations
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Absolute documentation root of a technology
    pub fn docs_root(&self, technology: &str) -> Option<PathBuf> {
        self.profile(technology).map(|p| {
            if p.docs_path.is_absolute() {
                p.docs_path.clone()
            } else {
                self.base_dir.join(&p.docs_path)
            }
        })
    }
}

/// Absolute directory that relative documentation paths resolve against
fn resolve_base_dir(config_path: &Path, docs_root: Option<&Path>) -> Result<PathBuf> {
    let base = match docs_root {
        Some(root) => root,
        None => match config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        },
    };
    std::path::absolute(base)
        .with_context(|| format!("Failed to resolve documentation root: {}", base.display()))
}
