//! Toolkit configuration.
//!
//! Mirrors how NLTK finds its data: explicit roots first, then the
//! `NLTK_DATA` environment variable, then the conventional install
//! locations. Every field has a default, so an empty JSON object `{}` is a
//! valid config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default tagger package (under `taggers/`).
pub const DEFAULT_TAGGER: &str = "averaged_perceptron_tagger_eng";

/// Default WordNet package (under `corpora/`).
pub const DEFAULT_WORDNET: &str = "wordnet";

/// Default sentence-splitter package (under `tokenizers/`). Optional.
pub const DEFAULT_PUNKT: &str = "punkt_tab";

/// Default Punkt language directory.
pub const DEFAULT_LANGUAGE: &str = "english";

/// Environment variable holding extra data roots.
pub const DATA_ENV_VAR: &str = "NLTK_DATA";

/// Conventional data roots searched after the explicit ones.
const STANDARD_ROOTS: &[&str] = &[
    "/usr/share/nltk_data",
    "/usr/local/share/nltk_data",
    "/usr/lib/nltk_data",
    "/usr/local/lib/nltk_data",
];

/// Deserialised toolkit config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Extra data roots, searched before anything else.
    pub data_paths: Vec<PathBuf>,

    /// Tagger package name inside `taggers/`.
    pub tagger: String,

    /// WordNet package name inside `corpora/`.
    pub wordnet: String,

    /// Punkt package name inside `tokenizers/`; built-in rules when absent.
    pub punkt: String,

    /// Language directory inside the Punkt package.
    pub language: String,

    /// Append `NLTK_DATA` entries and the standard roots to the search list.
    pub use_env: bool,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            data_paths: Vec::new(),
            tagger: DEFAULT_TAGGER.to_string(),
            wordnet: DEFAULT_WORDNET.to_string(),
            punkt: DEFAULT_PUNKT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            use_env: true,
        }
    }
}

impl ToolkitConfig {
    /// Parse a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Cannot read config: {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// A config that searches only `root`.
    pub fn with_data_dir(root: impl Into<PathBuf>) -> Self {
        Self {
            data_paths: vec![root.into()],
            use_env: false,
            ..Self::default()
        }
    }

    /// Final ordered list of data roots.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let mut paths = self.data_paths.clone();
        if !self.use_env {
            return paths;
        }

        if let Some(env) = std::env::var_os(DATA_ENV_VAR) {
            paths.extend(std::env::split_paths(&env).filter(|p| !p.as_os_str().is_empty()));
        }
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(home).join("nltk_data"));
        }
        paths.extend(STANDARD_ROOTS.iter().map(PathBuf::from));
        paths
    }
}
