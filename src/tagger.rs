//! Averaged-perceptron part-of-speech tagger.
//!
//! Reads the JSON model files of the `averaged_perceptron_tagger_eng` data
//! package and assigns Penn Treebank tags. Each package holds three files,
//! all prefixed by the package name:
//!
//! | File                 | Content                                   |
//! |----------------------|-------------------------------------------|
//! | `*.weights.json`     | `{feature: {tag: weight}}`                |
//! | `*.tagdict.json`     | `{word: tag}` for unambiguous words       |
//! | `*.classes.json`     | `[tag, …]`                                |
//!
//! Tagging is greedy left-to-right: unambiguous words come straight from the
//! tag dictionary; every other word is scored against its context features
//! and the best-scoring class wins.

use std::collections::HashMap;

use anyhow::{Context, Result};
use log::info;

use crate::{error::ResourceError, resource::ResourceSource};

/// Left padding of the context window.
const START: [&str; 2] = ["-START-", "-START2-"];
/// Right padding of the context window.
const END: [&str; 2] = ["-END-", "-END2-"];

/// Feature → (tag → weight).
pub type Weights = HashMap<String, HashMap<String, f64>>;

#[derive(Debug)]
pub struct PerceptronTagger {
    weights: Weights,
    tagdict: HashMap<String, String>,
    classes: Vec<String>,
}

impl PerceptronTagger {
    /// Build a tagger from already-loaded model parts.
    ///
    /// `classes` is sorted so tie-breaking does not depend on input order.
    pub fn from_parts(
        weights: Weights,
        tagdict: HashMap<String, String>,
        mut classes: Vec<String>,
    ) -> Self {
        classes.sort();
        classes.dedup();
        Self { weights, tagdict, classes }
    }

    /// Load a tagger package, e.g. the one found at
    /// `taggers/averaged_perceptron_tagger_eng`.
    ///
    /// `name` is the file prefix inside the package (normally the package
    /// name itself).
    pub fn load(source: &ResourceSource, name: &str) -> Result<Self> {
        let weights: Weights = read_json(source, &format!("{}.weights.json", name))?;
        let tagdict: HashMap<String, String> =
            read_json(source, &format!("{}.tagdict.json", name))?;
        let classes: Vec<String> = read_json(source, &format!("{}.classes.json", name))?;

        if classes.is_empty() {
            return Err(ResourceError::Malformed {
                resource: name.to_string(),
                reason: "tagger has no classes".to_string(),
            }
            .into());
        }

        info!(
            "Loaded tagger '{}' ({} features, {} dictionary words, {} tags)",
            name,
            weights.len(),
            tagdict.len(),
            classes.len()
        );
        Ok(Self::from_parts(weights, tagdict, classes))
    }

    /// All tags this model can produce.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Tag each token; output is parallel to `tokens`.
    pub fn tag(&self, tokens: &[String]) -> Vec<(String, String)> {
        let context: Vec<String> = START
            .iter()
            .map(|s| s.to_string())
            .chain(tokens.iter().map(|w| normalize(w)))
            .chain(END.iter().map(|s| s.to_string()))
            .collect();

        let mut prev = START[0].to_string();
        let mut prev2 = START[1].to_string();
        let mut output = Vec::with_capacity(tokens.len());

        for (i, word) in tokens.iter().enumerate() {
            let tag = match self.tagdict.get(word) {
                Some(tag) => tag.clone(),
                None => {
                    let features = features(i, word, &context, &prev, &prev2);
                    self.predict(&features)
                }
            };
            output.push((word.clone(), tag.clone()));
            prev2 = std::mem::replace(&mut prev, tag);
        }
        output
    }

    /// Highest-scoring class; ties go to the alphabetically greatest tag.
    fn predict(&self, features: &HashMap<String, i32>) -> String {
        let mut scores: HashMap<&str, f64> = HashMap::new();
        for (feat, &value) in features {
            if value == 0 {
                continue;
            }
            let Some(weights) = self.weights.get(feat) else {
                continue;
            };
            for (label, weight) in weights {
                *scores.entry(label.as_str()).or_insert(0.0) += value as f64 * weight;
            }
        }

        let score = |label: &str| scores.get(label).copied().unwrap_or(0.0);
        self.classes
            .iter()
            .max_by(|a, b| {
                score(a)
                    .partial_cmp(&score(b))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.cmp(b))
            })
            .cloned()
            .unwrap_or_default()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(source: &ResourceSource, file: &str) -> Result<T> {
    let text = source.read_to_string(file)?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse tagger file '{}'", file))
}

// ─────────────────────────────────────────────────────────────────────────────
// Features
// ─────────────────────────────────────────────────────────────────────────────

/// Collapse open-class shapes the model has no use for distinguishing.
fn normalize(word: &str) -> String {
    if word.contains('-') && !word.starts_with('-') {
        "!HYPHEN".to_string()
    } else if word.chars().count() == 4 && word.chars().all(char::is_numeric) {
        "!YEAR".to_string()
    } else if word.chars().next().is_some_and(char::is_numeric) {
        "!DIGITS".to_string()
    } else {
        word.to_lowercase()
    }
}

/// Last (up to) three characters.
fn suffix(word: &str) -> &str {
    match word.char_indices().rev().nth(2) {
        Some((idx, _)) => &word[idx..],
        None => word,
    }
}

fn features(
    i: usize,
    word: &str,
    context: &[String],
    prev: &str,
    prev2: &str,
) -> HashMap<String, i32> {
    let mut features = HashMap::new();
    let mut add = |parts: &[&str]| {
        *features.entry(parts.join(" ")).or_insert(0) += 1;
    };

    let i = i + START.len();
    let first = word.chars().next().map(String::from).unwrap_or_default();

    add(&["bias"]);
    add(&["i suffix", suffix(word)]);
    add(&["i pref1", first.as_str()]);
    add(&["i-1 tag", prev]);
    add(&["i-2 tag", prev2]);
    add(&["i tag+i-2 tag", prev, prev2]);
    add(&["i word", context[i].as_str()]);
    add(&["i-1 tag+i word", prev, context[i].as_str()]);
    add(&["i-1 word", context[i - 1].as_str()]);
    add(&["i-1 suffix", suffix(&context[i - 1])]);
    add(&["i-2 word", context[i - 2].as_str()]);
    add(&["i+1 word", context[i + 1].as_str()]);
    add(&["i+1 suffix", suffix(&context[i + 1])]);
    add(&["i+2 word", context[i + 2].as_str()]);

    features
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
