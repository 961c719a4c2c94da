//! WordNet lemmatizer.
//!
//! Only the parts of WordNet needed for morphological reduction are loaded:
//! the lemma column of `index.<pos>` and the irregular-form tables in
//! `<pos>.exc`. Reduction follows WordNet's "morphy" procedure:
//!
//! 1. irregular forms are looked up in the exception table;
//! 2. otherwise regular suffixes are detached (`-s`, `-ies`, `-ing`, …) and
//!    every candidate that exists in the index is kept;
//! 3. if nothing matched, detachment is repeated on the candidates until a
//!    match appears or no candidates are left.
//!
//! The lemmatizer returns the shortest surviving candidate, or the input
//! word unchanged when none survive.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use log::info;

use crate::{normalize::PartOfSpeech, resource::ResourceSource};

// ─────────────────────────────────────────────────────────────────────────────
// Detachment rules
// ─────────────────────────────────────────────────────────────────────────────

const NOUN_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const VERB_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ies", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJ_RULES: &[(&str, &str)] = &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")];

fn rules(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => NOUN_RULES,
        PartOfSpeech::Verb => VERB_RULES,
        PartOfSpeech::Adjective => ADJ_RULES,
        PartOfSpeech::Adverb => &[],
    }
}

/// WordNet file suffix for a part of speech (`index.noun`, `noun.exc`, …).
fn file_stem(pos: PartOfSpeech) -> &'static str {
    match pos {
        PartOfSpeech::Noun => "noun",
        PartOfSpeech::Verb => "verb",
        PartOfSpeech::Adjective => "adj",
        PartOfSpeech::Adverb => "adv",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Lexicon
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
struct Lexicon {
    lemmas: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

#[derive(Debug, Default, Clone)]
pub struct WordNetLemmatizer {
    lexicons: HashMap<PartOfSpeech, Lexicon>,
}

impl WordNetLemmatizer {
    /// Empty lemmatizer; every word is its own lemma until entries are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `index.*` and `*.exc` files from a WordNet package.
    ///
    /// Missing exception files are tolerated (some trimmed distributions omit
    /// them); missing index files are an error.
    pub fn load(source: &ResourceSource) -> Result<Self> {
        let mut wn = Self::new();
        for pos in PartOfSpeech::ALL {
            let stem = file_stem(pos);

            let index = source.read_to_string(&format!("index.{}", stem))?;
            for lemma in parse_index(&index) {
                wn.add_lemma(pos, lemma);
            }

            let exc_file = format!("{}.exc", stem);
            if source.contains(&exc_file) {
                let exc = source.read_to_string(&exc_file)?;
                for (form, bases) in parse_exceptions(&exc) {
                    wn.add_exception(pos, form, bases);
                }
            }
        }

        info!(
            "Loaded WordNet ({} lemmas, {} exceptions)",
            wn.lexicons.values().map(|l| l.lemmas.len()).sum::<usize>(),
            wn.lexicons.values().map(|l| l.exceptions.len()).sum::<usize>()
        );
        Ok(wn)
    }

    /// Register `lemma` as an index entry for `pos`.
    pub fn add_lemma(&mut self, pos: PartOfSpeech, lemma: &str) {
        self.lexicons.entry(pos).or_default().lemmas.insert(lemma.to_string());
    }

    /// Register an irregular form and its base forms for `pos`.
    pub fn add_exception<I, S>(&mut self, pos: PartOfSpeech, form: &str, bases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lexicons
            .entry(pos)
            .or_default()
            .exceptions
            .insert(form.to_string(), bases.into_iter().map(Into::into).collect());
    }

    /// `true` if `lemma` is an index entry for `pos`.
    pub fn contains(&self, pos: PartOfSpeech, lemma: &str) -> bool {
        self.lexicons.get(&pos).is_some_and(|l| l.lemmas.contains(lemma))
    }

    /// Reduce `word` to its base form for `pos`.
    pub fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        self.morphy(word, pos)
            .into_iter()
            .min_by_key(|lemma| lemma.chars().count())
            .unwrap_or_else(|| word.to_string())
    }

    /// All index lemmas `word` can be reduced to, in discovery order.
    pub fn morphy(&self, word: &str, pos: PartOfSpeech) -> Vec<String> {
        let Some(lexicon) = self.lexicons.get(&pos) else {
            return Vec::new();
        };

        let filter = |forms: &[String]| -> Vec<String> {
            let mut seen = HashSet::new();
            forms
                .iter()
                .filter(|f| lexicon.lemmas.contains(f.as_str()) && seen.insert(f.as_str()))
                .cloned()
                .collect()
        };

        if let Some(bases) = lexicon.exceptions.get(word) {
            let forms: Vec<String> =
                std::iter::once(word.to_string()).chain(bases.iter().cloned()).collect();
            return filter(&forms);
        }

        let mut forms = detach(&[word.to_string()], rules(pos));
        let first: Vec<String> = std::iter::once(word.to_string()).chain(forms.iter().cloned()).collect();
        let results = filter(&first);
        if !results.is_empty() {
            return results;
        }

        while !forms.is_empty() {
            forms = detach(&forms, rules(pos));
            let results = filter(&forms);
            if !results.is_empty() {
                return results;
            }
        }
        Vec::new()
    }
}

/// Apply every matching detachment rule to every form.
fn detach(forms: &[String], rules: &[(&str, &str)]) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            rules.iter().filter_map(move |(old, new)| {
                form.strip_suffix(old).map(|stem| format!("{}{}", stem, new))
            })
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// File parsers
// ─────────────────────────────────────────────────────────────────────────────

/// Lemma column of an `index.<pos>` file. License header lines start with a
/// space and are skipped.
fn parse_index(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .filter(|line| !line.starts_with(' '))
        .filter_map(|line| line.split_whitespace().next())
}

/// `(inflected, [base, …])` rows of a `<pos>.exc` file.
fn parse_exceptions(text: &str) -> impl Iterator<Item = (&str, Vec<&str>)> {
    text.lines().filter_map(|line| {
        let mut fields = line.split_whitespace();
        let form = fields.next()?;
        Some((form, fields.collect()))
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::PartOfSpeech::*;

    fn lemmatizer() -> WordNetLemmatizer {
        let mut wn = WordNetLemmatizer::new();
        for noun in ["cat", "church", "wolf", "woman", "city", "bus", "box", "glass"] {
            wn.add_lemma(Noun, noun);
        }
        for verb in ["run", "make", "study", "be", "walk"] {
            wn.add_lemma(Verb, verb);
        }
        for adj in ["big", "large", "good"] {
            wn.add_lemma(Adjective, adj);
        }
        wn.add_lemma(Adverb, "quickly");
        wn.add_exception(Verb, "ran", ["run"]);
        wn.add_exception(Verb, "was", ["be"]);
        wn.add_exception(Adjective, "better", ["good", "well"]);
        wn.add_exception(Noun, "geese", ["goose"]);
        wn
    }

    #[test]
    fn test_regular_nouns() {
        let wn = lemmatizer();
        assert_eq!(wn.lemmatize("cats", Noun), "cat");
        assert_eq!(wn.lemmatize("churches", Noun), "church");
        assert_eq!(wn.lemmatize("wolves", Noun), "wolf");
        assert_eq!(wn.lemmatize("women", Noun), "woman");
        assert_eq!(wn.lemmatize("cities", Noun), "city");
        assert_eq!(wn.lemmatize("boxes", Noun), "box");
    }

    #[test]
    fn test_word_already_lemma() {
        let wn = lemmatizer();
        assert_eq!(wn.lemmatize("cat", Noun), "cat");
        // "bus" is itself in the index, so "-s" is not stripped
        assert_eq!(wn.lemmatize("bus", Noun), "bus");
        assert_eq!(wn.lemmatize("glass", Noun), "glass");
    }

    #[test]
    fn test_verbs() {
        let wn = lemmatizer();
        assert_eq!(wn.lemmatize("running", Verb), "running"); // "runn" is not a lemma
        assert_eq!(wn.lemmatize("making", Verb), "make");
        assert_eq!(wn.lemmatize("studies", Verb), "study");
        assert_eq!(wn.lemmatize("walked", Verb), "walk");
    }

    #[test]
    fn test_exceptions() {
        let wn = lemmatizer();
        assert_eq!(wn.lemmatize("ran", Verb), "run");
        assert_eq!(wn.lemmatize("was", Verb), "be");
        // "well" is not in the adjective index, only "good" survives
        assert_eq!(wn.lemmatize("better", Adjective), "good");
        // exception bases missing from the index leave the word unchanged
        assert_eq!(wn.lemmatize("geese", Noun), "geese");
    }

    #[test]
    fn test_adjectives_and_adverbs() {
        let wn = lemmatizer();
        assert_eq!(wn.lemmatize("larger", Adjective), "large");
        assert_eq!(wn.lemmatize("largest", Adjective), "large");
        assert_eq!(wn.lemmatize("quickly", Adverb), "quickly");
        assert_eq!(wn.lemmatize("faster", Adverb), "faster");
    }

    #[test]
    fn test_unknown_words_pass_through() {
        let wn = lemmatizer();
        assert_eq!(wn.lemmatize("xyzzy", Noun), "xyzzy");
        assert_eq!(wn.lemmatize(".", Noun), ".");
        assert_eq!(wn.lemmatize("", Noun), "");
        assert_eq!(WordNetLemmatizer::new().lemmatize("cats", Noun), "cats");
    }

    #[test]
    fn test_morphy_repeats_detachment() {
        let mut wn = WordNetLemmatizer::new();
        wn.add_lemma(Noun, "glass");
        // "glasses" → "glasse" / "glass" on the first pass
        assert_eq!(wn.morphy("glasses", Noun), vec!["glass".to_string()]);
    }

    #[test]
    fn test_parse_files() {
        let index = "  1 This software and database is being provided\n\
                     cat n 8 7 @ ~ #m #p %p + ; - 8 1 02121620\n\
                     dog n 7 5 @ ~ #m #p %p 7 1 02084071\n";
        assert_eq!(parse_index(index).collect::<Vec<_>>(), vec!["cat", "dog"]);

        let exc = "geese goose\naxes ax axis\n\n";
        let rows: Vec<_> = parse_exceptions(exc).collect();
        assert_eq!(rows, vec![("geese", vec!["goose"]), ("axes", vec!["ax", "axis"])]);
    }

    #[test]
    fn test_load_package() {
        let dir = tempfile::tempdir().unwrap();
        for (file, body) in [
            ("index.noun", "cat n 1 0 1 0 02121620\n"),
            ("index.verb", "run v 1 0 1 0 01926311\n"),
            ("index.adj", "good a 1 0 1 0 01123148\n"),
            ("index.adv", "well r 1 0 1 0 00011093\n"),
            ("verb.exc", "ran run\n"),
        ] {
            std::fs::write(dir.path().join(file), body).unwrap();
        }

        let wn = WordNetLemmatizer::load(&ResourceSource::Dir(dir.path().to_path_buf())).unwrap();
        assert!(wn.contains(Noun, "cat"));
        assert!(wn.contains(Adverb, "well"));
        assert_eq!(wn.lemmatize("cats", Noun), "cat");
        assert_eq!(wn.lemmatize("ran", Verb), "run");
    }

    #[test]
    fn test_load_requires_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.noun"), "cat n 1 0 1 0 02121620\n").unwrap();
        assert!(WordNetLemmatizer::load(&ResourceSource::Dir(dir.path().to_path_buf())).is_err());
    }
}
