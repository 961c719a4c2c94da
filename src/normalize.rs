//! Sentence normaliser — tokens → lowercase lemmas.
//!
//! ```no_run
//! use tweetprep::{preprocess_sentence, Toolkit, ToolkitConfig};
//!
//! let toolkit = Toolkit::load(&ToolkitConfig::default()).unwrap();
//! let lemmas = preprocess_sentence(&toolkit, "The cats were running home.").unwrap();
//! // ["the", "cat", "be", "run", "home", "."]
//! ```

use anyhow::{bail, Result};

use crate::toolkit::LinguisticToolkit;

/// Coarse part of speech used to pick lemmatisation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Adjective,
    Verb,
    Noun,
    Adverb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// Map a Penn Treebank tag by its first letter; unknown tags are nouns.
    pub fn from_treebank(tag: &str) -> Self {
        match tag.chars().next() {
            Some('J') => PartOfSpeech::Adjective,
            Some('V') => PartOfSpeech::Verb,
            Some('N') => PartOfSpeech::Noun,
            Some('R') => PartOfSpeech::Adverb,
            _ => PartOfSpeech::Noun,
        }
    }
}

/// Tokenise, tag, lemmatise and lowercase `sentence`.
///
/// The result has exactly one entry per token, in token order.
pub fn preprocess_sentence<T>(toolkit: &T, sentence: &str) -> Result<Vec<String>>
where
    T: LinguisticToolkit + ?Sized,
{
    let tokens = toolkit.tokenize(sentence)?;
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let tagged = toolkit.tag(&tokens)?;
    if tagged.len() != tokens.len() {
        bail!("tagger returned {} tags for {} tokens", tagged.len(), tokens.len());
    }
    tagged
        .iter()
        .map(|(token, tag)| -> Result<String> {
            let lemma = toolkit.lemmatize(token, PartOfSpeech::from_treebank(tag))?;
            Ok(lemma.to_lowercase())
        })
        .collect()
}
