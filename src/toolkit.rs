//! Linguistic toolkit seam.
//!
//! The sentence normaliser only needs three operations from a toolkit:
//! tokenise, tag and lemmatise. [`LinguisticToolkit`] names exactly those so
//! any equivalent implementation can be swapped in; [`Toolkit`] is the
//! default one built from this crate's tokenizer, perceptron tagger and
//! WordNet lemmatizer. A `punkt_tab` package, when installed, supplies the
//! sentence splitter's tables.

use anyhow::{Context, Result};
use log::info;

use crate::{
    config::ToolkitConfig,
    normalize::{preprocess_sentence, PartOfSpeech},
    resource::find_resource,
    tagger::PerceptronTagger,
    tokenize::SentenceSplitter,
    wordnet::WordNetLemmatizer,
};

pub trait LinguisticToolkit {
    /// Split text into word-level tokens.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;

    /// Assign one fine-grained (Penn Treebank) tag per token.
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, String)>>;

    /// Reduce `word` to its dictionary form for `pos`.
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> Result<String>;
}

/// Tokenizer + perceptron tagger + WordNet lemmatizer.
pub struct Toolkit {
    splitter: SentenceSplitter,
    tagger: PerceptronTagger,
    lemmatizer: WordNetLemmatizer,
}

impl Toolkit {
    /// Locate and load the tagger and WordNet packages named in `config`.
    pub fn load(config: &ToolkitConfig) -> Result<Self> {
        let paths = config.search_paths();

        let tagger_src = find_resource(&paths, "taggers", &config.tagger)?;
        let tagger = PerceptronTagger::load(&tagger_src, &config.tagger)
            .with_context(|| format!("Failed to load tagger '{}'", config.tagger))?;

        let wordnet_src = find_resource(&paths, "corpora", &config.wordnet)?;
        let lemmatizer = WordNetLemmatizer::load(&wordnet_src)
            .with_context(|| format!("Failed to load WordNet '{}'", config.wordnet))?;

        let splitter = match find_resource(&paths, "tokenizers", &config.punkt) {
            Ok(src) => SentenceSplitter::from_punkt(&src, &config.language)
                .with_context(|| format!("Failed to load Punkt '{}'", config.punkt))?,
            Err(_) => {
                info!("No '{}' package, using built-in sentence rules", config.punkt);
                SentenceSplitter::default()
            }
        };

        info!("Toolkit ready");
        Ok(Self::from_parts(tagger, lemmatizer).with_splitter(splitter))
    }

    /// Assemble a toolkit from in-memory models, with built-in sentence rules.
    pub fn from_parts(tagger: PerceptronTagger, lemmatizer: WordNetLemmatizer) -> Self {
        Self {
            splitter: SentenceSplitter::default(),
            tagger,
            lemmatizer,
        }
    }

    /// Replace the sentence splitter.
    pub fn with_splitter(mut self, splitter: SentenceSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Shorthand for [`preprocess_sentence`] with this toolkit.
    pub fn preprocess(&self, sentence: &str) -> Result<Vec<String>> {
        preprocess_sentence(self, sentence)
    }
}

impl LinguisticToolkit for Toolkit {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.splitter.word_tokenize(text))
    }

    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, String)>> {
        Ok(self.tagger.tag(tokens))
    }

    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> Result<String> {
        Ok(self.lemmatizer.lemmatize(word, pos))
    }
}
