//! # tweetprep
//!
//! Two small text-normalisation utilities for an NLP pipeline.
//!
//! ## Sentence normaliser
//!
//! Tokenises a sentence, tags every token with its part of speech, reduces
//! each token to its dictionary form and lowercases it:
//!
//! ```no_run
//! use tweetprep::{Toolkit, ToolkitConfig};
//!
//! // Looks for `taggers/averaged_perceptron_tagger_eng` and `corpora/wordnet`
//! // under $NLTK_DATA, ~/nltk_data and the usual system locations.
//! let toolkit = Toolkit::load(&ToolkitConfig::default()).unwrap();
//! let lemmas = toolkit.preprocess("The striped bats were hanging on their feet.").unwrap();
//! ```
//!
//! Any other tokenizer / tagger / lemmatizer can be plugged in by
//! implementing [`LinguisticToolkit`] and calling [`preprocess_sentence`].
//!
//! ## Corpus cleaner
//!
//! Cleans a file of `"<user> <tweet>"` lines:
//!
//! ```no_run
//! use std::path::Path;
//!
//! tweetprep::preprocess_tweet_file(Path::new("tweets.txt"), Path::new("tweets.clean.txt")).unwrap();
//! ```
//!
//! ## Pipeline (cleaner)
//! 1. **Prefix removal** — the first space-delimited field is dropped.
//! 2. **Deduplication** — repeated lines are removed.
//! 3. **HTML unescape** — `&amp;`, `&#39;`, … decoded.
//! 4. **Rule table** — 13 ordered regex substitutions strip hashtags,
//!    mentions, phone numbers, addresses, URLs, non-ASCII, numbers and hyphens.
//! 5. **Trim + dedup + drop blanks** — then written one line per record.

pub mod clean;
pub mod config;
pub mod error;
pub mod normalize;
pub mod resource;
pub mod tagger;
pub mod tokenize;
pub mod toolkit;
pub mod wordnet;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use clean::{clean_lines, preprocess_tweet_file, re_sub_by_rules};
pub use config::ToolkitConfig;
pub use error::ResourceError;
pub use normalize::{preprocess_sentence, PartOfSpeech};
pub use toolkit::{LinguisticToolkit, Toolkit};
