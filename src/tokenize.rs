//! Word tokeniser — Penn Treebank conventions.
//!
//! Text is first split into sentences, then every sentence goes through an
//! ordered list of regex padding rules and is finally split on whitespace.
//! The rules follow the Treebank conventions used by most English taggers:
//!
//! - punctuation is separated from words, but a period is split off only at
//!   the end of a sentence (`"Mr."` and `"3.5"` stay intact);
//! - double quotes become ``` `` ``` / `''`;
//! - clitics are split off (`"don't"` → `"do"`, `"n't"`);
//! - a few fused forms are split (`"cannot"` → `"can"`, `"not"`).

use std::collections::HashSet;

use anyhow::Result;
use fancy_regex::Regex;
use log::info;
use once_cell::sync::Lazy;

use crate::resource::ResourceSource;

// ─────────────────────────────────────────────────────────────────────────────
// Padding rules (applied in order)
// ─────────────────────────────────────────────────────────────────────────────

fn compile(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, repl)| (Regex::new(pattern).unwrap(), *repl))
        .collect()
}

static STARTING_QUOTES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile(&[
        (r"([«“‘„]|[`]+)", " $1 "),
        (r#"^""#, "``"),
        (r"(``)", " $1 "),
        (r#"([ (\[{<])("|'{2})"#, "$1 `` "),
        (r"(?i)(')(?!re|ve|ll|m|t|s|d|n)(\w)\b", "$1 $2"),
    ])
});

static PUNCTUATION: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile(&[
        // final period, keeping trailing closers together
        (r#"([^.])(\.)([\])}>"'»”’ ]*)\s*$"#, "$1 $2 $3 "),
        (r"([:,])([^\d])", " $1 $2"),
        (r"([:,])$", " $1 "),
        (r"\.{2,}", " $0 "),
        (r"[;@#$%&]", " $0 "),
        (r#"([^.])(\.)([\])}>"'»”’ ]*)\s*$"#, "$1 $2$3 "),
        (r"[?!]", " $0 "),
        (r"([^'])' ", "$1 ' "),
        (r"[*]", " $0 "),
    ])
});

static PARENS_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\]\[(){}<>]").unwrap());
static DOUBLE_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"--").unwrap());

static ENDING_QUOTES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile(&[
        (r"([»”’])", " $1 "),
        (r"''", " '' "),
        (r#"""#, " '' "),
        (r"\s+", " "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
    ])
});

static CONTRACTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    compile(&[
        (r"(?i)\b(can)(not)\b", " $1 $2 "),
        (r"(?i)\b(d)('ye)\b", " $1 $2 "),
        (r"(?i)\b(gim)(me)\b", " $1 $2 "),
        (r"(?i)\b(gon)(na)\b", " $1 $2 "),
        (r"(?i)\b(got)(ta)\b", " $1 $2 "),
        (r"(?i)\b(lem)(me)\b", " $1 $2 "),
        (r"(?i)\b(more)('n)\b", " $1 $2 "),
        (r"(?i)\b(wan)(na)(?=\s)", " $1 $2 "),
        (r"(?i) ('t)(is)\b", " $1 $2 "),
        (r"(?i) ('t)(was)\b", " $1 $2 "),
    ])
});

fn apply(rules: &[(Regex, &'static str)], text: String) -> String {
    rules.iter().fold(text, |acc, (re, repl)| re.replace_all(&acc, *repl).into_owned())
}

/// Tokenise a single sentence.
pub fn treebank_tokenize(sentence: &str) -> Vec<String> {
    let mut text = apply(&STARTING_QUOTES, sentence.to_string());
    text = apply(&PUNCTUATION, text);
    text = PARENS_BRACKETS.replace_all(&text, " $0 ").into_owned();
    text = DOUBLE_DASHES.replace_all(&text, " -- ").into_owned();

    // pad so the clitic rules can rely on a trailing space
    text = format!(" {} ", text);
    text = apply(&ENDING_QUOTES, text);
    text = apply(&CONTRACTIONS, text);

    text.split_whitespace().map(str::to_string).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Sentence splitting
// ─────────────────────────────────────────────────────────────────────────────

/// Words that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd",
    "co", "corp", "dept", "univ", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
    "sep", "sept", "oct", "nov", "dec", "no", "fig", "gen", "gov", "sen", "rep",
    "e.g", "i.e", "u.s", "a.m", "p.m",
];

const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '’', '”', '»'];

static NUMBER_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[.,]?\d[\d,.-]*\.?$").unwrap());

static DEFAULT_SPLITTER: Lazy<SentenceSplitter> = Lazy::new(SentenceSplitter::default);

/// Punkt word type: lowercased, with every number collapsed to one type.
fn token_type(word: &str) -> String {
    let lower = word.to_lowercase();
    if NUMBER_TYPE.is_match(&lower).unwrap_or(false) {
        "##number##".to_string()
    } else {
        lower
    }
}

fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Sentence boundary detector.
///
/// The default instance knows a fixed list of English abbreviations.
/// [`SentenceSplitter::from_punkt`] replaces it with the tables of a trained
/// Punkt model, which adds collocations (`"chap. IV"`) and frequent sentence
/// starters that force a break even after an abbreviation.
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: HashSet<String>,
    collocations: HashSet<(String, String)>,
    sent_starters: HashSet<String>,
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
            collocations: HashSet::new(),
            sent_starters: HashSet::new(),
        }
    }
}

impl SentenceSplitter {
    /// Load the `<language>/` tables of a `punkt_tab` package.
    ///
    /// `abbrev_types.txt` is required; `collocations.tab` and
    /// `sent_starters.txt` are read when present.
    pub fn from_punkt(source: &ResourceSource, language: &str) -> Result<Self> {
        let abbrev = source.read_to_string(&format!("{}/abbrev_types.txt", language))?;
        let abbreviations = non_empty_lines(&abbrev).map(str::to_string).collect();

        let mut collocations = HashSet::new();
        let colloc_file = format!("{}/collocations.tab", language);
        if source.contains(&colloc_file) {
            let text = source.read_to_string(&colloc_file)?;
            collocations.extend(non_empty_lines(&text).filter_map(|line| {
                let (first, second) = line.split_once('\t')?;
                Some((first.to_string(), second.to_string()))
            }));
        }

        let mut sent_starters = HashSet::new();
        let starters_file = format!("{}/sent_starters.txt", language);
        if source.contains(&starters_file) {
            let text = source.read_to_string(&starters_file)?;
            sent_starters.extend(non_empty_lines(&text).map(str::to_string));
        }

        let splitter = Self {
            abbreviations,
            collocations,
            sent_starters,
        };
        info!(
            "Loaded Punkt '{}' ({} abbreviations, {} collocations, {} sentence starters)",
            language,
            splitter.abbreviations.len(),
            splitter.collocations.len(),
            splitter.sent_starters.len()
        );
        Ok(splitter)
    }

    /// `true` if the period after `word` does not end the sentence when
    /// `next` follows.
    fn period_continues(&self, word: &str, next: &str) -> bool {
        let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
        let next = next.trim_matches(|c: char| !c.is_alphanumeric());
        let typ = token_type(word);
        let next_typ = token_type(next);

        if self.collocations.contains(&(typ.clone(), next_typ.clone())) {
            return true;
        }
        // single-letter initial, e.g. "J. Smith"
        let initial = word.chars().count() == 1 && word.chars().all(char::is_alphabetic);
        (initial || self.abbreviations.contains(&typ)) && !self.sent_starters.contains(&next_typ)
    }

    /// Split `text` into sentences.
    ///
    /// A sentence ends at `.`, `!` or `?` (plus any closing quotes/brackets)
    /// followed by whitespace, unless the next word starts with a lowercase
    /// letter or the terminator is the period of an abbreviation, an initial
    /// or the first half of a collocation.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];
            if !matches!(c, '.' | '!' | '?') {
                i += 1;
                continue;
            }

            // Swallow a run of terminators and closers.
            let mut j = i + 1;
            while j < chars.len()
                && (matches!(chars[j].1, '.' | '!' | '?') || CLOSERS.contains(&chars[j].1))
            {
                j += 1;
            }
            let end = chars.get(j).map_or(text.len(), |&(p, _)| p);

            // Must be followed by whitespace (or the end of text).
            if j < chars.len() && !chars[j].1.is_whitespace() {
                i = j;
                continue;
            }
            let mut k = j;
            while k < chars.len() && chars[k].1.is_whitespace() {
                k += 1;
            }
            if k >= chars.len() {
                break;
            }
            if chars[k].1.is_lowercase() {
                i = k;
                continue;
            }
            if c == '.' && j == i + 1 {
                let word = text[start..pos].split_whitespace().last().unwrap_or("");
                let next = text[chars[k].0..].split_whitespace().next().unwrap_or("");
                if self.period_continues(word, next) {
                    i = k;
                    continue;
                }
            }

            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = chars[k].0;
            i = k;
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail);
        }
        sentences
    }

    /// Sentence split, then Treebank rules per sentence.
    pub fn word_tokenize(&self, text: &str) -> Vec<String> {
        self.split(text)
            .into_iter()
            .flat_map(treebank_tokenize)
            .collect()
    }
}

/// [`SentenceSplitter::split`] with the built-in abbreviation list.
pub fn split_sentences(text: &str) -> Vec<&str> {
    DEFAULT_SPLITTER.split(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public entry point
// ─────────────────────────────────────────────────────────────────────────────

/// Full tokenisation with the built-in sentence rules.
pub fn word_tokenize(text: &str) -> Vec<String> {
    DEFAULT_SPLITTER.word_tokenize(text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        word_tokenize(text)
    }

    #[test]
    fn test_empty_input() {
        assert!(toks("").is_empty());
        assert!(toks("   \n\t").is_empty());
    }

    #[test]
    fn test_final_period_and_comma() {
        assert_eq!(toks("Hello, world."), vec!["Hello", ",", "world", "."]);
    }

    #[test]
    fn test_clitics() {
        assert_eq!(toks("I don't know"), vec!["I", "do", "n't", "know"]);
        assert_eq!(toks("She's here"), vec!["She", "'s", "here"]);
        assert_eq!(toks("we'll see"), vec!["we", "'ll", "see"]);
    }

    #[test]
    fn test_fused_contractions() {
        assert_eq!(toks("I cannot go"), vec!["I", "can", "not", "go"]);
        assert_eq!(toks("gonna win"), vec!["gon", "na", "win"]);
    }

    #[test]
    fn test_quotes() {
        assert_eq!(
            toks("\"Hi\" she said"),
            vec!["``", "Hi", "''", "she", "said"]
        );
    }

    #[test]
    fn test_numbers_and_inner_periods_kept() {
        assert_eq!(toks("It costs 3.5 dollars"), vec!["It", "costs", "3.5", "dollars"]);
        assert_eq!(toks("Ratio 1,000 to 1"), vec!["Ratio", "1,000", "to", "1"]);
    }

    #[test]
    fn test_symbols_and_brackets() {
        assert_eq!(toks("(a) & b!"), vec!["(", "a", ")", "&", "b", "!"]);
        assert_eq!(toks("wait -- what?"), vec!["wait", "--", "what", "?"]);
    }

    #[test]
    fn test_final_period_before_curly_closers() {
        assert_eq!(toks("He said “hi.”"), vec!["He", "said", "“", "hi", ".", "”"]);
        assert_eq!(toks("Yes.’"), vec!["Yes", ".", "’"]);
        assert_eq!(toks("ok.»"), vec!["ok", ".", "»"]);
    }

    #[test]
    fn test_ellipsis_padded() {
        assert_eq!(toks("so... yes"), vec!["so", "...", "yes"]);
    }

    #[test]
    fn test_sentence_split() {
        assert_eq!(
            split_sentences("The cat sat. The dog ran! Did it?"),
            vec!["The cat sat.", "The dog ran!", "Did it?"]
        );
    }

    #[test]
    fn test_sentence_split_abbreviations() {
        assert_eq!(
            split_sentences("Mr. Smith went home. He slept."),
            vec!["Mr. Smith went home.", "He slept."]
        );
        assert_eq!(split_sentences("J. R. wrote it."), vec!["J. R. wrote it."]);
        assert_eq!(split_sentences("Use e.g. this one."), vec!["Use e.g. this one."]);
    }

    fn punkt_splitter(files: &[(&str, &str)]) -> SentenceSplitter {
        let dir = tempfile::tempdir().unwrap();
        let lang = dir.path().join("english");
        std::fs::create_dir_all(&lang).unwrap();
        for (name, body) in files {
            std::fs::write(lang.join(name), body).unwrap();
        }
        SentenceSplitter::from_punkt(&ResourceSource::Dir(dir.path().to_path_buf()), "english")
            .unwrap()
    }

    #[test]
    fn test_punkt_abbreviations_replace_builtin_list() {
        let text = "It costs approx. Ten dollars. Mr. Smith paid.";
        assert_eq!(
            split_sentences(text),
            vec!["It costs approx.", "Ten dollars.", "Mr. Smith paid."]
        );

        let punkt = punkt_splitter(&[("abbrev_types.txt", "approx\nmr\n")]);
        assert_eq!(punkt.split(text), vec!["It costs approx. Ten dollars.", "Mr. Smith paid."]);
    }

    #[test]
    fn test_punkt_collocations_and_starters() {
        let punkt = punkt_splitter(&[
            ("abbrev_types.txt", "dr\n"),
            ("collocations.tab", "chap\tiv\n"),
            ("sent_starters.txt", "however\n"),
        ]);
        assert_eq!(
            punkt.split("See chap. IV for details."),
            vec!["See chap. IV for details."]
        );
        assert_eq!(split_sentences("See chap. IV for details."), vec!["See chap.", "IV for details."]);
        // a frequent sentence starter breaks even after an abbreviation
        assert_eq!(
            punkt.split("Ask the dr. However, wait."),
            vec!["Ask the dr.", "However, wait."]
        );
        assert_eq!(punkt.split("Ask Dr. Who."), vec!["Ask Dr. Who."]);
    }

    #[test]
    fn test_punkt_requires_abbreviations() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SentenceSplitter::from_punkt(&ResourceSource::Dir(dir.path().to_path_buf()), "english").is_err());
    }

    #[test]
    fn test_token_type() {
        assert_eq!(token_type("Chap"), "chap");
        assert_eq!(token_type("1,000"), "##number##");
        assert_eq!(token_type("-3.5"), "##number##");
    }

    #[test]
    fn test_mid_text_periods_split_per_sentence() {
        assert_eq!(
            toks("Cats sleep. Dogs run."),
            vec!["Cats", "sleep", ".", "Dogs", "run", "."]
        );
    }
}
