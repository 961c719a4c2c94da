//! Tweet corpus cleaner.
//!
//! Turns a raw dump of `"<user> <tweet text>"` lines into a deduplicated file
//! of plain ASCII sentences. Each line goes through:
//!
//! 1. prefix removal — everything up to the first space is dropped;
//! 2. deduplication;
//! 3. HTML character-reference decoding (`&amp;` → `&`);
//! 4. the regex rule table below, in order;
//! 5. trimming, a second deduplication and removal of empty lines.

use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// Address / URL patterns
// ─────────────────────────────────────────────────────────────────────────────

/// RFC 822 `addr-spec`: `local-part "@" domain`, with atoms, quoted strings
/// and domain literals. Bytes above 0x7f are never part of an address.
fn email_pattern() -> String {
    let atom = r"[^\x00-\x20\x22\x28\x29\x2c\x2e\x3a-\x3c\x3e\x40\x5b-\x5d\x7f-\xff]+";
    let quoted = r"\x22(?:[^\x0d\x22\x5c\x80-\xff]|\x5c[\x00-\x7f])*\x22";
    let literal = r"\x5b(?:[^\x0d\x5b-\x5d\x80-\xff]|\x5c[\x00-\x7f])*\x5d";

    let word = format!("(?:{}|{})", atom, quoted);
    let sub_domain = format!("(?:{}|{})", atom, literal);
    format!(r"{w}(?:\x2e{w})*\x40{d}(?:\x2e{d})*", w = word, d = sub_domain)
}

/// `scheme:[//][user@]host`, `www.host` or `user@host`, then an optional
/// path, query and fragment.
const URL_PATTERN: &str = concat!(
    r"(?:(?:[A-Za-z]{3,9}:(?://)?)(?:[-;:&=+$,\w]+@)?[A-Za-z0-9.-]+",
    r"|(?:www.|[-;:&=+$,\w]+@)[A-Za-z0-9.-]+)",
    r"(?:(?:/[+~%/.\w_-]*)?\??(?:[-+=&;%@.\w_]*)#?(?:[.!/\\w]*))?",
);

// ─────────────────────────────────────────────────────────────────────────────
// Rule table (order matters: each rule sees the previous rule's output)
// ─────────────────────────────────────────────────────────────────────────────

static RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let table: Vec<(String, &'static str)> = vec![
        // ellipsis
        (r"\.{3,}".into(), "..."),
        (r"\.{2}".into(), "."),
        // hashtags, tag text included
        (r"#(\w+)".into(), " "),
        // phone numbers xxx-xxx-xxx
        (r"(\d+-){2,}\d+".into(), " "),
        // @mentions
        (r"\B@.+?\b".into(), " "),
        // curly quotes
        ("’".into(), "'"),
        ("[“”]".into(), "\""),
        (email_pattern(), " "),
        (URL_PATTERN.into(), " "),
        (r"[^\x00-\x7F]+".into(), " "),
        // numbers, signed / decimal / percent
        (r"-?\d+(\.\d*)*%?".into(), " "),
        ("-".into(), " "),
        // \s plus the ASCII information separators
        (r"[\s\x1c-\x1f]+".into(), " "),
    ];
    table
        .into_iter()
        .map(|(pattern, repl)| (Regex::new(&pattern).unwrap(), repl))
        .collect()
});

/// Run one line through the rule table.
pub fn re_sub_by_rules(line: &str) -> String {
    RULES
        .iter()
        .fold(line.to_string(), |acc, (re, repl)| re.replace_all(&acc, *repl).into_owned())
}

// ─────────────────────────────────────────────────────────────────────────────
// Line pipeline
// ─────────────────────────────────────────────────────────────────────────────

/// Drop the first space-delimited field (the user id).
///
/// Splits on a single space, so any extra spacing after the id survives
/// until the whitespace rule collapses it. A line without a space is
/// nothing but the prefix.
pub fn strip_prefix_field(line: &str) -> &str {
    line.split_once(' ').map_or("", |(_, rest)| rest)
}

/// Decode named and numeric HTML character references the way a browser
/// does: `&amp` without a semicolon still decodes, `&#0;` becomes U+FFFD and
/// `&#128;`..`&#159;` go through the Windows-1252 table.
pub fn unescape_html(line: &str) -> String {
    htmlize::unescape(line).into_owned()
}

/// Keep the first occurrence of every line.
fn dedup<I: IntoIterator<Item = String>>(lines: I) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

/// Clean raw lines (without terminators). Output has no duplicates and no
/// blank lines, and keeps first-occurrence order.
pub fn clean_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique = dedup(
        lines
            .into_iter()
            .map(|line| strip_prefix_field(line.as_ref()).to_string()),
    );
    let total = unique.len();

    let cleaned = dedup(
        unique
            .iter()
            .map(|line| re_sub_by_rules(&unescape_html(line)).trim().to_string()),
    );
    let out: Vec<String> = cleaned.into_iter().filter(|line| !line.is_empty()).collect();

    debug!("{} unique input lines → {} cleaned lines", total, out.len());
    out
}

/// Clean the tweet file at `old_path` and write the result to `new_path`.
///
/// `new_path` is overwritten. Nothing is written if the source cannot be
/// read.
pub fn preprocess_tweet_file(old_path: &Path, new_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(old_path)
        .with_context(|| format!("Cannot read tweet file: {}", old_path.display()))?;
    debug!("Read {} lines from {}", raw.lines().count(), old_path.display());

    let lines = clean_lines(raw.lines());
    let mut out = String::with_capacity(raw.len());
    for line in &lines {
        out.push_str(line);
        out.push('\n');
    }

    std::fs::write(new_path, out)
        .with_context(|| format!("Cannot write cleaned file: {}", new_path.display()))?;
    debug!("Wrote {} lines to {}", lines.len(), new_path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
