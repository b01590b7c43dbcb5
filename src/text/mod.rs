//! Review text normalization: clean, tokenize, drop stopwords, tag, then
//! reduce each token to its dictionary form.

mod lemmatizer;
mod lexicon;
mod tagger;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

pub use lemmatizer::{lemmatize, WordClass};
pub use tagger::tag_tokens;

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("stopwords_en.txt")
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .collect()
});

static PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static DIGIT_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w*\d\w*").unwrap());

/// Trim, lowercase, drop punctuation and any word containing a digit.
pub fn clean_text(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let no_punct = PUNCT_RE.replace_all(&lowered, "");
    DIGIT_WORD_RE.replace_all(&no_punct, "").into_owned()
}

/// Whitespace tokens of cleaned text, stopwords removed.
pub fn tokenize(cleaned: &str) -> Vec<&str> {
    cleaned
        .split_whitespace()
        .filter(|w| !is_stopword(w))
        .collect()
}

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// One document end to end. Always returns a string, possibly empty.
pub fn normalize_review(raw: &str) -> String {
    let cleaned = clean_text(raw);
    let tokens = tokenize(&cleaned);
    let tags = tag_tokens(&tokens);

    tokens
        .iter()
        .zip(tags)
        .map(|(word, tag)| lemmatize(word, WordClass::from_treebank(tag)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a whole column. Missing cells become empty strings; order and
/// length match the input.
pub fn normalize_reviews<S: AsRef<str>>(column: &[Option<S>]) -> Vec<String> {
    let out: Vec<String> = column
        .iter()
        .map(|cell| match cell {
            Some(text) => normalize_review(text.as_ref()),
            None => String::new(),
        })
        .collect();
    let empty = out.iter().filter(|s| s.is_empty()).count();
    info!("Normalized {} documents ({} empty)", out.len(), empty);
    out
}
