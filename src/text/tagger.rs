use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::lemmatizer::adjective_base;
use super::lexicon::{
    ADJECTIVES, CLOSED_CLASS, ED_ADJECTIVES, ING_NOUNS, LY_NON_ADVERBS, NOUN_EXC, VERBS, VERB_EXC,
};

static CLOSED: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| CLOSED_CLASS.iter().copied().collect());
static LY_WORDS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| LY_NON_ADVERBS.iter().copied().collect());
static ING_NOUN_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ING_NOUNS.iter().copied().collect());
static ED_ADJ_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ED_ADJECTIVES.iter().copied().collect());

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "ical", "less", "ish", "ic", "al",
];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify"];

/// Tag each token of one document with a Penn Treebank tag.
pub fn tag_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<&'static str> {
    tokens.iter().map(|t| tag_word(t.as_ref())).collect()
}

/// Lexicon first, then irregular forms, then suffix shape. Whatever is left
/// is a singular noun.
pub fn tag_word(word: &str) -> &'static str {
    if let Some(&tag) = CLOSED.get(word) {
        return tag;
    }
    if let Some(tag) = irregular_tag(word) {
        return tag;
    }
    if ADJECTIVES.contains(word) {
        return "JJ";
    }
    if VERBS.contains(word) {
        return "VB";
    }
    suffix_tag(word)
}

fn irregular_tag(word: &str) -> Option<&'static str> {
    match word {
        "better" | "worse" | "elder" | "farther" => return Some("JJR"),
        "best" | "worst" | "eldest" | "farthest" => return Some("JJS"),
        _ => {}
    }
    if let Some(base) = VERB_EXC.get(word) {
        if word.ends_with('s') && !base.ends_with('s') {
            return Some("VBZ");
        }
        return Some(if word.ends_with('n') { "VBN" } else { "VBD" });
    }
    if NOUN_EXC.contains_key(word) {
        return Some("NNS");
    }
    None
}

fn suffix_tag(word: &str) -> &'static str {
    let len = word.chars().count();

    if len > 4 && word.ends_with("ly") {
        return LY_WORDS.get(word).copied().unwrap_or("RB");
    }
    if len > 4 && word.ends_with("ing") {
        return if ING_NOUN_SET.contains(word) { "NN" } else { "VBG" };
    }
    if len > 4 && word.ends_with("ed") && !word.ends_with("eed") {
        return if ED_ADJ_SET.contains(word) { "JJ" } else { "VBN" };
    }
    if word.ends_with("est") && adjective_base(word).is_some() {
        return "JJS";
    }
    if word.ends_with("er") && adjective_base(word).is_some() {
        return "JJR";
    }
    if len > 3 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return "JJ";
    }
    if len > 3 && VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return "VB";
    }
    if len > 3 && word.ends_with('y') && consonant_before_y(word) {
        return "JJ";
    }
    if len > 3 && word.ends_with('s') && !["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return "NNS";
    }
    "NN"
}

fn consonant_before_y(word: &str) -> bool {
    word.chars()
        .rev()
        .nth(1)
        .is_some_and(|c| !matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'))
}
