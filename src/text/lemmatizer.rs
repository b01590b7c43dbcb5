//! Dictionary-form reduction in the WordNet "morphy" manner: an exception
//! table per word class, then suffix detachment checked against the base
//! lexicon, then spelling heuristics when the lexicon has no answer.

use super::lexicon::{ADJECTIVES, ADJ_EXC, ADV_EXC, NOUN_EXC, VERBS, VERB_EXC};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Adjective,
    Verb,
    Noun,
    Adverb,
}

impl WordClass {
    /// Coarse class from a Penn Treebank tag. Unknown tags count as nouns.
    pub fn from_treebank(tag: &str) -> Self {
        match tag.chars().next() {
            Some('J') => WordClass::Adjective,
            Some('V') => WordClass::Verb,
            Some('N') => WordClass::Noun,
            Some('R') => WordClass::Adverb,
            _ => WordClass::Noun,
        }
    }
}

const VERB_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ied", "y"),
    ("es", "e"),
    ("es", ""),
    ("s", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
];

const ADJECTIVE_RULES: &[(&str, &str)] = &[
    ("iest", "y"),
    ("ier", "y"),
    ("est", ""),
    ("er", ""),
    ("est", "e"),
    ("er", "e"),
];

const SIBILANT_PLURALS: &[&str] = &["sses", "xes", "zes", "ches", "shes"];

pub fn lemmatize(word: &str, class: WordClass) -> String {
    match class {
        WordClass::Noun => noun_lemma(word),
        WordClass::Verb => verb_lemma(word),
        WordClass::Adjective => adjective_lemma(word),
        WordClass::Adverb => adverb_lemma(word),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

fn last_two(s: &str) -> Option<(char, char)> {
    let mut rev = s.chars().rev();
    let last = rev.next()?;
    let prev = rev.next()?;
    Some((prev, last))
}

/// "stopp" -> "stop". Doubled l/s/z/f are part of the base ("smell",
/// "pass"), and nothing shorter than three letters comes back ("add").
fn collapse_double(stem: &str) -> Option<String> {
    let (prev, last) = last_two(stem)?;
    if prev != last || is_vowel(last) || matches!(last, 'l' | 's' | 'z' | 'f') {
        return None;
    }
    let collapsed = &stem[..stem.len() - last.len_utf8()];
    (collapsed.chars().count() >= 3).then(|| collapsed.to_string())
}

/// Porter's measure: the number of vowel-consonant runs.
fn measure(stem: &str) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for (i, c) in stem.chars().enumerate() {
        let vowel = is_vowel(c) || (c == 'y' && i > 0 && !prev_vowel);
        if prev_vowel && !vowel {
            m += 1;
        }
        prev_vowel = vowel;
    }
    m
}

/// consonant-vowel-consonant ending, last not w/x/y ("hop", "smok").
fn ends_cvc(stem: &str) -> bool {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() < 3 {
        return false;
    }
    let (a, b, c) = (chars[chars.len() - 3], chars[chars.len() - 2], chars[chars.len() - 1]);
    !is_vowel(a) && is_vowel(b) && !is_vowel(c) && !matches!(c, 'w' | 'x' | 'y')
}

/// Whether a stem left by "-ed"/"-ing" lost a silent final e.
fn needs_silent_e(stem: &str) -> bool {
    let Some((prev, last)) = last_two(stem) else {
        return false;
    };
    if stem.ends_with("bl") || stem.ends_with("iz") {
        return true;
    }
    if stem.ends_with("at") {
        return stem
            .chars()
            .rev()
            .nth(2)
            .is_some_and(|c| !is_vowel(c));
    }
    match last {
        'c' | 'v' | 'u' => true,
        'z' => is_vowel(prev),
        _ => measure(stem) == 1 && ends_cvc(stem),
    }
}

/// Base candidates from suffix rules, in rule order. Rules whose stem would
/// be shorter than two letters are skipped.
fn detach<'a>(word: &'a str, rules: &'a [(&'a str, &'a str)]) -> impl Iterator<Item = String> + 'a {
    rules.iter().flat_map(move |(suffix, replacement)| {
        let mut out = Vec::new();
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() >= 2 {
                out.push(format!("{}{}", stem, replacement));
                if replacement.is_empty() {
                    out.extend(collapse_double(stem));
                }
            }
        }
        out
    })
}

fn noun_lemma(word: &str) -> String {
    if let Some(base) = NOUN_EXC.get(word) {
        return base.to_string();
    }
    if word.chars().count() <= 3 || ["ss", "us", "is"].iter().any(|s| word.ends_with(s)) {
        return word.to_string();
    }
    if word.chars().count() > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return format!("{}y", stem);
        }
    }
    if SIBILANT_PLURALS.iter().any(|s| word.ends_with(s)) {
        return word[..word.len() - 2].to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}

fn verb_lemma(word: &str) -> String {
    if let Some(base) = VERB_EXC.get(word) {
        return base.to_string();
    }
    if VERBS.contains(word) {
        return word.to_string();
    }
    if let Some(base) = detach(word, VERB_RULES).find(|c| VERBS.contains(c.as_str())) {
        return base;
    }

    for (suffix, replacement) in [("ied", "y"), ("ies", "y")] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() >= 2 {
                return format!("{}{}", stem, replacement);
            }
        }
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() < 2 {
                continue;
            }
            if let Some(collapsed) = collapse_double(stem) {
                return collapsed;
            }
            if needs_silent_e(stem) {
                return format!("{}e", stem);
            }
            return stem.to_string();
        }
    }
    // third person singular
    noun_lemma(word)
}

/// Base adjective for a comparative, superlative or plain form, only when
/// the base is known. The tagger uses this to spot "-er"/"-est" adjectives.
pub fn adjective_base(word: &str) -> Option<String> {
    if let Some(base) = ADJ_EXC.get(word) {
        return Some(base.to_string());
    }
    if ADJECTIVES.contains(word) {
        return Some(word.to_string());
    }
    detach(word, ADJECTIVE_RULES).find(|c| ADJECTIVES.contains(c.as_str()))
}

fn adjective_lemma(word: &str) -> String {
    adjective_base(word).unwrap_or_else(|| word.to_string())
}

fn adverb_lemma(word: &str) -> String {
    ADV_EXC
        .get(word)
        .map(|base| base.to_string())
        .unwrap_or_else(|| word.to_string())
}
