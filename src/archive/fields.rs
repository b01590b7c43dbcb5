//! Column-level cleaning: each function maps one raw column to its cleaned
//! form and never looks at other columns.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;

/// Default minimum number of reviews a style needs to be kept.
pub const MIN_STYLE_COUNT: usize = 100;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Variant spellings seen in the archive, mapped to the canonical style.
/// Styles win over locations ("bourbon/america" is bourbon).
pub const STYLE_ALIASES: &[(&str, &str)] = &[
    ("bourbon/america", "bourbon"),
    ("blended speyside scotch", "speyside"),
    ("lowland / grain", "lowland"),
    ("borubon", "bourbon"),
    ("highlands", "highland"),
];

static ALIAS_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| STYLE_ALIASES.iter().copied().collect());

/// Trim and lowercase; empty results become `None`.
pub fn normalize_field(raw: &str) -> Option<String> {
    let value = raw.trim().to_lowercase();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Replace a known variant spelling with its canonical style.
pub fn canonicalize_style(label: String) -> String {
    match ALIAS_MAP.get(label.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => label,
    }
}

/// Count each label, ignoring missing ones.
pub fn style_counts<'a, I>(labels: I) -> HashMap<&'a str, usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    labels.into_iter().flatten().counts()
}

/// Labels occurring at least `min_count` times. Empty when none qualify.
pub fn keep_frequent<'a, I>(labels: I, min_count: usize) -> HashSet<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    style_counts(labels)
        .into_iter()
        .filter(|&(_, n)| n >= min_count)
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Parse a rating, dropping a trailing "/100" divisor. Anything that does
/// not come out as a finite number is `None`.
pub fn parse_rating(raw: &str) -> Option<f64> {
    let value = normalize_field(raw)?;
    let numerator = value.strip_suffix("/100").unwrap_or(&value).trim();
    numerator.parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Parse a form timestamp. Unparseable values are `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Reviewer names keep their case; only surrounding whitespace goes.
pub fn clean_reviewer(raw: &str) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_strips_and_lowercases() {
        assert_eq!(normalize_field("  Islay "), Some("islay".into()));
        assert_eq!(normalize_field("   "), None);
        assert_eq!(normalize_field(""), None);
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["  Bourbon/America ", "SPEYSIDE", "\tRye\n", "", "  ", "Lowland / Grain"] {
            let once = normalize_field(raw);
            let twice = once.as_deref().and_then(normalize_field);
            assert_eq!(once, twice, "input {:?}", raw);
        }
    }

    #[test]
    fn every_alias_maps_to_its_canonical_form() {
        for (variant, canonical) in STYLE_ALIASES {
            assert_eq!(canonicalize_style(variant.to_string()), *canonical);
        }
    }

    #[test]
    fn unknown_styles_pass_through() {
        assert_eq!(canonicalize_style("islay".into()), "islay");
        assert_eq!(canonicalize_style("bourbon".into()), "bourbon");
    }

    #[test]
    fn canonicalize_after_normalize() {
        let label = normalize_field("  Bourbon/America ").map(canonicalize_style);
        assert_eq!(label.as_deref(), Some("bourbon"));
    }

    #[test]
    fn keep_frequent_is_sound_and_complete() {
        let mut labels = Vec::new();
        labels.extend(std::iter::repeat("islay").take(5));
        labels.extend(std::iter::repeat("bourbon").take(3));
        labels.extend(std::iter::repeat("rye").take(2));
        let kept = keep_frequent(labels.iter().map(|l| Some(*l)), 3);
        let counts = style_counts(labels.iter().map(|l| Some(*l)));
        for (label, n) in &counts {
            assert_eq!(kept.contains(*label), *n >= 3, "label {}", label);
        }
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn keep_frequent_ignores_missing() {
        let labels = vec![None, None, None, Some("rye")];
        let kept = keep_frequent(labels, 1);
        assert_eq!(kept.len(), 1);
        assert!(kept.contains("rye"));
    }

    #[test]
    fn keep_frequent_can_be_empty() {
        let kept = keep_frequent(vec![Some("a"), Some("b")], MIN_STYLE_COUNT);
        assert!(kept.is_empty());
    }

    #[test]
    fn rating_drops_divisor() {
        assert_eq!(parse_rating("92/100"), Some(92.0));
        assert_eq!(parse_rating("  87 "), Some(87.0));
        assert_eq!(parse_rating("85.5/100"), Some(85.5));
    }

    #[test]
    fn malformed_ratings_are_missing() {
        assert_eq!(parse_rating("n/a"), None);
        assert_eq!(parse_rating(""), None);
        assert_eq!(parse_rating("nan"), None);
        assert_eq!(parse_rating("inf"), None);
        assert_eq!(parse_rating("ninety"), None);
    }

    #[test]
    fn timestamps_in_known_formats() {
        let ts = parse_timestamp("2014-03-19 15:56:23").unwrap();
        assert_eq!(ts.to_string(), "2014-03-19 15:56:23");
        let ts = parse_timestamp("3/19/2014 15:56:23").unwrap();
        assert_eq!(ts.to_string(), "2014-03-19 15:56:23");
        let ts = parse_timestamp("2014-03-19").unwrap();
        assert_eq!(ts.to_string(), "2014-03-19 00:00:00");
    }

    #[test]
    fn bad_timestamps_are_missing() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2014-13-45 99:00:00"), None);
    }

    #[test]
    fn reviewer_keeps_case() {
        assert_eq!(clean_reviewer("  Muaddib_Lives "), Some("Muaddib_Lives".into()));
        assert_eq!(clean_reviewer(" "), None);
    }

    proptest! {
        #[test]
        fn normalize_field_is_idempotent(raw in "[ \\ta-zA-Z0-9/é]{0,24}") {
            let once = normalize_field(&raw);
            let twice = once.as_deref().and_then(normalize_field);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn keep_frequent_matches_counts_for_any_labels(
            labels in proptest::collection::vec(proptest::option::of("[a-d]"), 0..60),
            min in 0usize..12,
        ) {
            let kept = keep_frequent(labels.iter().map(|l| l.as_deref()), min);
            for label in ["a", "b", "c", "d"] {
                let n = labels.iter().filter(|l| l.as_deref() == Some(label)).count();
                prop_assert_eq!(kept.contains(label), n > 0 && n >= min, "label {} seen {} times", label, n);
            }
        }

        #[test]
        fn ratings_out_of_100_parse(value in 0u32..=100, pad in " {0,3}") {
            let raw = format!("{}{}/100{}", pad, value, pad);
            prop_assert_eq!(parse_rating(&raw), Some(value as f64));
        }
    }
}
