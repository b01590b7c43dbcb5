pub mod fields;
pub mod table;
pub mod urls;

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDateTime;
use tracing::info;

use fields::{canonicalize_style, clean_reviewer, normalize_field, parse_rating, parse_timestamp};
use table::Table;

pub const COL_TIMESTAMP: &str = "Timestamp";
pub const COL_STYLE: &str = "Whisky Region or Style";
pub const COL_REVIEWER: &str = "Reviewer's Reddit Username";
pub const COL_RATING: &str = "Reviewer Rating";
pub const COL_LINK: &str = "Link To Reddit Review";
pub const COL_REVIEW_TEXT: &str = "review_text";

const REQUIRED_COLUMNS: [&str; 5] = [COL_TIMESTAMP, COL_STYLE, COL_REVIEWER, COL_RATING, COL_LINK];

pub const INPUT_DELIMITER: u8 = b',';
pub const OUTPUT_DELIMITER: u8 = b'|';

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the archive exactly as it was read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReview {
    pub timestamp: String,
    pub style: String,
    pub reviewer: String,
    pub rating: String,
    pub link: String,
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArchive {
    /// Columns outside the five the cleaner understands, in input order.
    pub extra_columns: Vec<String>,
    pub rows: Vec<RawReview>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub timestamp: Option<NaiveDateTime>,
    pub style: Option<String>,
    pub reviewer: Option<String>,
    pub rating: Option<f64>,
    pub link: String,
    pub review_text: Option<String>,
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Archive {
    pub extra_columns: Vec<String>,
    pub records: Vec<ReviewRecord>,
    /// Set once scraping has run, so the output gains a `review_text` column.
    pub scraped: bool,
}

impl RawArchive {
    pub fn load(path: &Path) -> Result<Self> {
        let table = Table::read(path, INPUT_DELIMITER)?;
        Ok(Self::from_table(&table)?)
    }

    pub fn from_table(table: &Table) -> Result<Self, crate::error::ArchiveError> {
        let mut required = [0usize; 5];
        for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = table.column(name)?;
        }
        let extra_idx: Vec<usize> = (0..table.headers.len())
            .filter(|i| !required.contains(i))
            .collect();

        let rows = table
            .rows
            .iter()
            .map(|row| {
                let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
                RawReview {
                    timestamp: cell(required[0]),
                    style: cell(required[1]),
                    reviewer: cell(required[2]),
                    rating: cell(required[3]),
                    link: cell(required[4]),
                    extra: extra_idx.iter().map(|&i| cell(i)).collect(),
                }
            })
            .collect();

        Ok(RawArchive {
            extra_columns: extra_idx.iter().map(|&i| table.headers[i].clone()).collect(),
            rows,
        })
    }
}

/// Style label after normalization and alias replacement.
pub fn clean_style(raw: &str) -> Option<String> {
    normalize_field(raw).map(canonicalize_style)
}

/// Drop rows whose link cannot be made to point at the discussion site;
/// repaired links replace the raw text.
pub fn validate_links(rows: Vec<RawReview>) -> Vec<RawReview> {
    let before = rows.len();
    let links: Vec<&str> = rows.iter().map(|r| r.link.as_str()).collect();
    let checks = urls::check_links(&links);
    let repaired = checks
        .iter()
        .filter(|c| matches!(c, urls::LinkCheck::Repaired(_)))
        .count();

    let kept: Vec<RawReview> = rows
        .into_iter()
        .zip(checks)
        .filter_map(|(mut row, check)| {
            row.link = check.into_url()?;
            Some(row)
        })
        .collect();
    info!(
        "Link validation kept {} of {} rows ({} repaired)",
        kept.len(),
        before,
        repaired
    );
    kept
}

/// Type every field. Malformed timestamps and ratings become `None`.
pub fn parse_reviews(rows: Vec<RawReview>) -> Vec<ReviewRecord> {
    rows.into_iter()
        .map(|row| ReviewRecord {
            timestamp: parse_timestamp(&row.timestamp),
            style: clean_style(&row.style),
            reviewer: clean_reviewer(&row.reviewer),
            rating: parse_rating(&row.rating),
            link: row.link,
            review_text: None,
            extra: row.extra,
        })
        .collect()
}

/// Keep records whose style occurs at least `min_count` times among
/// `records`. Records without a style never survive.
pub fn keep_frequent_styles(records: Vec<ReviewRecord>, min_count: usize) -> Vec<ReviewRecord> {
    let keep = fields::keep_frequent(records.iter().map(|r| r.style.as_deref()), min_count);
    let before = records.len();
    let kept: Vec<ReviewRecord> = records
        .into_iter()
        .filter(|r| r.style.as_ref().is_some_and(|s| keep.contains(s)))
        .collect();
    info!(
        "Style filter (>= {}) kept {} styles, {} of {} rows",
        min_count,
        keep.len(),
        kept.len(),
        before
    );
    kept
}

/// Full cleaning pass: links, field typing, then the style frequency filter.
pub fn clean(raw: RawArchive, min_style_count: usize) -> Archive {
    info!("Cleaning {} rows", raw.rows.len());
    let linked = validate_links(raw.rows);
    let typed = parse_reviews(linked);
    let records = keep_frequent_styles(typed, min_style_count);
    Archive {
        extra_columns: raw.extra_columns,
        records,
        scraped: false,
    }
}

/// Style counts over the raw archive, most frequent first.
pub fn style_table(raw: &RawArchive) -> Vec<(String, usize)> {
    let styles: Vec<Option<String>> = raw.rows.iter().map(|r| clean_style(&r.style)).collect();
    let counts: HashMap<&str, usize> = fields::style_counts(styles.iter().map(|s| s.as_deref()));
    let mut table: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, n)| (label.to_string(), n))
        .collect();
    table.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    table
}

impl Archive {
    /// Attach one scraped text (or `None`) per record, in record order.
    pub fn with_review_texts(mut self, texts: Vec<Option<String>>) -> Self {
        for (record, text) in self.records.iter_mut().zip(texts) {
            record.review_text = text;
        }
        self.scraped = true;
        self
    }

    pub fn to_table(&self) -> Table {
        let mut headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        headers.extend(self.extra_columns.iter().cloned());
        if self.scraped {
            headers.push(COL_REVIEW_TEXT.to_string());
        }

        let rows = self
            .records
            .iter()
            .map(|r| {
                let mut row = vec![
                    r.timestamp
                        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
                        .unwrap_or_default(),
                    r.style.clone().unwrap_or_default(),
                    r.reviewer.clone().unwrap_or_default(),
                    r.rating.map(|v| v.to_string()).unwrap_or_default(),
                    r.link.clone(),
                ];
                row.extend(r.extra.iter().cloned());
                if self.scraped {
                    row.push(r.review_text.clone().unwrap_or_default());
                }
                row
            })
            .collect();

        Table {
            source: String::new(),
            headers,
            rows,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        self.to_table().write(path, OUTPUT_DELIMITER)
    }
}
