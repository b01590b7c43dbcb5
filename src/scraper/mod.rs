pub mod reddit;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::archive::ReviewRecord;
use crate::error::FetchError;

/// A top-level comment on a thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    /// `None` for deleted accounts.
    pub author: Option<String>,
    pub body: String,
}

/// One entry in a thread's top-level comment list.
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadNode {
    Reply(Reply),
    /// "load more comments" stub; carries no text.
    LoadMore,
}

/// Anything that can list the top-level replies of a thread.
pub trait ThreadSource {
    fn fetch_top_level_replies(&mut self, thread_url: &str) -> Result<Vec<ThreadNode>, FetchError>;
}

/// Totals reported after a scrape run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrapeStats {
    pub total: usize,
    pub found: usize,
    pub empty: usize,
    pub failed: usize,
}

/// Replies written by `reviewer`, skipping placeholders. Usernames compare
/// case-insensitively.
pub fn candidates_by(nodes: Vec<ThreadNode>, reviewer: &str) -> Vec<String> {
    nodes
        .into_iter()
        .filter_map(|node| match node {
            ThreadNode::Reply(reply) => Some(reply),
            ThreadNode::LoadMore => None,
        })
        .filter(|reply| {
            reply
                .author
                .as_deref()
                .is_some_and(|a| a.eq_ignore_ascii_case(reviewer))
        })
        .map(|reply| reply.body)
        .collect()
}

/// None for no candidates, otherwise the longest by characters; the first
/// one wins a tie.
pub fn select_comment(candidates: Vec<String>) -> Option<String> {
    let mut best: Option<(usize, String)> = None;
    for text in candidates {
        let len = text.chars().count();
        match &best {
            Some((best_len, _)) if *best_len >= len => {}
            _ => best = Some((len, text)),
        }
    }
    best.map(|(_, text)| text)
}

/// Fetch the reviewer's own comment for one thread.
pub fn review_for<S: ThreadSource>(
    source: &mut S,
    link: &str,
    reviewer: &str,
) -> Result<Option<String>, FetchError> {
    let nodes = source.fetch_top_level_replies(link)?;
    Ok(select_comment(candidates_by(nodes, reviewer)))
}

/// Look up each record's review text, one record at a time. A failed fetch
/// only costs that record its text.
pub fn scrape_reviews<S: ThreadSource>(
    source: &mut S,
    records: &[ReviewRecord],
) -> (Vec<Option<String>>, ScrapeStats) {
    let mut stats = ScrapeStats {
        total: records.len(),
        ..Default::default()
    };

    let pb = ProgressBar::new(records.len() as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut texts = Vec::with_capacity(records.len());
    for record in records {
        let text = match record.reviewer.as_deref() {
            None => {
                debug!("No reviewer for {}, skipping", record.link);
                None
            }
            Some(reviewer) => match review_for(source, &record.link, reviewer) {
                Ok(text) => text,
                Err(FetchError::RateLimited) => {
                    warn!("Rate limited on {}", record.link);
                    stats.failed += 1;
                    None
                }
                Err(
                    e @ (FetchError::NotFound
                    | FetchError::AccessDenied
                    | FetchError::InvalidThreadUrl(_)
                    | FetchError::Http(_)
                    | FetchError::Transport(_)
                    | FetchError::Malformed(_)),
                ) => {
                    debug!("Fetch failed for {}: {}", record.link, e);
                    stats.failed += 1;
                    None
                }
            },
        };
        if text.is_some() {
            stats.found += 1;
        }
        texts.push(text);
        pb.inc(1);
    }
    pb.finish_and_clear();

    stats.empty = stats.total - stats.found - stats.failed;
    info!(
        "Scraped {} threads ({} with review, {} without, {} errors)",
        stats.total, stats.found, stats.empty, stats.failed
    );
    (texts, stats)
}
