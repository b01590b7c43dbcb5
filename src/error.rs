use thiserror::Error;

/// Fatal problems with the shape of an input table.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{path}: missing required column {column:?}")]
    MissingColumn { path: String, column: String },
}

/// Why a single thread could not be fetched. Every variant is absorbed by the
/// scrape loop as "no comment found" for that record.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("thread not found")]
    NotFound,
    #[error("rate limited")]
    RateLimited,
    #[error("access denied")]
    AccessDenied,
    #[error("no thread id in {0}")]
    InvalidThreadUrl(String),
    #[error("unexpected status {0}")]
    Http(u16),
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed listing: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl FetchError {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => FetchError::NotFound,
            401 | 403 => FetchError::AccessDenied,
            429 => FetchError::RateLimited,
            other => FetchError::Http(other),
        }
    }
}
