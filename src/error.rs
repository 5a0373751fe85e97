//! Error taxonomy for the scraping pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A request came back as a block or error page. Recovered by retry
    /// at the loop level; surfaces only when every attempt is exhausted.
    #[error("blocked or error page for {url}")]
    BlockedPage { url: String },

    /// The expected HTML structure was absent. Recovered by skipping the
    /// unit (league, day, club-season) and continuing.
    #[error("malformed page: {0}")]
    MalformedPage(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("date parse error: {0}")]
    DateParse(#[from] chrono::ParseError),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
