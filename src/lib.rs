//! Soccer statistics scraper for the ESPN soccer pages.
//!
//! Discovers leagues and clubs, scrapes completed match results and upcoming
//! fixtures per day, and scrapes per-season squad rosters into a merged wide
//! schema. Every scrape can be served from an on-disk CSV snapshot instead of
//! the network ("fast fetch"), and long scrapes report progress with an ETA.
//!
//! The entry point is [`scraper::SportsScraper`].

pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod progress;
pub mod scraper;
pub mod snapshot;
pub mod types;

pub use error::{Result, ScrapeError};
pub use scraper::SportsScraper;
