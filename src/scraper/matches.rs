//! Match-result scraping over a date range, and the matches snapshot.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use super::parsers::FixturesPageParser;
use super::retry::{retry, RetryConfig};
use super::{fixtures_url, SportsScraper};
use crate::dates::{dates_between, parse_compact_date};
use crate::error::{Result, ScrapeError};
use crate::snapshot;
use crate::types::{MatchRecord, MatchResults, SkipReason, SkippedUnit};

pub const MATCHES_SNAPSHOT: &str = "cached_matches.csv";

impl SportsScraper {
    /// Scrape match results and fixtures for every day in `[start, end]`.
    ///
    /// With `fast_fetch` the rows come from the matches snapshot filtered to
    /// the range (no network; the snapshot holds completed matches only, so
    /// the fixtures table comes back empty). Otherwise one fixtures page is
    /// fetched per day; a day whose page stays blocked or malformed through
    /// every retry attempt is skipped and recorded, never fatal.
    pub async fn scrape_matches(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        fast_fetch: bool,
    ) -> Result<MatchResults> {
        if start > end {
            return Err(ScrapeError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        if fast_fetch {
            return self.read_cached_matches(start, end);
        }

        let days = dates_between(start, end)?;
        let total = days.len() as u64;
        let retry_config = RetryConfig::fixtures_page(self.config.http.match_page_attempts);

        let mut results = MatchResults::default();
        self.progress.reset();

        let client = &self.client;
        let limiter = &self.limiter;

        for (processed, day) in days.iter().enumerate() {
            info!("{}", self.progress.report(processed as u64, total)?);

            let date = parse_compact_date(day)?;
            let url = fixtures_url(day);

            let outcome = retry(&retry_config, &format!("fixtures page {day}"), || {
                let url = url.clone();
                async move {
                    limiter.acquire().await;
                    let html = client.fetch_html(&url).await?;
                    if FixturesPageParser::is_block_page(&html) {
                        return Err(ScrapeError::BlockedPage { url });
                    }
                    FixturesPageParser::parse(&html, date)
                }
            })
            .await;

            match outcome {
                Ok(rows) => {
                    results.elapsed.extend(rows.elapsed);
                    results.fixtures.extend(rows.fixtures);
                }
                Err(e) => {
                    warn!("Skipping day {}: {}", day, e);
                    results.skipped.push(SkippedUnit::new(day.clone(), skip_reason(&e)));
                }
            }
        }

        self.progress.reset();
        Ok(results)
    }

    /// Persist the configured historical window for future fast fetches.
    pub async fn cache_matches(&mut self) -> Result<PathBuf> {
        let start = self.config.scope.history_start_date()?;
        let end = Local::now().date_naive();

        let results = self.scrape_matches(start, end, false).await?;
        if !results.skipped.is_empty() {
            warn!(
                "Matches snapshot is missing {} day(s) that could not be fetched",
                results.skipped.len()
            );
        }

        let path = self.snapshot_path(MATCHES_SNAPSHOT);
        snapshot::write_snapshot(&path, &results.elapsed)?;
        info!(
            "Cached {} matches to {}",
            results.elapsed.len(),
            path.display()
        );

        Ok(path)
    }

    fn read_cached_matches(&self, start: NaiveDate, end: NaiveDate) -> Result<MatchResults> {
        let rows: Vec<MatchRecord> =
            snapshot::read_snapshot(&self.snapshot_path(MATCHES_SNAPSHOT))?;

        let elapsed = rows
            .into_iter()
            .filter(|row| row.date >= start && row.date <= end)
            .collect();

        Ok(MatchResults {
            elapsed,
            fixtures: Vec::new(),
            skipped: Vec::new(),
        })
    }
}

fn skip_reason(error: &ScrapeError) -> SkipReason {
    match error {
        ScrapeError::BlockedPage { .. } => SkipReason::Blocked,
        ScrapeError::MalformedPage(_) => SkipReason::Malformed,
        other => SkipReason::Network(other.to_string()),
    }
}
