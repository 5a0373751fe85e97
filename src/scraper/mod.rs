//! Scraping pipeline for the source sports site.
//!
//! Provides catalog discovery (leagues, clubs), match-result and player-roster
//! scraping, and the snapshot fast-fetch paths.

pub mod client;
pub mod clubs;
pub mod leagues;
pub mod matches;
pub mod parsers;
pub mod players;
pub mod rate_limiter;
pub mod retry;

pub use client::HttpClient;
pub use rate_limiter::RateLimiter;

use std::path::PathBuf;

use tokio::sync::OnceCell;

use crate::config::AppConfig;
use crate::error::Result;
use crate::progress::ProgressTracker;
use crate::types::{Club, League};

/// Base URLs for the source site
pub const SITE_URL: &str = "https://www.espn.com";
pub const FIXTURES_SITE_URL: &str = "https://www.espn.in";
pub const API_URL: &str = "http://site.api.espn.com";

/// Build team-directory page URL
pub fn team_directory_url() -> String {
    format!("{}/soccer/teams", SITE_URL)
}

/// Build per-league teams JSON endpoint URL
pub fn teams_api_url(league_url: &str) -> String {
    format!("{}/apis/site/v2/sports/soccer/{}/teams", API_URL, league_url)
}

/// Build per-day fixtures page URL (`day` is `YYYYMMDD`)
pub fn fixtures_url(day: &str) -> String {
    format!("{}/football/fixtures/_/date/{}", FIXTURES_SITE_URL, day)
}

/// Build per-club-per-season squad page URL
pub fn squad_url(club_id: u32, league_url: &str, season_year: u16) -> String {
    format!(
        "{}/soccer/team/squad/_/id/{}/league/{}/season/{}",
        SITE_URL, club_id, league_url, season_year
    )
}

/// The scraping pipeline.
///
/// Holds the HTTP client, request pacing, progress state and the per-instance
/// league/club catalogs. Catalogs are built lazily on first use and live for
/// the life of the instance; [`SportsScraper::reset_catalogs`] starts over.
/// All fetching is sequential: one request in flight at a time.
pub struct SportsScraper {
    pub(crate) config: AppConfig,
    pub(crate) client: HttpClient,
    pub(crate) limiter: RateLimiter,
    pub(crate) progress: ProgressTracker,
    pub(crate) leagues: OnceCell<Vec<League>>,
    pub(crate) clubs: OnceCell<Vec<Club>>,
}

impl SportsScraper {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = HttpClient::new(&config.http)?;
        let limiter = RateLimiter::from_config(&config.http);

        Ok(Self {
            config,
            client,
            limiter,
            progress: ProgressTracker::new(),
            leagues: OnceCell::new(),
            clubs: OnceCell::new(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(AppConfig::default())
    }

    /// Drop the memoized league and club catalogs so the next access
    /// rebuilds them from the network (or snapshot).
    pub fn reset_catalogs(&mut self) {
        self.leagues.take();
        self.clubs.take();
        self.progress.reset();
    }

    pub(crate) fn snapshot_path(&self, file_name: &str) -> PathBuf {
        PathBuf::from(&self.config.snapshot.dir).join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_builders() {
        assert_eq!(team_directory_url(), "https://www.espn.com/soccer/teams");
        assert_eq!(
            teams_api_url("eng.1"),
            "http://site.api.espn.com/apis/site/v2/sports/soccer/eng.1/teams"
        );
        assert_eq!(
            fixtures_url("20211001"),
            "https://www.espn.in/football/fixtures/_/date/20211001"
        );
        assert_eq!(
            squad_url(83, "eng.1", 2021),
            "https://www.espn.com/soccer/team/squad/_/id/83/league/eng.1/season/2021"
        );
    }

    #[test]
    fn test_reset_catalogs_clears_memoized_state() {
        let mut scraper = SportsScraper::with_defaults().unwrap();
        scraper
            .leagues
            .set(vec![League::new("eng.1", "English Premier League")])
            .unwrap();

        scraper.reset_catalogs();
        assert!(scraper.leagues.get().is_none());
        assert!(scraper.clubs.get().is_none());
    }
}
