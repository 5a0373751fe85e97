//! Club catalog and its on-disk snapshot.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::parsers::{TeamsApiParser, TeamsResponse};
use super::{teams_api_url, SportsScraper};
use crate::error::Result;
use crate::snapshot;
use crate::types::{Club, League};

pub const CLUBS_SNAPSHOT: &str = "cached_clubs.csv";

/// Flat snapshot row for one club
#[derive(Debug, Serialize, Deserialize)]
pub struct ClubRow {
    pub club_id: u32,
    pub club_name: String,
    pub league_url: String,
    pub league_name: String,
}

impl From<&Club> for ClubRow {
    fn from(club: &Club) -> Self {
        Self {
            club_id: club.club_id,
            club_name: club.name.clone(),
            league_url: club.league.url.clone(),
            league_name: club.league.name.clone(),
        }
    }
}

impl From<ClubRow> for Club {
    fn from(row: ClubRow) -> Self {
        Club::new(
            row.club_id,
            row.club_name,
            League::new(row.league_url, row.league_name),
        )
    }
}

impl SportsScraper {
    /// All known clubs, memoized per instance.
    ///
    /// With `fast_fetch` the list comes straight from the clubs snapshot and
    /// no network access happens. Otherwise every known league's teams
    /// endpoint is queried; a league whose endpoint misbehaves is skipped
    /// (warned), never fatal.
    pub async fn get_clubs(&mut self, fast_fetch: bool) -> Result<Vec<Club>> {
        if let Some(clubs) = self.clubs.get() {
            return Ok(clubs.clone());
        }

        info!("Fetching clubs, this is a one-time process per instance...");
        let clubs = if fast_fetch {
            self.read_cached_clubs()?
        } else {
            self.fetch_clubs().await?
        };
        info!("Received {} clubs", clubs.len());

        // First writer wins; on the sequential path this never races.
        let _ = self.clubs.set(clubs.clone());
        Ok(clubs)
    }

    /// Read the clubs snapshot, bypassing the network entirely.
    pub(crate) fn read_cached_clubs(&self) -> Result<Vec<Club>> {
        let rows: Vec<ClubRow> = snapshot::read_snapshot(&self.snapshot_path(CLUBS_SNAPSHOT))?;
        Ok(rows.into_iter().map(Club::from).collect())
    }

    /// Persist the current club list for future fast fetches.
    pub async fn cache_clubs(&mut self) -> Result<PathBuf> {
        let clubs = self.get_clubs(false).await?;
        let rows: Vec<ClubRow> = clubs.iter().map(ClubRow::from).collect();

        let path = self.snapshot_path(CLUBS_SNAPSHOT);
        snapshot::write_snapshot(&path, &rows)?;
        info!("Cached {} clubs to {}", rows.len(), path.display());

        Ok(path)
    }

    async fn fetch_clubs(&mut self) -> Result<Vec<Club>> {
        let leagues = self.scrape_leagues().await?;
        let total = leagues.len() as u64;

        let mut clubs = Vec::new();
        self.progress.reset();

        for (processed, league) in leagues.iter().enumerate() {
            info!("{}", self.progress.report(processed as u64, total.max(1))?);
            self.limiter.acquire().await;

            let response = match self.client.get(&teams_api_url(&league.url)).await {
                Ok(response) => response,
                Err(e) => {
                    warn!("Skipping league {}: request failed: {}", league.name, e);
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                warn!(
                    "Skipping league {}: teams endpoint answered {}",
                    league.name, status
                );
                continue;
            }

            let teams: TeamsResponse = match response.json().await {
                Ok(teams) => teams,
                Err(e) => {
                    warn!("Skipping league {}: unreadable teams payload: {}", league.name, e);
                    continue;
                }
            };

            clubs.extend(TeamsApiParser::clubs(&teams, league));
        }

        self.progress.reset();
        Ok(clubs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::snapshot::write_snapshot;

    fn scraper_with_dir(dir: &std::path::Path) -> SportsScraper {
        let mut config = AppConfig::default();
        config.snapshot.dir = dir.to_string_lossy().to_string();
        SportsScraper::new(config).unwrap()
    }

    #[test]
    fn test_club_row_round_trip() {
        let club = Club::new(359, "Arsenal", League::new("eng.1", "English Premier League"));
        let row = ClubRow::from(&club);
        assert_eq!(Club::from(row), club);
    }

    #[tokio::test]
    async fn test_fast_fetch_reads_snapshot_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let mut scraper = scraper_with_dir(dir.path());

        let rows = vec![
            ClubRow {
                club_id: 359,
                club_name: "Arsenal".into(),
                league_url: "eng.1".into(),
                league_name: "English Premier League".into(),
            },
            ClubRow {
                club_id: 83,
                club_name: "Barcelona".into(),
                league_url: "esp.1".into(),
                league_name: "Spanish LaLiga".into(),
            },
        ];
        write_snapshot(&scraper.snapshot_path(CLUBS_SNAPSHOT), &rows).unwrap();

        let clubs = scraper.get_clubs(true).await.unwrap();
        assert_eq!(clubs.len(), 2);
        assert_eq!(clubs[0].club_id, 359);
        assert_eq!(clubs[1].league.url, "esp.1");

        // Memoized thereafter
        assert!(scraper.clubs.get().is_some());
    }

    #[tokio::test]
    async fn test_fast_fetch_without_snapshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut scraper = scraper_with_dir(dir.path());
        assert!(scraper.get_clubs(true).await.is_err());
    }
}
