//! Player-roster scraping over a (season year x club) cross product, and the
//! players snapshot.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::parsers::RosterPageParser;
use super::{squad_url, SportsScraper};
use crate::error::{Result, ScrapeError};
use crate::snapshot;
use crate::types::{Club, PlayerRecord, RosterResults, SkipReason, SkippedUnit};

pub const PLAYERS_SNAPSHOT: &str = "cached_players.csv";

impl SportsScraper {
    /// Scrape squad rosters for every `(season year, club)` combination.
    ///
    /// An empty `season_years` defaults to the configured full range; league
    /// and club filters, when given, select by name. Argument validation
    /// happens before any I/O on both paths. With `fast_fetch` the rows come
    /// from the players snapshot with the filters applied; otherwise one
    /// squad page is fetched per combination and pages without the expected
    /// two roster tables are skipped and recorded.
    pub async fn scrape_players(
        &mut self,
        season_years: &[i32],
        leagues: Option<&[String]>,
        clubs: Option<&[String]>,
        fast_fetch_clubs: bool,
        fast_fetch: bool,
    ) -> Result<RosterResults> {
        let years = self.resolve_season_years(season_years)?;
        validate_name_filter("leagues", leagues)?;
        validate_name_filter("clubs", clubs)?;

        if fast_fetch {
            return self.read_cached_players(&years, leagues, clubs);
        }

        let scraped_leagues = {
            let all = self.scrape_leagues().await?;
            match leagues {
                Some(names) => all
                    .into_iter()
                    .filter(|league| names.contains(&league.name))
                    .collect(),
                None => all,
            }
        };
        let league_names: Vec<&str> = scraped_leagues
            .iter()
            .map(|league| league.name.as_str())
            .collect();

        let scraped_clubs: Vec<Club> = {
            let all = if fast_fetch_clubs {
                self.read_cached_clubs()?
            } else {
                self.get_clubs(false).await?
            };
            all.into_iter()
                .filter(|club| league_names.contains(&club.league.name.as_str()))
                .filter(|club| match clubs {
                    Some(names) => names.contains(&club.name),
                    None => true,
                })
                .collect()
        };

        let total = (years.len() * scraped_clubs.len()) as u64;
        let mut results = RosterResults::default();
        self.progress.reset();

        let mut processed: u64 = 0;
        for &year in &years {
            for club in &scraped_clubs {
                info!("{}", self.progress.report(processed, total.max(1))?);
                processed += 1;

                let unit = format!("{}/{}", club.name, year);
                let url = squad_url(club.club_id, &club.league.url, year);

                self.limiter.acquire().await;
                let html = match self.client.fetch_html(&url).await {
                    Ok(html) => html,
                    Err(e) => {
                        warn!("Skipping {}: request failed: {}", unit, e);
                        results
                            .skipped
                            .push(SkippedUnit::new(unit, SkipReason::Network(e.to_string())));
                        continue;
                    }
                };

                match RosterPageParser::parse(&html, &club.league.name, &club.name, year) {
                    Ok(players) => {
                        debug!("{}: {} players", unit, players.len());
                        results.players.extend(players);
                    }
                    Err(e) => {
                        // Usually a placeholder page for a season the club
                        // did not play; worth recording, not worth failing.
                        debug!("Skipping {}: {}", unit, e);
                        results
                            .skipped
                            .push(SkippedUnit::new(unit, SkipReason::Malformed));
                    }
                }
            }
        }

        self.progress.reset();
        Ok(results)
    }

    /// Persist a full scrape (default years, all leagues and clubs) for
    /// future fast fetches.
    pub async fn cache_players(&mut self) -> Result<PathBuf> {
        let results = self.scrape_players(&[], None, None, false, false).await?;
        if !results.skipped.is_empty() {
            warn!(
                "Players snapshot is missing {} club-season(s) that could not be fetched",
                results.skipped.len()
            );
        }

        let path = self.snapshot_path(PLAYERS_SNAPSHOT);
        snapshot::write_snapshot(&path, &results.players)?;
        info!(
            "Cached {} player rows to {}",
            results.players.len(),
            path.display()
        );

        Ok(path)
    }

    fn read_cached_players(
        &self,
        years: &[u16],
        leagues: Option<&[String]>,
        clubs: Option<&[String]>,
    ) -> Result<RosterResults> {
        let rows: Vec<PlayerRecord> =
            snapshot::read_snapshot(&self.snapshot_path(PLAYERS_SNAPSHOT))?;

        let players = rows
            .into_iter()
            .filter(|row| years.contains(&row.year))
            .filter(|row| match leagues {
                Some(names) => names.contains(&row.league),
                None => true,
            })
            .filter(|row| match clubs {
                Some(names) => names.contains(&row.club),
                None => true,
            })
            .collect();

        Ok(RosterResults {
            players,
            skipped: Vec::new(),
        })
    }

    /// An empty year list means the configured default range; every supplied
    /// year must be a sensible non-negative season year.
    fn resolve_season_years(&self, season_years: &[i32]) -> Result<Vec<u16>> {
        let effective: Vec<i32> = if season_years.is_empty() {
            self.config.scope.default_season_years()
        } else {
            season_years.to_vec()
        };

        effective
            .into_iter()
            .map(|year| {
                u16::try_from(year).map_err(|_| {
                    ScrapeError::InvalidArgument(format!(
                        "season year must be a non-negative integer, got {year}"
                    ))
                })
            })
            .collect()
    }
}

fn validate_name_filter(what: &str, filter: Option<&[String]>) -> Result<()> {
    if let Some(names) = filter {
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(ScrapeError::InvalidArgument(format!(
                "{what} filter must contain non-empty names"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::snapshot::write_snapshot;
    use crate::types::PlayerRole;

    fn scraper_with_dir(dir: &std::path::Path) -> SportsScraper {
        let mut config = AppConfig::default();
        config.snapshot.dir = dir.to_string_lossy().to_string();
        SportsScraper::new(config).unwrap()
    }

    fn player(league: &str, club: &str, year: u16, name: &str) -> PlayerRecord {
        PlayerRecord {
            role: PlayerRole::Outfield,
            league: league.into(),
            club: club.into(),
            year,
            name: name.into(),
            num: Some(10),
            pos: "F".into(),
            age: Some(30),
            height_cm: Some(170.18),
            weight_kg: Some(72.1),
            nationality: "Argentina".into(),
            appearances: Some(35),
            substitute_appearances: Some(2),
            saves: None,
            goals_against: None,
            goals: Some(30),
            assists: Some(9),
            shots: Some(140),
            shots_on_target: Some(82),
            fouls_committed: Some(40),
            fouls_awarded: Some(66),
            yellow_cards: Some(4),
            red_cards: Some(0),
        }
    }

    #[tokio::test]
    async fn test_negative_season_year_rejected_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let mut scraper = scraper_with_dir(dir.path());

        let err = scraper
            .scrape_players(&[2020, -3], None, None, false, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_blank_filter_name_rejected_before_io() {
        let dir = tempfile::tempdir().unwrap();
        let mut scraper = scraper_with_dir(dir.path());

        let clubs = vec!["Barcelona".to_string(), "  ".to_string()];
        let err = scraper
            .scrape_players(&[2020], None, Some(&clubs), false, true)
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidArgument(_)));
    }

    #[test]
    fn test_empty_years_default_to_configured_range() {
        let dir = tempfile::tempdir().unwrap();
        let scraper = scraper_with_dir(dir.path());

        let years = scraper.resolve_season_years(&[]).unwrap();
        assert_eq!(years.first(), Some(&2000));
        assert_eq!(years.last(), Some(&2021));
        assert_eq!(years.len(), 22);
    }

    #[tokio::test]
    async fn test_fast_fetch_applies_filters() {
        let dir = tempfile::tempdir().unwrap();
        let mut scraper = scraper_with_dir(dir.path());

        let rows = vec![
            player("Spanish LaLiga", "Barcelona", 2020, "Messi"),
            player("Spanish LaLiga", "Barcelona", 2019, "Messi"),
            player("Spanish LaLiga", "Real Madrid", 2020, "Benzema"),
            player("English Premier League", "Arsenal", 2020, "Aubameyang"),
        ];
        write_snapshot(&scraper.snapshot_path(PLAYERS_SNAPSHOT), &rows).unwrap();

        let leagues = vec!["Spanish LaLiga".to_string()];
        let clubs = vec!["Barcelona".to_string()];
        let results = scraper
            .scrape_players(&[2020], Some(&leagues), Some(&clubs), false, true)
            .await
            .unwrap();

        assert_eq!(results.players.len(), 1);
        assert_eq!(results.players[0].name, "Messi");
        assert_eq!(results.players[0].year, 2020);
    }

    #[tokio::test]
    async fn test_fast_fetch_round_trips_typed_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut scraper = scraper_with_dir(dir.path());

        let rows = vec![player("Spanish LaLiga", "Barcelona", 2020, "Messi")];
        write_snapshot(&scraper.snapshot_path(PLAYERS_SNAPSHOT), &rows).unwrap();

        let results = scraper
            .scrape_players(&[2020], None, None, false, true)
            .await
            .unwrap();

        assert_eq!(results.players, rows);
    }
}
