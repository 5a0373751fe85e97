//! CLI commands for the soccer-stats scraper.
//!
//! Catalog discovery, match and roster scraping, and snapshot refresh, each
//! as its own subcommand.

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::dates::parse_compact_date;
use crate::scraper::SportsScraper;
use crate::types::SkippedUnit;

#[derive(Parser)]
#[command(name = "soccer-stats")]
#[command(version, about = "Soccer statistics scraper: leagues, clubs, matches and rosters", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every league from the team directory
    Leagues,

    /// List every club across all leagues
    Clubs {
        /// Read the clubs snapshot instead of the network
        #[arg(short, long)]
        fast: bool,
    },

    /// Scrape match results and fixtures for a date range
    Matches {
        /// First day of the range (YYYYMMDD)
        #[arg(value_name = "START")]
        start: String,

        /// Last day of the range, inclusive (YYYYMMDD)
        #[arg(value_name = "END")]
        end: String,

        /// Read the matches snapshot instead of the network
        #[arg(short, long)]
        fast: bool,
    },

    /// Scrape squad rosters for seasons, leagues and clubs
    Players {
        /// Season years to scrape (default: the configured full range)
        #[arg(short, long, value_delimiter = ',')]
        years: Vec<i32>,

        /// Only these league names
        #[arg(short, long, value_delimiter = ',')]
        leagues: Vec<String>,

        /// Only these club names
        #[arg(short, long, value_delimiter = ',')]
        clubs: Vec<String>,

        /// Read the players snapshot instead of the network
        #[arg(short, long)]
        fast: bool,

        /// Resolve the club list from the clubs snapshot
        #[arg(long)]
        fast_clubs: bool,
    },

    /// Refresh the clubs snapshot
    CacheClubs,

    /// Refresh the matches snapshot over the configured history window
    CacheMatches,

    /// Refresh the players snapshot over the configured season range
    CachePlayers,
}

/// List leagues.
pub async fn run_leagues() -> anyhow::Result<()> {
    let scraper = new_scraper()?;
    let leagues = scraper.scrape_leagues().await?;

    for league in &leagues {
        println!("{}\t{}", league.url, league.name);
    }
    eprintln!("{} league(s)", leagues.len());
    Ok(())
}

/// List clubs.
pub async fn run_clubs(fast: bool) -> anyhow::Result<()> {
    let mut scraper = new_scraper()?;
    let clubs = scraper.get_clubs(fast).await?;

    for club in &clubs {
        println!("{}\t{}\t{}", club.club_id, club.name, club.league.name);
    }
    eprintln!("{} club(s)", clubs.len());
    Ok(())
}

/// Scrape a date range of matches.
pub async fn run_matches(start: String, end: String, fast: bool) -> anyhow::Result<()> {
    let start = parse_compact_date(&start)?;
    let end = parse_compact_date(&end)?;

    let mut scraper = new_scraper()?;
    let results = scraper.scrape_matches(start, end, fast).await?;

    for m in &results.elapsed {
        println!(
            "{}\t{} {} {}\t{}",
            m.date, m.club1, m.score, m.club2, m.duration
        );
    }
    for f in &results.fixtures {
        println!(
            "{}\t{} {} {}\t{}",
            f.date, f.club1, f.score_placeholder, f.club2, f.time
        );
    }

    eprintln!(
        "{} completed match(es), {} fixture(s)",
        results.elapsed.len(),
        results.fixtures.len()
    );
    report_skipped(&results.skipped);
    Ok(())
}

/// Scrape rosters.
pub async fn run_players(
    years: Vec<i32>,
    leagues: Vec<String>,
    clubs: Vec<String>,
    fast: bool,
    fast_clubs: bool,
) -> anyhow::Result<()> {
    let mut scraper = new_scraper()?;
    let results = scraper
        .scrape_players(
            &years,
            as_filter(&leagues),
            as_filter(&clubs),
            fast_clubs,
            fast,
        )
        .await?;

    for p in &results.players {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            p.year, p.league, p.club, p.name, p.pos
        );
    }
    eprintln!("{} player row(s)", results.players.len());
    report_skipped(&results.skipped);
    Ok(())
}

/// Refresh the clubs snapshot.
pub async fn run_cache_clubs() -> anyhow::Result<()> {
    let mut scraper = new_scraper()?;
    let path = scraper.cache_clubs().await?;
    println!("{}", path.display());
    Ok(())
}

/// Refresh the matches snapshot.
pub async fn run_cache_matches() -> anyhow::Result<()> {
    let mut scraper = new_scraper()?;
    let path = scraper.cache_matches().await?;
    println!("{}", path.display());
    Ok(())
}

/// Refresh the players snapshot.
pub async fn run_cache_players() -> anyhow::Result<()> {
    let mut scraper = new_scraper()?;
    let path = scraper.cache_players().await?;
    println!("{}", path.display());
    Ok(())
}

fn new_scraper() -> anyhow::Result<SportsScraper> {
    let config = AppConfig::load()?;
    Ok(SportsScraper::new(config)?)
}

/// An empty list from the CLI means "no filter".
fn as_filter(names: &[String]) -> Option<&[String]> {
    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

fn report_skipped(skipped: &[SkippedUnit]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!("{} unit(s) skipped:", skipped.len());
    for skip in skipped {
        eprintln!("  {}: {:?}", skip.unit, skip.reason);
    }
}
