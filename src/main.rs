//! soccer-stats CLI
//!
//! Scrapes soccer leagues, clubs, match results and squad rosters.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use soccer_stats::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "soccer_stats=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Leagues => cli::run_leagues().await,
        Commands::Clubs { fast } => cli::run_clubs(fast).await,
        Commands::Matches { start, end, fast } => cli::run_matches(start, end, fast).await,
        Commands::Players {
            years,
            leagues,
            clubs,
            fast,
            fast_clubs,
        } => cli::run_players(years, leagues, clubs, fast, fast_clubs).await,
        Commands::CacheClubs => cli::run_cache_clubs().await,
        Commands::CacheMatches => cli::run_cache_matches().await,
        Commands::CachePlayers => cli::run_cache_players().await,
    }
}
