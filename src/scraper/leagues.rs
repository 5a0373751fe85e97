//! League catalog.

use tracing::{info, warn};

use super::parsers::LeaguePageParser;
use super::{team_directory_url, SportsScraper};
use crate::error::{Result, ScrapeError};
use crate::types::League;

impl SportsScraper {
    /// All leagues listed in the source's team directory.
    ///
    /// Memoized per instance: the directory page is fetched once and held
    /// until [`SportsScraper::reset_catalogs`]. A directory page without the
    /// expected dropdown yields an empty catalog (warned, not fatal); a
    /// failed fetch aborts the operation outright, since every later stage
    /// depends on the catalog.
    pub async fn scrape_leagues(&self) -> Result<Vec<League>> {
        let leagues = self
            .leagues
            .get_or_try_init(|| async {
                info!("Fetching leagues, this is a one-time process per instance...");
                self.limiter.acquire().await;

                let html = self.client.fetch_html(&team_directory_url()).await?;
                let leagues = LeaguePageParser::parse(&html);
                if leagues.is_empty() {
                    warn!("No league dropdown on the team directory page; catalog is empty");
                } else {
                    info!("Received {} leagues", leagues.len());
                }

                Ok::<_, ScrapeError>(leagues)
            })
            .await?;

        Ok(leagues.clone())
    }
}
