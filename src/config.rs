//! Configuration for the scraper.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Network politeness and identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Browser-like user agent; some anti-scraping defenses reject the
    /// default reqwest identification outright.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
    #[serde(default = "default_min_delay_secs")]
    pub min_delay_secs: f64,
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: f64,
    /// Total attempts per fixtures page before the day is skipped.
    #[serde(default = "default_match_attempts")]
    pub match_page_attempts: u32,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_requests_per_minute() -> u32 {
    60
}

fn default_min_delay_secs() -> f64 {
    0.2
}

fn default_max_delay_secs() -> f64 {
    0.6
}

fn default_match_attempts() -> u32 {
    8
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            requests_per_minute: default_requests_per_minute(),
            min_delay_secs: default_min_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
            match_page_attempts: default_match_attempts(),
        }
    }
}

/// Snapshot file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    #[serde(default = "default_snapshot_dir")]
    pub dir: String,
}

fn default_snapshot_dir() -> String {
    "data/snapshots".to_string()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: default_snapshot_dir(),
        }
    }
}

/// Scrape-scope defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// First season year used when a player scrape supplies none.
    #[serde(default = "default_season_start")]
    pub season_start: u16,
    /// Last season year (inclusive) used when a player scrape supplies none.
    #[serde(default = "default_season_end")]
    pub season_end: u16,
    /// Start of the historical window persisted by `cache_matches`, YYYYMMDD.
    #[serde(default = "default_history_start")]
    pub history_start: String,
}

fn default_season_start() -> u16 {
    2000
}

fn default_season_end() -> u16 {
    2021
}

fn default_history_start() -> String {
    "20170101".to_string()
}

impl ScopeConfig {
    pub fn default_season_years(&self) -> Vec<i32> {
        (self.season_start as i32..=self.season_end as i32).collect()
    }

    pub fn history_start_date(&self) -> crate::error::Result<NaiveDate> {
        crate::dates::parse_compact_date(&self.history_start)
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            season_start: default_season_start(),
            season_end: default_season_end(),
            history_start: default_history_start(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config` file, and
    /// environment variables (SOCCER_HTTP__USER_AGENT, etc.)
    ///
    /// Nesting uses a double underscore so that multi-word field names keep
    /// their single underscores: `SOCCER_HTTP__MATCH_PAGE_ATTEMPTS` addresses
    /// `http.match_page_attempts`.
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("SOCCER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
