//! Domain records produced by the scraping pipeline.
//!
//! These are the tabular shapes downstream analysis code indexes into, and
//! the serde schemas for the on-disk snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A league as listed in the source site's team directory.
///
/// Identity is the name (filter key) or the site-relative URL (fetch key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub url: String,
    pub name: String,
}

impl League {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// A club and the league it was listed under.
///
/// The same club name may recur under multiple leagues across seasons; each
/// catalog entry associates it with exactly one league.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Club {
    pub club_id: u32,
    pub name: String,
    pub league: League,
}

impl Club {
    pub fn new(club_id: u32, name: impl Into<String>, league: League) -> Self {
        Self {
            club_id,
            name: name.into(),
            league,
        }
    }
}

/// A completed match with a final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub club1: String,
    /// Raw "N - N" score string; consumers parse it.
    pub score: String,
    pub club2: String,
    /// Typically "FT", "AET" or similar.
    pub duration: String,
    /// May carry a trailing country token from the source markup.
    pub location: Option<String>,
    pub attendance: Option<u32>,
}

/// A scheduled or in-progress match without a final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub date: NaiveDate,
    pub club1: String,
    /// Link text in the score position, usually "v".
    pub score_placeholder: String,
    pub club2: String,
    /// "LIVE" or a local kick-off time "H:MM".
    pub time: String,
    pub tv: Option<String>,
}

/// Which of the two roster tables a player row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    Goalkeeper,
    Outfield,
}

/// One squad member for one season, in the merged wide schema.
///
/// Goalkeeper rows populate `saves`/`goals_against`, outfield rows populate
/// `goals`/`shots`/`shots_on_target`; the other side stays missing. Identity
/// is `(league, club, year, name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub role: PlayerRole,
    pub league: String,
    pub club: String,
    pub year: u16,
    pub name: String,
    pub num: Option<u32>,
    pub pos: String,
    pub age: Option<u32>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub nationality: String,
    pub appearances: Option<u32>,
    pub substitute_appearances: Option<u32>,
    pub saves: Option<u32>,
    pub goals_against: Option<u32>,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub shots: Option<u32>,
    pub shots_on_target: Option<u32>,
    pub fouls_committed: Option<u32>,
    pub fouls_awarded: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
}

/// Why a unit (league, day, or club-season) produced no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Block or error page persisted through every retry attempt.
    Blocked,
    /// Page fetched but the expected structure was absent.
    Malformed,
    /// Request failed at the transport level.
    Network(String),
}

/// One skipped unit in an otherwise-successful scrape.
///
/// Scrapes tolerate per-unit failures; the skip log is how callers detect
/// that a result set is incomplete instead of silently missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUnit {
    /// Human-readable unit key, e.g. a date or "club/season".
    pub unit: String,
    pub reason: SkipReason,
}

impl SkippedUnit {
    pub fn new(unit: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            unit: unit.into(),
            reason,
        }
    }
}

/// Output of a match scrape: completed matches, upcoming fixtures, and the
/// days that yielded nothing.
#[derive(Debug, Clone, Default)]
pub struct MatchResults {
    pub elapsed: Vec<MatchRecord>,
    pub fixtures: Vec<FixtureRecord>,
    pub skipped: Vec<SkippedUnit>,
}

/// Output of a roster scrape.
#[derive(Debug, Clone, Default)]
pub struct RosterResults {
    pub players: Vec<PlayerRecord>,
    pub skipped: Vec<SkippedUnit>,
}
