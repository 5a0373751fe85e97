//! Page parsers for the source site.
//!
//! All positional and class-name assumptions about the site's markup live
//! here; a markup change on the site should only ever require touching one
//! of these adapters.

pub mod fixtures_page;
pub mod league_page;
pub mod roster_page;
pub mod teams_api;

pub use fixtures_page::{DayRows, FixturesPageParser};
pub use league_page::LeaguePageParser;
pub use roster_page::RosterPageParser;
pub use teams_api::{TeamsApiParser, TeamsResponse};

/// Normalize one table cell: trim, and map blank-like values (`""`, `"--"`)
/// to missing. Never zero.
pub(crate) fn clean_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "--" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse an integer cell, tolerating thousands separators ("12,345").
pub(crate) fn parse_int(cell: &str) -> Option<u32> {
    let digits: String = cell.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() || !cell.chars().all(|c| c.is_ascii_digit() || c == ',') {
        return None;
    }
    digits.parse().ok()
}
