//! Squad roster parser for the per-club-per-season page.
//!
//! A usable squad page carries exactly two tables: goalkeepers first, then
//! outfield players. The two tables share their leading columns but diverge
//! on the statistics side, so rows are typed by role and merged into the wide
//! `PlayerRecord` schema with the other role's stats left missing.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{clean_cell, parse_int};
use crate::error::{Result, ScrapeError};
use crate::types::{PlayerRecord, PlayerRole};

/// Feet/inches to centimeters
const CM_PER_FOOT: f64 = 30.48;
const CM_PER_INCH: f64 = 2.54;
/// Pounds per kilogram
const LBS_PER_KG: f64 = 2.205;

/// Parser for squad pages
pub struct RosterPageParser;

impl RosterPageParser {
    /// Parse both roster tables into merged player records.
    ///
    /// Fails with `MalformedPage` unless the page has exactly two roster
    /// tables; anything else is a placeholder page for a season the club did
    /// not play.
    pub fn parse(
        html: &str,
        league: &str,
        club: &str,
        year: u16,
    ) -> Result<Vec<PlayerRecord>> {
        let document = Html::parse_document(html);

        let table_selector = Selector::parse("table.Table").expect("static selector");
        let tables: Vec<_> = document.select(&table_selector).collect();
        if tables.len() != 2 {
            return Err(ScrapeError::MalformedPage(format!(
                "expected 2 roster tables for {club} season {year}, found {}",
                tables.len()
            )));
        }

        let mut players = Vec::new();
        for (table, role) in tables
            .into_iter()
            .zip([PlayerRole::Goalkeeper, PlayerRole::Outfield])
        {
            Self::parse_table(table, role, league, club, year, &mut players);
        }

        Ok(players)
    }

    fn parse_table(
        table: ElementRef<'_>,
        role: PlayerRole,
        league: &str,
        club: &str,
        year: u16,
        out: &mut Vec<PlayerRecord>,
    ) {
        let tr_selector = Selector::parse("tr").expect("static selector");
        let td_selector = Selector::parse("td").expect("static selector");

        for row in table.select(&tr_selector) {
            // Header rows carry <th> cells and contribute nothing here.
            // Truly empty cells are dropped; "--" placeholders keep their
            // position and become missing when typed.
            let cells: Vec<String> = row
                .select(&td_selector)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty())
                .collect();
            if cells.is_empty() {
                continue;
            }

            if let Some(player) = Self::parse_player(&cells, role, league, club, year) {
                out.push(player);
            }
        }
    }

    /// Positional cell mapping, shared prefix then role-specific stats:
    /// `name(+num), pos, age, ht, wt, nat, app, sub` then for goalkeepers
    /// `sv, ga, a, fc, fa, yc, rc` and for outfield `g, a, sh, st, fc, fa,
    /// yc, rc`.
    fn parse_player(
        cells: &[String],
        role: PlayerRole,
        league: &str,
        club: &str,
        year: u16,
    ) -> Option<PlayerRecord> {
        let (name, num) = Self::split_jersey_number(cells.first()?);
        if name.is_empty() {
            return None;
        }

        let cell = |index: usize| cells.get(index).and_then(|c| clean_cell(c));
        let int_cell = |index: usize| cell(index).and_then(|c| parse_int(&c));

        let mut player = PlayerRecord {
            role,
            league: league.to_string(),
            club: club.to_string(),
            year,
            name,
            num,
            pos: cell(1).unwrap_or_default(),
            age: int_cell(2),
            height_cm: cell(3).and_then(|c| Self::parse_height_cm(&c)),
            weight_kg: cell(4).and_then(|c| Self::parse_weight_kg(&c)),
            nationality: cell(5).unwrap_or_default(),
            appearances: int_cell(6),
            substitute_appearances: int_cell(7),
            saves: None,
            goals_against: None,
            goals: None,
            assists: None,
            shots: None,
            shots_on_target: None,
            fouls_committed: None,
            fouls_awarded: None,
            yellow_cards: None,
            red_cards: None,
        };

        match role {
            PlayerRole::Goalkeeper => {
                player.saves = int_cell(8);
                player.goals_against = int_cell(9);
                player.assists = int_cell(10);
                player.fouls_committed = int_cell(11);
                player.fouls_awarded = int_cell(12);
                player.yellow_cards = int_cell(13);
                player.red_cards = int_cell(14);
            }
            PlayerRole::Outfield => {
                player.goals = int_cell(8);
                player.assists = int_cell(9);
                player.shots = int_cell(10);
                player.shots_on_target = int_cell(11);
                player.fouls_committed = int_cell(12);
                player.fouls_awarded = int_cell(13);
                player.yellow_cards = int_cell(14);
                player.red_cards = int_cell(15);
            }
        }

        // A row that cleaned down to fewer than three populated fields is a
        // separator or banner row, not a player.
        if Self::populated_fields(&player) < 3 {
            return None;
        }

        Some(player)
    }

    /// Split a trailing jersey number off the name cell: "Messi10" becomes
    /// ("Messi", Some(10)); a cell with no trailing digits keeps its full
    /// text and a missing number.
    fn split_jersey_number(cell: &str) -> (String, Option<u32>) {
        let number_re = Regex::new(r"(\d+)$").expect("static regex");

        match number_re.captures(cell) {
            Some(caps) => {
                let num = caps[1].parse().ok();
                let name = cell[..cell.len() - caps[1].len()].trim().to_string();
                (name, num)
            }
            None => (cell.trim().to_string(), None),
        }
    }

    /// `F'I"` to centimeters; unparseable or blank is missing, never zero.
    fn parse_height_cm(cell: &str) -> Option<f64> {
        let (feet, rest) = cell.split_once('\'')?;
        let inches = rest.trim_end().strip_suffix('"')?;

        let feet: f64 = feet.trim().parse().ok()?;
        let inches: f64 = inches.trim().parse().ok()?;

        Some(feet * CM_PER_FOOT + inches * CM_PER_INCH)
    }

    /// `"N lbs"` to kilograms; unparseable or blank is missing, never zero.
    fn parse_weight_kg(cell: &str) -> Option<f64> {
        let pounds = cell.split_whitespace().next()?;
        let pounds: f64 = pounds.parse().ok()?;
        Some(pounds / LBS_PER_KG)
    }

    /// Fields parsed out of the row itself: the name (always present by the
    /// time this runs) plus whichever typed cells survived cleaning. The
    /// constant league/club/year columns do not count.
    fn populated_fields(player: &PlayerRecord) -> usize {
        1 + [
            player.num.is_some(),
            !player.pos.is_empty(),
            player.age.is_some(),
            player.height_cm.is_some(),
            player.weight_kg.is_some(),
            !player.nationality.is_empty(),
            player.appearances.is_some(),
            player.substitute_appearances.is_some(),
            player.saves.is_some(),
            player.goals_against.is_some(),
            player.goals.is_some(),
            player.assists.is_some(),
            player.shots.is_some(),
            player.shots_on_target.is_some(),
            player.fouls_committed.is_some(),
            player.fouls_awarded.is_some(),
            player.yellow_cards.is_some(),
            player.red_cards.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}
