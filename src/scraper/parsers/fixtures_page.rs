//! Match rows parser for the per-day fixtures/results page.
//!
//! Columns map positionally to `[club1, score-or-link-text, club2,
//! time-or-duration, location, attendance]`. The fourth field decides the
//! row's fate: a "LIVE" marker or an "H:MM" kick-off time makes it a fixture,
//! anything else (usually "FT") makes it an elapsed match.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use scraper::{ElementRef, Html, Selector};

use super::{clean_cell, parse_int};
use crate::dates::utc_to_local;
use crate::error::{Result, ScrapeError};
use crate::types::{FixtureRecord, MatchRecord};

/// UTC kick-off stamp carried in the `data-date` attribute.
const DATA_DATE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Parsed rows for one day
#[derive(Debug, Default)]
pub struct DayRows {
    pub elapsed: Vec<MatchRecord>,
    pub fixtures: Vec<FixtureRecord>,
}

/// Parser for per-day fixtures pages
pub struct FixturesPageParser;

impl FixturesPageParser {
    /// Probe for a block or error page.
    ///
    /// The site signals blocks through a localized "404" title, but that is
    /// not exhaustive; generic block markers are probed too, and callers
    /// treat any malformed page the same way (retry, then skip).
    pub fn is_block_page(html: &str) -> bool {
        let document = Html::parse_document(html);
        let title_selector = Selector::parse("title").expect("static selector");

        let Some(title) = document.select(&title_selector).next() else {
            return false;
        };

        let title = title.text().collect::<String>().to_lowercase();
        ["404", "not found", "access denied", "captcha"]
            .iter()
            .any(|marker| title.contains(marker))
    }

    /// Parse every results table on the page into elapsed/fixture rows.
    ///
    /// Fails with `MalformedPage` when no results tables are present at all;
    /// tables with no usable rows simply contribute nothing.
    pub fn parse(html: &str, date: NaiveDate) -> Result<DayRows> {
        let document = Html::parse_document(html);

        let tbody_selector = Selector::parse("tbody").expect("static selector");
        let tr_selector = Selector::parse("tr").expect("static selector");

        let mut tables = document.select(&tbody_selector).peekable();
        if tables.peek().is_none() {
            return Err(ScrapeError::MalformedPage(format!(
                "no results tables on fixtures page for {date}"
            )));
        }

        let mut rows = DayRows::default();
        for table in tables {
            for row in table.select(&tr_selector) {
                Self::parse_row(row, date, &mut rows);
            }
        }

        Ok(rows)
    }

    fn parse_row(row: ElementRef<'_>, date: NaiveDate, out: &mut DayRows) {
        let fields = Self::collect_fields(row);

        // Cleaned view; separator and decoration rows melt away here.
        let cleaned: Vec<Option<String>> =
            fields.iter().map(|field| clean_cell(field)).collect();
        let populated = cleaned.iter().filter(|cell| cell.is_some()).count();
        if populated <= 1 || cleaned.len() < 4 {
            return;
        }

        // The first four positions are the identity of the row; a row that
        // lost any of them is separator junk.
        let (Some(club1), Some(second), Some(club2), Some(marker)) = (
            cleaned[0].clone(),
            cleaned[1].clone(),
            cleaned[2].clone(),
            cleaned[3].clone(),
        ) else {
            return;
        };

        let is_fixture = marker == "LIVE" || marker.contains(':');
        if is_fixture {
            out.fixtures.push(FixtureRecord {
                date,
                club1,
                score_placeholder: second,
                club2,
                time: marker,
                tv: cleaned.get(4).cloned().flatten(),
            });
        } else {
            let attendance = cleaned
                .get(5)
                .cloned()
                .flatten()
                .and_then(|cell| parse_int(&cell));
            out.elapsed.push(MatchRecord {
                date,
                club1,
                score: second,
                club2,
                duration: marker,
                location: cleaned.get(4).cloned().flatten(),
                attendance,
            });
        }
    }

    /// Walk the row's cells into positional fields.
    ///
    /// Cell 0 carries both the home club and the score link, cell 1 the away
    /// club, cell 2 either a `data-date` kick-off stamp or a duration link;
    /// everything after is taken as plain text. Cells wrapping a `<small>`
    /// element are decoration and are skipped outright.
    fn collect_fields(row: ElementRef<'_>) -> Vec<String> {
        let td_selector = Selector::parse("td").expect("static selector");
        let span_selector = Selector::parse("span").expect("static selector");
        let a_selector = Selector::parse("a").expect("static selector");
        let small_selector = Selector::parse("small").expect("static selector");

        let mut fields = Vec::new();
        for (index, cell) in row.select(&td_selector).enumerate() {
            if cell.select(&small_selector).next().is_some() {
                continue;
            }

            match index {
                0 => {
                    let club1 = cell
                        .select(&span_selector)
                        .next()
                        .map(|span| span.text().collect::<String>())
                        .unwrap_or_default();
                    let score = cell
                        .select(&a_selector)
                        .last()
                        .map(|link| link.text().collect::<String>())
                        .unwrap_or_default();
                    fields.push(club1);
                    fields.push(score);
                }
                1 => {
                    let club2 = cell
                        .select(&span_selector)
                        .last()
                        .map(|span| span.text().collect::<String>())
                        .unwrap_or_default();
                    fields.push(club2);
                }
                2 => fields.push(Self::time_or_duration(cell)),
                _ => fields.push(cell.text().collect::<String>()),
            }
        }

        fields
    }

    fn time_or_duration(cell: ElementRef<'_>) -> String {
        if let Some(stamp) = cell.value().attr("data-date") {
            if let Ok(naive) = NaiveDateTime::parse_from_str(stamp, DATA_DATE_FORMAT) {
                let local = utc_to_local(Utc.from_utc_datetime(&naive));
                return format!("{}:{:02}", local.hour(), local.minute());
            }
        }

        let a_selector = Selector::parse("a").expect("static selector");
        cell.select(&a_selector)
            .next()
            .map(|link| link.text().collect::<String>())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 10, 1).unwrap()
    }

    const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Soccer fixtures and results</title></head>
<body>
<table><tbody>
  <tr>
    <td><span>Barcelona</span> <a href="/match/1">3 - 1</a></td>
    <td><span>Real Madrid</span></td>
    <td><a href="/match/1">FT</a></td>
    <td>Camp Nou, Barcelona, Spain</td>
    <td>99,354</td>
  </tr>
  <tr>
    <td><span>Chelsea</span> <a href="/match/2">v</a></td>
    <td><span>Arsenal</span></td>
    <td><a href="/match/2">LIVE</a></td>
    <td>Sky Sports</td>
  </tr>
  <tr>
    <td></td>
  </tr>
</tbody></table>
</body>
</html>"#;

    #[test]
    fn test_elapsed_and_live_rows_split() {
        let rows = FixturesPageParser::parse(SAMPLE_HTML, day()).unwrap();

        assert_eq!(rows.elapsed.len(), 1);
        assert_eq!(rows.fixtures.len(), 1);

        let m = &rows.elapsed[0];
        assert_eq!(m.club1, "Barcelona");
        assert_eq!(m.score, "3 - 1");
        assert_eq!(m.club2, "Real Madrid");
        assert_eq!(m.duration, "FT");
        assert_eq!(m.location.as_deref(), Some("Camp Nou, Barcelona, Spain"));
        assert_eq!(m.attendance, Some(99_354));
        assert_eq!(m.date, day());

        let f = &rows.fixtures[0];
        assert_eq!(f.club1, "Chelsea");
        assert_eq!(f.score_placeholder, "v");
        assert_eq!(f.club2, "Arsenal");
        assert_eq!(f.time, "LIVE");
        assert_eq!(f.tv.as_deref(), Some("Sky Sports"));
    }

    #[test]
    fn test_kickoff_stamp_becomes_local_time_fixture() {
        let html = r##"<table><tbody><tr>
          <td><span>Inter</span> <a href="#">v</a></td>
          <td><span>Milan</span></td>
          <td data-date="2021-10-01T18:30Z"></td>
          <td>DAZN</td>
        </tr></tbody></table>"##;

        let rows = FixturesPageParser::parse(html, day()).unwrap();
        assert!(rows.elapsed.is_empty());
        assert_eq!(rows.fixtures.len(), 1);
        // Local wall-clock time, always H:MM shaped
        assert!(rows.fixtures[0].time.contains(':'));
    }

    #[test]
    fn test_no_tables_is_malformed() {
        let err = FixturesPageParser::parse("<html><body></body></html>", day()).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedPage(_)));
    }

    #[test]
    fn test_block_page_detection() {
        let blocked = "<html><head><title>Error 404 - Page Not Found</title></head></html>";
        assert!(FixturesPageParser::is_block_page(blocked));
        assert!(!FixturesPageParser::is_block_page(SAMPLE_HTML));
    }

    #[test]
    fn test_sparse_rows_dropped() {
        let rows = FixturesPageParser::parse(SAMPLE_HTML, day()).unwrap();
        // The single-cell junk row contributes nothing.
        assert_eq!(rows.elapsed.len() + rows.fixtures.len(), 2);
    }

    #[test]
    fn test_blank_like_attendance_is_missing() {
        let html = r##"<table><tbody><tr>
          <td><span>Ajax</span> <a href="#">0 - 0</a></td>
          <td><span>PSV</span></td>
          <td><a href="#">FT</a></td>
          <td>Johan Cruijff ArenA</td>
          <td>--</td>
        </tr></tbody></table>"##;

        let rows = FixturesPageParser::parse(html, day()).unwrap();
        assert_eq!(rows.elapsed[0].attendance, None);
    }
}
