//! Calendar-day enumeration and compact date formats.
//!
//! The source site keys its fixtures pages by `YYYYMMDD` date strings, so the
//! scrapers deal in that compact form and convert back to `NaiveDate` at the
//! parser boundary.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

use crate::error::{Result, ScrapeError};

/// Compact date format used in fixtures page URLs and snapshots.
pub const COMPACT_FORMAT: &str = "%Y%m%d";

/// Every calendar day from `start` to `end` inclusive as `YYYYMMDD` strings,
/// ascending.
pub fn dates_between(start: NaiveDate, end: NaiveDate) -> Result<Vec<String>> {
    if start > end {
        return Err(ScrapeError::InvalidRange {
            start: start.format(COMPACT_FORMAT).to_string(),
            end: end.format(COMPACT_FORMAT).to_string(),
        });
    }

    let days = (end - start).num_days();
    let mut out = Vec::with_capacity(days as usize + 1);
    for i in 0..=days {
        let day = start + Duration::days(i);
        out.push(day.format(COMPACT_FORMAT).to_string());
    }

    Ok(out)
}

/// Parse a `YYYYMMDD` string into a date.
pub fn parse_compact_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, COMPACT_FORMAT)?)
}

/// Convert a UTC-labeled timestamp to the host's local civil time.
pub fn utc_to_local(utc: DateTime<Utc>) -> DateTime<Local> {
    utc.with_timezone(&Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_dates_between_inclusive() {
        let start = NaiveDate::from_ymd_opt(2021, 9, 28).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 10, 2).unwrap();

        let days = dates_between(start, end).unwrap();
        assert_eq!(days.len(), 5);
        assert_eq!(days.first().unwrap(), "20210928");
        assert_eq!(days.last().unwrap(), "20211002");
        // Strictly ascending
        for pair in days.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_dates_between_single_day() {
        let day = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        let days = dates_between(day, day).unwrap();
        assert_eq!(days, vec!["20200229".to_string()]);
    }

    #[test]
    fn test_dates_between_rejects_inverted_range() {
        let start = NaiveDate::from_ymd_opt(2021, 10, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2021, 9, 28).unwrap();

        let err = dates_between(start, end).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidRange { .. }));
    }

    #[test]
    fn test_parse_compact_date() {
        let date = parse_compact_date("20211001").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 10, 1).unwrap());
    }

    #[test]
    fn test_parse_compact_date_malformed() {
        assert!(parse_compact_date("2021-10-01").is_err());
        assert!(parse_compact_date("garbage").is_err());
    }

    #[test]
    fn test_utc_to_local_preserves_instant() {
        let utc = Utc.with_ymd_and_hms(2021, 10, 1, 12, 30, 0).unwrap();
        let local = utc_to_local(utc);
        assert_eq!(local.with_timezone(&Utc), utc);
        assert_eq!(local.minute(), 30);
    }
}
