//! Timestamped flat-file snapshots.
//!
//! Each snapshot is a CSV table preceded by a single `# Timestamp: <UTC ISO>`
//! comment line. Readers must skip that line before handing the rest to the
//! CSV parser; this module owns both sides of that convention.

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, ScrapeError};

const TIMESTAMP_PREFIX: &str = "# Timestamp: ";

/// Write records to `path` with a leading timestamp line and a header row.
pub fn write_snapshot<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(path)?;
    writeln!(
        file,
        "{}{}",
        TIMESTAMP_PREFIX,
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;

    let mut writer = csv::Writer::from_writer(file);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// Read records back, skipping the leading timestamp comment line.
pub fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|e| {
        ScrapeError::Snapshot(format!("cannot read snapshot {}: {e}", path.display()))
    })?;

    let body = strip_header(&content);
    let mut reader = csv::Reader::from_reader(body.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }

    Ok(records)
}

/// When the snapshot was written, if the header line is present and parses.
pub fn read_timestamp(path: &Path) -> Option<DateTime<Utc>> {
    let content = fs::read_to_string(path).ok()?;
    let first = content.lines().next()?;
    let stamp = first.strip_prefix(TIMESTAMP_PREFIX)?;
    DateTime::parse_from_rfc3339(stamp.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn strip_header(content: &str) -> &str {
    if content.starts_with('#') {
        match content.split_once('\n') {
            Some((_, rest)) => rest,
            None => "",
        }
    } else {
        content
    }
}
