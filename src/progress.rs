//! Progress reporting for long-running fetch loops.
//!
//! Tracks elapsed/total counters across a scrape cycle and estimates the
//! remaining time from observed wall-clock throughput. One tracker serves one
//! cycle; call [`ProgressTracker::reset`] before reusing it for an unrelated
//! loop or the ETA math carries stale state.

use std::time::Instant;

use crate::error::{Result, ScrapeError};

/// Assumed cost per page before any throughput has been observed.
const SEED_SECS_PER_ITEM: f64 = 0.9;

#[derive(Debug, Default)]
pub struct ProgressTracker {
    last_started_at: Option<Instant>,
    remaining_secs: Option<f64>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report progress for one processed unit.
    ///
    /// The first call in a cycle records the start time and seeds the ETA at
    /// a fixed per-item cost; later calls recompute it from the wall clock.
    /// Returns a formatted `elapsed/total`, percentage and ETA string.
    pub fn report(&mut self, elapsed: u64, total: u64) -> Result<String> {
        if total == 0 {
            return Err(ScrapeError::InvalidArgument(
                "total must be greater than zero".into(),
            ));
        }
        if elapsed > total {
            return Err(ScrapeError::InvalidArgument(format!(
                "elapsed ({elapsed}) cannot be greater than total ({total})"
            )));
        }

        match self.last_started_at {
            None => {
                self.last_started_at = Some(Instant::now());
                self.remaining_secs = Some(total as f64 * SEED_SECS_PER_ITEM);
            }
            Some(started) if elapsed > 0 => {
                let wall = started.elapsed().as_secs_f64();
                let full_run = wall * total as f64 / elapsed as f64;
                self.remaining_secs = Some(full_run - wall);
            }
            // No units finished yet; keep the seeded estimate.
            Some(_) => {}
        }

        let pct = elapsed as f64 / total as f64 * 100.0;
        let eta = self.remaining_secs.unwrap_or(0.0);

        Ok(format!(
            "{elapsed}/{total}\t\t{pct:.2}%\t\tETA: {eta:.2} second(s)"
        ))
    }

    /// Clear the cycle state. Required between independent scrape cycles.
    pub fn reset(&mut self) {
        self.last_started_at = None;
        self.remaining_secs = None;
    }
}
