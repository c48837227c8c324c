//! Per-session tick counters.
//!
//! Tracks how the monitor's ticks were classified so the end-of-session
//! output can show what the score was built from.

use crate::core::scorer::Classification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for one monitoring session.
#[derive(Debug, Clone)]
pub struct TickTally {
    calm_ticks: u64,
    snoring_ticks: u64,
    restless_ticks: u64,
    history_points: u64,
    session_start: DateTime<Utc>,
}

impl TickTally {
    pub fn new() -> Self {
        Self {
            calm_ticks: 0,
            snoring_ticks: 0,
            restless_ticks: 0,
            history_points: 0,
            session_start: Utc::now(),
        }
    }

    /// Record one scored tick.
    pub fn record(&mut self, classification: Classification) {
        match classification {
            Classification::Calm => self.calm_ticks += 1,
            Classification::Snoring => self.snoring_ticks += 1,
            Classification::Restless => self.restless_ticks += 1,
        }
    }

    /// Record a point added to the chart history.
    pub fn record_history_point(&mut self) {
        self.history_points += 1;
    }

    /// Reset all counters and restart the wall-clock session timer.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn stats(&self) -> TallyStats {
        TallyStats {
            ticks: self.calm_ticks + self.snoring_ticks + self.restless_ticks,
            calm_ticks: self.calm_ticks,
            snoring_ticks: self.snoring_ticks,
            restless_ticks: self.restless_ticks,
            history_points: self.history_points,
            session_start: self.session_start,
            wall_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.stats();
        format!(
            "Session Statistics:\n\
             - Ticks scored: {}\n\
             - Calm ticks: {}\n\
             - Snoring ticks: {}\n\
             - Restless ticks: {}\n\
             - Chart points recorded: {}\n\
             - Wall-clock duration: {} seconds",
            stats.ticks,
            stats.calm_ticks,
            stats.snoring_ticks,
            stats.restless_ticks,
            stats.history_points,
            stats.wall_duration_secs
        )
    }
}

impl Default for TickTally {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of tick counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TallyStats {
    pub ticks: u64,
    pub calm_ticks: u64,
    pub snoring_ticks: u64,
    pub restless_ticks: u64,
    pub history_points: u64,
    pub session_start: DateTime<Utc>,
    pub wall_duration_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counting() {
        let mut tally = TickTally::new();
        tally.record(Classification::Calm);
        tally.record(Classification::Calm);
        tally.record(Classification::Snoring);
        tally.record(Classification::Restless);
        tally.record_history_point();

        let stats = tally.stats();
        assert_eq!(stats.ticks, 4);
        assert_eq!(stats.calm_ticks, 2);
        assert_eq!(stats.snoring_ticks, 1);
        assert_eq!(stats.restless_ticks, 1);
        assert_eq!(stats.history_points, 1);
    }

    #[test]
    fn test_tally_reset() {
        let mut tally = TickTally::new();
        tally.record(Classification::Restless);
        tally.reset();
        assert_eq!(tally.stats().ticks, 0);
    }

    #[test]
    fn test_summary_format() {
        let summary = TickTally::new().summary();
        assert!(summary.contains("Ticks scored: 0"));
        assert!(summary.contains("Snoring ticks"));
        assert!(summary.contains("Restless ticks"));
    }
}
