//! Monitoring session driver.
//!
//! Owns the scorer for one night and enforces the rules around it:
//! - a session only starts when the bed-pressure sensor shows someone lying down
//! - each tick converts real elapsed time to virtual time and performs exactly one update
//! - a tick that finds the bed empty stops the session and produces the report
//!
//! ```text
//! Idle ──start──▶ Running ──stop / auto-stop──▶ Reported ──dismiss──▶ Idle
//! ```

use crate::core::clock::{format_elapsed, VirtualClock};
use crate::core::gauge::Gauge;
use crate::core::history::{SensorHistory, DEFAULT_HISTORY_CAPACITY};
use crate::core::policy::{ScoringPolicy, SECONDS_PER_HOUR};
use crate::core::report::SleepReport;
use crate::core::scorer::{Classification, SleepScorer};
use crate::sensors::types::SensorLevels;
use crate::stats::TickTally;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;

/// Bed-pressure reading below which nobody is considered in bed.
pub const DEFAULT_BED_PRESENCE_THRESHOLD: f64 = 20.0;

/// Errors returned when the session is driven out of order.
#[derive(Debug, Error, PartialEq)]
pub enum MonitorError {
    #[error("nobody in bed (pressure {pressure:.1} < {threshold:.1}); raise the pressure sensor")]
    NoBedPresence { pressure: f64, threshold: f64 },
    #[error("a monitoring session is already running")]
    AlreadyRunning,
    #[error("no monitoring session is running")]
    NotRunning,
}

/// Settings that shape a monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonitorSettings {
    pub policy: ScoringPolicy,
    pub time_multiplier: f64,
    pub bed_presence_threshold: f64,
    pub history_capacity: usize,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            time_multiplier: 1.0,
            bed_presence_threshold: DEFAULT_BED_PRESENCE_THRESHOLD,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// Lifecycle state of a monitor.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorState {
    Idle,
    Running,
    Reported(SleepReport),
}

/// Everything the dashboard needs after one scored tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickFrame {
    pub delta_virtual: f64,
    pub score: f64,
    pub classification: Classification,
    pub status: String,
    pub gauge: Gauge,
    pub elapsed: String,
    pub total_virtual_seconds: f64,
    pub levels: SensorLevels,
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No session is running; nothing happened
    Inactive,
    /// The scorer was updated
    Updated(TickFrame),
    /// The bed emptied; the session ended with this report
    AutoStopped(SleepReport),
}

/// Drives a [`SleepScorer`] from panel readings on a periodic tick.
pub struct SessionMonitor {
    scorer: SleepScorer,
    clock: VirtualClock,
    history: SensorHistory,
    tally: TickTally,
    bed_presence_threshold: f64,
    state: MonitorState,
}

impl SessionMonitor {
    pub fn new(settings: MonitorSettings) -> Self {
        Self {
            scorer: SleepScorer::with_policy(settings.policy),
            clock: VirtualClock::new(settings.time_multiplier),
            history: SensorHistory::new(settings.history_capacity),
            tally: TickTally::new(),
            bed_presence_threshold: settings.bed_presence_threshold,
            state: MonitorState::Idle,
        }
    }

    /// Begin a new session if someone is in bed.
    pub fn start(&mut self, levels: SensorLevels, now: Instant) -> Result<(), MonitorError> {
        if self.is_running() {
            return Err(MonitorError::AlreadyRunning);
        }
        if !self.bed_occupied(&levels) {
            tracing::warn!(
                pressure = levels.pressure,
                threshold = self.bed_presence_threshold,
                "refusing to start: bed is empty"
            );
            return Err(MonitorError::NoBedPresence {
                pressure: levels.pressure,
                threshold: self.bed_presence_threshold,
            });
        }

        self.scorer.reset();
        self.history.clear();
        self.tally.reset();
        self.clock.restart(now);
        self.state = MonitorState::Running;

        tracing::info!(speed = %self.clock.speed_label(), "monitoring session started");
        Ok(())
    }

    /// Advance the session by the real time elapsed since the previous tick.
    pub fn tick(&mut self, levels: SensorLevels, now: Instant) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Inactive;
        }

        let delta_virtual = self.clock.advance(now);
        self.apply(levels, delta_virtual)
    }

    /// Advance the session by an explicit amount of virtual time, bypassing
    /// the clock. Used by scripted nights.
    pub fn advance_virtual(&mut self, levels: SensorLevels, delta_virtual: f64) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Inactive;
        }
        self.apply(levels, delta_virtual)
    }

    fn apply(&mut self, levels: SensorLevels, delta_virtual: f64) -> TickOutcome {
        if !self.bed_occupied(&levels) {
            tracing::info!(
                pressure = levels.pressure,
                "bed pressure lost; stopping session automatically"
            );
            return TickOutcome::AutoStopped(self.finish());
        }

        let classification = self.scorer.classify(levels.microphone, levels.motion);
        let score = self
            .scorer
            .update(delta_virtual, levels.microphone, levels.motion);
        self.tally.record(classification);

        let total_virtual_seconds = self.scorer.total_virtual_seconds();
        let hour = total_virtual_seconds / SECONDS_PER_HOUR;
        if self.history.record(hour, levels, self.clock.multiplier()) {
            self.tally.record_history_point();
        }

        tracing::trace!(delta_virtual, score, ?classification, "tick");

        TickOutcome::Updated(TickFrame {
            delta_virtual,
            score,
            classification,
            status: classification.status_label().to_string(),
            gauge: Gauge::from_score(score),
            elapsed: format_elapsed(total_virtual_seconds),
            total_virtual_seconds,
            levels,
        })
    }

    /// End the running session on request.
    pub fn stop(&mut self) -> Result<SleepReport, MonitorError> {
        if !self.is_running() {
            return Err(MonitorError::NotRunning);
        }
        tracing::info!("monitoring session stopped");
        Ok(self.finish())
    }

    /// Leave the reported state after the summary has been shown.
    pub fn dismiss(&mut self) {
        if matches!(self.state, MonitorState::Reported(_)) {
            self.state = MonitorState::Idle;
        }
    }

    fn finish(&mut self) -> SleepReport {
        let report = self.scorer.analysis_report();
        tracing::debug!(
            grade = %report.grade,
            score = report.score,
            total_hours = report.total_hours,
            "session report ready"
        );
        self.state = MonitorState::Reported(report.clone());
        report
    }

    fn bed_occupied(&self, levels: &SensorLevels) -> bool {
        levels.pressure >= self.bed_presence_threshold
    }

    pub fn set_time_multiplier(&mut self, multiplier: f64) {
        self.clock.set_multiplier(multiplier);
        tracing::info!(speed = %self.clock.speed_label(), "time multiplier changed");
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, MonitorState::Running)
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Report of the last finished session, if it has not been dismissed.
    pub fn last_report(&self) -> Option<&SleepReport> {
        match &self.state {
            MonitorState::Reported(report) => Some(report),
            _ => None,
        }
    }

    pub fn scorer(&self) -> &SleepScorer {
        &self.scorer
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn history(&self) -> &SensorHistory {
        &self.history
    }

    pub fn tally(&self) -> &TickTally {
        &self.tally
    }

    pub fn bed_presence_threshold(&self) -> f64 {
        self.bed_presence_threshold
    }
}

impl Default for SessionMonitor {
    fn default() -> Self {
        Self::new(MonitorSettings::default())
    }
}
