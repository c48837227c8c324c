//! Virtual sleep clock.
//!
//! The simulator compresses a night into minutes by scaling real elapsed
//! time with a speed multiplier. The scorer only ever sees the scaled
//! (virtual) deltas produced here.

use std::time::Instant;

/// Slowest allowed speed: real time.
pub const MIN_MULTIPLIER: f64 = 1.0;

/// Fastest allowed speed: one real second is one virtual hour.
pub const MAX_MULTIPLIER: f64 = 3600.0;

/// Clamp a requested multiplier into the supported range.
pub fn clamp_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_nan() {
        return MIN_MULTIPLIER;
    }
    multiplier.clamp(MIN_MULTIPLIER, MAX_MULTIPLIER)
}

/// Converts real tick intervals into virtual elapsed seconds.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    multiplier: f64,
    last_tick: Option<Instant>,
}

impl VirtualClock {
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier: clamp_multiplier(multiplier),
            last_tick: None,
        }
    }

    /// Mark `now` as the start of a new measurement run.
    pub fn restart(&mut self, now: Instant) {
        self.last_tick = Some(now);
    }

    /// Virtual seconds elapsed since the previous tick.
    ///
    /// The first call after construction only sets the mark and returns 0.
    pub fn advance(&mut self, now: Instant) -> f64 {
        let delta_real = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_tick = Some(now);
        delta_real * self.multiplier
    }

    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.multiplier = clamp_multiplier(multiplier);
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Human readable description of the current speed.
    pub fn speed_label(&self) -> String {
        speed_label(self.multiplier)
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new(MIN_MULTIPLIER)
    }
}

/// Describe a multiplier the way the speed setting displays it.
pub fn speed_label(multiplier: f64) -> String {
    let m = clamp_multiplier(multiplier);
    if m < MAX_MULTIPLIER {
        let whole = m as u64;
        format!("{whole}x (1 second = {} minutes)", whole / 60)
    } else {
        "3600x (1 second = 1 hour)".to_string()
    }
}

/// Format virtual seconds as `HH:MM:SS`, truncating fractions.
pub fn format_elapsed(virtual_seconds: f64) -> String {
    let total = virtual_seconds.max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
