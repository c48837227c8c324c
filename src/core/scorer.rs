//! Sleep quality scorer.
//!
//! Turns a stream of `(virtual delta, microphone, motion)` samples into a
//! bounded quality score. Disturbed samples drain the score at a per-hour
//! rate; calm samples let it recover slowly back towards the maximum.

use crate::core::policy::{ScoringPolicy, SECONDS_PER_HOUR};
use crate::core::report::{Grade, SleepReport, Tip};
use serde::{Deserialize, Serialize};

/// How a single sensor sample is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Neither motion nor sound above threshold
    Calm,
    /// Microphone above threshold, motion below
    Snoring,
    /// Motion above threshold (regardless of microphone)
    Restless,
}

impl Classification {
    /// Classify a sample. Motion takes priority over sound.
    pub fn from_levels(policy: &ScoringPolicy, microphone_level: f64, motion_level: f64) -> Self {
        if motion_level > policy.restless_motion_threshold {
            Classification::Restless
        } else if microphone_level > policy.snoring_mic_threshold {
            Classification::Snoring
        } else {
            Classification::Calm
        }
    }

    /// Short status text shown next to the gauge.
    pub fn status_label(&self) -> &'static str {
        match self {
            Classification::Calm => "calm sleep",
            Classification::Snoring => "snoring",
            Classification::Restless => "restless",
        }
    }
}

/// Stateful scorer for one monitoring session.
#[derive(Debug, Clone)]
pub struct SleepScorer {
    policy: ScoringPolicy,
    score: f64,
    total_virtual_seconds: f64,
    snore_duration: f64,
    restless_duration: f64,
}

impl SleepScorer {
    /// Create a scorer using the default policy.
    pub fn new() -> Self {
        Self::with_policy(ScoringPolicy::default())
    }

    /// Create a scorer using a custom policy.
    pub fn with_policy(policy: ScoringPolicy) -> Self {
        Self {
            policy,
            score: policy.max_score,
            total_virtual_seconds: 0.0,
            snore_duration: 0.0,
            restless_duration: 0.0,
        }
    }

    /// Discard the current session and start from a full score.
    pub fn reset(&mut self) {
        self.score = self.policy.max_score;
        self.total_virtual_seconds = 0.0;
        self.snore_duration = 0.0;
        self.restless_duration = 0.0;
    }

    /// Classify a sample under this scorer's policy.
    pub fn classify(&self, microphone_level: f64, motion_level: f64) -> Classification {
        Classification::from_levels(&self.policy, microphone_level, motion_level)
    }

    /// Apply one sample covering `delta_virtual` seconds and return the new score.
    ///
    /// `delta_virtual` must be non-negative; readings are accepted as-is.
    pub fn update(&mut self, delta_virtual: f64, microphone_level: f64, motion_level: f64) -> f64 {
        self.total_virtual_seconds += delta_virtual;
        let delta_hours = delta_virtual / SECONDS_PER_HOUR;

        match self.classify(microphone_level, motion_level) {
            Classification::Restless => {
                self.score -= self.policy.restless_penalty_per_hour * delta_hours;
                self.restless_duration += delta_virtual;
            }
            Classification::Snoring => {
                self.score -= self.policy.snore_penalty_per_hour * delta_hours;
                self.snore_duration += delta_virtual;
            }
            Classification::Calm => {
                if self.score < self.policy.max_score {
                    self.score += self.policy.recovery_per_hour * delta_hours;
                }
            }
        }

        self.score = self.score.clamp(0.0, self.policy.max_score);
        self.score
    }

    /// Build the end-of-session report from the current state.
    pub fn analysis_report(&self) -> SleepReport {
        let total_hours = self.total_virtual_seconds / SECONDS_PER_HOUR;
        let snore_hours = self.snore_duration / SECONDS_PER_HOUR;
        let restless_hours = self.restless_duration / SECONDS_PER_HOUR;

        let mut tips = Vec::new();
        if snore_hours > self.policy.disturbance_tip_hours {
            tips.push(Tip::Snoring { hours: snore_hours });
        }
        if restless_hours > self.policy.disturbance_tip_hours {
            tips.push(Tip::Restless {
                hours: restless_hours,
            });
        }
        if total_hours < self.policy.short_sleep_hours {
            tips.push(Tip::ShortDuration {
                min_hours: self.policy.short_sleep_hours,
            });
        }
        if tips.is_empty() {
            tips.push(Tip::PerfectSleep);
        }

        SleepReport {
            grade: Grade::from_score(&self.policy, self.score),
            score: self.score,
            total_hours,
            snore_hours,
            restless_hours,
            tips,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn total_virtual_seconds(&self) -> f64 {
        self.total_virtual_seconds
    }

    pub fn snore_duration(&self) -> f64 {
        self.snore_duration
    }

    pub fn restless_duration(&self) -> f64 {
        self.restless_duration
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }
}

impl Default for SleepScorer {
    fn default() -> Self {
        Self::new()
    }
}
