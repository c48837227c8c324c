//! Scoring policy: the thresholds and rates that drive the sleep scorer.
//!
//! Every constant the scorer and report depend on lives here so that a
//! session can be replayed under a different policy without touching the
//! scoring code.

use serde::{Deserialize, Serialize};

/// Seconds in one hour, used to turn per-hour rates into per-sample deltas.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Immutable set of thresholds and per-hour rates used by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Motion reading above which a sample is classified restless
    pub restless_motion_threshold: f64,
    /// Microphone reading above which a sample is classified snoring
    pub snoring_mic_threshold: f64,
    /// Score lost per hour of restless sleep
    pub restless_penalty_per_hour: f64,
    /// Score lost per hour of snoring
    pub snore_penalty_per_hour: f64,
    /// Score regained per hour of calm sleep
    pub recovery_per_hour: f64,
    /// Upper bound (and starting value) of the score
    pub max_score: f64,
    /// Minimum score graded excellent
    pub excellent_min_score: f64,
    /// Minimum score graded adequate
    pub adequate_min_score: f64,
    /// Disturbance hours above which an advisory tip is emitted
    pub disturbance_tip_hours: f64,
    /// Total hours below which the short-sleep tip is emitted
    pub short_sleep_hours: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            restless_motion_threshold: 40.0,
            snoring_mic_threshold: 50.0,
            restless_penalty_per_hour: 40.0,
            snore_penalty_per_hour: 25.0,
            recovery_per_hour: 10.0,
            max_score: 100.0,
            excellent_min_score: 80.0,
            adequate_min_score: 60.0,
            disturbance_tip_hours: 0.5,
            short_sleep_hours: 6.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_constants() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.restless_motion_threshold, 40.0);
        assert_eq!(policy.snoring_mic_threshold, 50.0);
        assert_eq!(policy.excellent_min_score, 80.0);
        assert_eq!(policy.adequate_min_score, 60.0);
        assert!(policy.adequate_min_score < policy.excellent_min_score);
    }

    #[test]
    fn test_policy_json_shape() {
        let json = serde_json::to_value(ScoringPolicy::default()).unwrap();
        assert_eq!(json["snore_penalty_per_hour"], 25.0);
        assert_eq!(json["recovery_per_hour"], 10.0);
    }
}
