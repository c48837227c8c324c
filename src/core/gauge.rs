//! Circular score gauge.

use serde::{Deserialize, Serialize};

/// Full sweep of the gauge arc in degrees (a complete circle is never drawn).
pub const GAUGE_SWEEP_DEGREES: f64 = 359.0;

/// Scores above this are drawn in the "good" colour.
pub const GOOD_SCORE_ABOVE: f64 = 70.0;

/// Scores below this are drawn in the "bad" colour.
pub const BAD_SCORE_BELOW: f64 = 40.0;

/// Colour band of the gauge arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeBand {
    Good,
    Warn,
    Bad,
}

/// Geometry of the gauge for a given score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub score: f64,
    pub angle_degrees: f64,
    pub band: GaugeBand,
}

impl Gauge {
    pub fn from_score(score: f64) -> Self {
        let band = if score > GOOD_SCORE_ABOVE {
            GaugeBand::Good
        } else if score < BAD_SCORE_BELOW {
            GaugeBand::Bad
        } else {
            GaugeBand::Warn
        };

        Self {
            score,
            angle_degrees: (score / 100.0) * GAUGE_SWEEP_DEGREES,
            band,
        }
    }

    /// Text rendering of the arc as a bar of `width` cells.
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.angle_degrees / GAUGE_SWEEP_DEGREES) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle() {
        assert_eq!(Gauge::from_score(100.0).angle_degrees, 359.0);
        assert_eq!(Gauge::from_score(0.0).angle_degrees, 0.0);
        assert!((Gauge::from_score(50.0).angle_degrees - 179.5).abs() < 1e-9);
    }

    #[test]
    fn test_bands() {
        assert_eq!(Gauge::from_score(70.1).band, GaugeBand::Good);
        assert_eq!(Gauge::from_score(70.0).band, GaugeBand::Warn);
        assert_eq!(Gauge::from_score(40.0).band, GaugeBand::Warn);
        assert_eq!(Gauge::from_score(39.9).band, GaugeBand::Bad);
    }

    #[test]
    fn test_bar() {
        assert_eq!(Gauge::from_score(100.0).bar(10), "[##########]");
        assert_eq!(Gauge::from_score(0.0).bar(4), "[....]");
        assert_eq!(Gauge::from_score(50.0).bar(10), "[#####.....]");
    }
}
