//! End-of-session sleep report.

use crate::core::policy::ScoringPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical sleep quality derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Adequate,
    Poor,
}

impl Grade {
    pub fn from_score(policy: &ScoringPolicy, score: f64) -> Self {
        if score >= policy.excellent_min_score {
            Grade::Excellent
        } else if score >= policy.adequate_min_score {
            Grade::Adequate
        } else {
            Grade::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Excellent => "excellent",
            Grade::Adequate => "adequate",
            Grade::Poor => "poor",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory shown in the report. Order in a report is fixed by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tip {
    /// Snoring exceeded the advisory threshold
    Snoring { hours: f64 },
    /// Restlessness exceeded the advisory threshold
    Restless { hours: f64 },
    /// Total sleep shorter than the recommended minimum
    ShortDuration { min_hours: f64 },
    /// Nothing to improve
    PerfectSleep,
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tip::Snoring { hours } => write!(
                f,
                "Snoring detected for {hours:.1} hours. Check your sleeping position."
            ),
            Tip::Restless { hours } => write!(
                f,
                "Restless for {hours:.1} hours. Make sure the room temperature is comfortable."
            ),
            Tip::ShortDuration { min_hours } => {
                write!(f, "Sleep duration was under {min_hours} hours.")
            }
            Tip::PerfectSleep => f.write_str("Your sleep was perfect!"),
        }
    }
}

/// Snapshot of a session's outcome, recomputed on demand from scorer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepReport {
    pub grade: Grade,
    pub score: f64,
    pub total_hours: f64,
    pub snore_hours: f64,
    pub restless_hours: f64,
    pub tips: Vec<Tip>,
}

impl SleepReport {
    /// Tip texts in report order.
    pub fn tip_lines(&self) -> Vec<String> {
        self.tips.iter().map(|t| t.to_string()).collect()
    }

    /// Multi-line text for the end-of-session summary.
    pub fn render(&self) -> String {
        let mut out = format!(
            "Quality: {}\nScore: {}\nDuration: {:.2} hours\n",
            self.grade.as_str().to_uppercase(),
            self.score as i64,
            self.total_hours
        );
        out.push('\n');
        for line in self.tip_lines() {
            out.push_str("• ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        let policy = ScoringPolicy::default();
        assert_eq!(Grade::from_score(&policy, 100.0), Grade::Excellent);
        assert_eq!(Grade::from_score(&policy, 80.0), Grade::Excellent);
        assert_eq!(Grade::from_score(&policy, 79.99), Grade::Adequate);
        assert_eq!(Grade::from_score(&policy, 60.0), Grade::Adequate);
        assert_eq!(Grade::from_score(&policy, 59.99), Grade::Poor);
        assert_eq!(Grade::from_score(&policy, 0.0), Grade::Poor);
    }

    #[test]
    fn test_tip_text() {
        let tip = Tip::Snoring { hours: 0.6667 };
        assert_eq!(
            tip.to_string(),
            "Snoring detected for 0.7 hours. Check your sleeping position."
        );
        assert_eq!(
            Tip::ShortDuration { min_hours: 6.0 }.to_string(),
            "Sleep duration was under 6 hours."
        );
    }

    #[test]
    fn test_render_contains_grade_and_tips() {
        let report = SleepReport {
            grade: Grade::Adequate,
            score: 72.9,
            total_hours: 7.25,
            snore_hours: 1.0,
            restless_hours: 0.0,
            tips: vec![Tip::Snoring { hours: 1.0 }],
        };
        let text = report.render();
        assert!(text.contains("Quality: ADEQUATE"));
        assert!(text.contains("Score: 72"));
        assert!(text.contains("Duration: 7.25 hours"));
        assert!(text.contains("• Snoring detected for 1.0 hours"));
    }

    #[test]
    fn test_tip_serialization_is_tagged() {
        let json = serde_json::to_value(Tip::PerfectSleep).unwrap();
        assert_eq!(json["kind"], "perfect_sleep");
    }
}
