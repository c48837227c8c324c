//! Machine-readable end-of-session summary.
//!
//! Bundles the sleep report with session metadata and sensor statistics
//! into a single JSON document. Summaries are printed, never stored.

use crate::core::history::{SensorHistory, SeriesStats};
use crate::core::report::{Grade, SleepReport};
use crate::sensors::types::SensorChannel;
use crate::stats::{TallyStats, TickTally};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// The current summary format version.
pub const SUMMARY_VERSION: &str = "1.0";

/// The name of this producer.
pub const PRODUCER_NAME: &str = "sleepwell-simulator";

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The sleeper pressed stop
    Manual,
    /// Bed pressure dropped below the presence threshold
    AutoStop,
    /// The simulator was interrupted (Ctrl+C or quit)
    Interrupted,
    /// A scripted simulation ran to completion
    Completed,
}

/// Producer metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: Uuid,
}

/// Session details known only to the caller.
#[derive(Debug, Clone)]
pub struct SessionMeta {
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub end_reason: EndReason,
    pub time_multiplier: f64,
}

/// Complete summary document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub summary_version: String,
    pub producer: Producer,
    pub session_id: Uuid,
    pub started_at_utc: String,
    pub ended_at_utc: String,
    pub end_reason: EndReason,
    pub time_multiplier: f64,
    pub final_score: f64,
    pub grade: Grade,
    pub total_hours: f64,
    pub snore_hours: f64,
    pub restless_hours: f64,
    pub tips: Vec<String>,
    /// Per-channel statistics keyed by channel name
    pub sensors: BTreeMap<String, SeriesStats>,
    pub ticks: TallyStats,
}

/// Builder for session summaries.
pub struct SummaryBuilder {
    instance_id: Uuid,
}

impl SummaryBuilder {
    /// Create a new builder with a unique instance ID.
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4(),
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    /// Build a summary for one finished session.
    pub fn build(
        &self,
        report: &SleepReport,
        history: &SensorHistory,
        tally: &TickTally,
        meta: &SessionMeta,
    ) -> SessionSummary {
        let sensors = SensorChannel::ALL
            .iter()
            .filter_map(|&channel| {
                history
                    .channel_stats(channel)
                    .map(|stats| (channel.name().to_string(), stats))
            })
            .collect();

        SessionSummary {
            summary_version: SUMMARY_VERSION.to_string(),
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: crate::VERSION.to_string(),
                instance_id: self.instance_id,
            },
            session_id: Uuid::new_v4(),
            started_at_utc: meta.started_at.to_rfc3339(),
            ended_at_utc: meta.ended_at.to_rfc3339(),
            end_reason: meta.end_reason,
            time_multiplier: meta.time_multiplier,
            final_score: report.score,
            grade: report.grade,
            total_hours: report.total_hours,
            snore_hours: report.snore_hours,
            restless_hours: report.restless_hours,
            tips: report.tip_lines(),
            sensors,
            ticks: tally.stats(),
        }
    }

    /// Build a summary and serialize it as pretty JSON.
    pub fn build_json(
        &self,
        report: &SleepReport,
        history: &SensorHistory,
        tally: &TickTally,
        meta: &SessionMeta,
    ) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.build(report, history, tally, meta))
    }
}

impl Default for SummaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scorer::SleepScorer;
    use crate::sensors::types::SensorLevels;

    fn meta() -> SessionMeta {
        let now = Utc::now();
        SessionMeta {
            started_at: now,
            ended_at: now,
            end_reason: EndReason::Manual,
            time_multiplier: 3600.0,
        }
    }

    #[test]
    fn test_summary_fields() {
        let mut scorer = SleepScorer::new();
        scorer.update(3600.0, 80.0, 0.0);
        let report = scorer.analysis_report();

        let mut history = SensorHistory::default();
        history.record(0.5, SensorLevels::new(50.0, 80.0, 5.0), 3600.0);
        history.record(1.0, SensorLevels::new(50.0, 80.0, 5.0), 3600.0);

        let builder = SummaryBuilder::new();
        let summary = builder.build(&report, &history, &TickTally::new(), &meta());

        assert_eq!(summary.summary_version, SUMMARY_VERSION);
        assert_eq!(summary.producer.name, PRODUCER_NAME);
        assert_eq!(summary.producer.instance_id, builder.instance_id());
        assert_eq!(summary.grade, Grade::Adequate);
        assert_eq!(summary.sensors.len(), 3);
        assert_eq!(summary.sensors["mic"].mean, 80.0);
        assert_eq!(summary.tips.len(), 2);
    }

    #[test]
    fn test_empty_history_has_no_sensor_stats() {
        let report = SleepScorer::new().analysis_report();
        let summary = SummaryBuilder::new().build(
            &report,
            &SensorHistory::default(),
            &TickTally::new(),
            &meta(),
        );
        assert!(summary.sensors.is_empty());
    }

    #[test]
    fn test_summary_json() {
        let report = SleepScorer::new().analysis_report();
        let json = SummaryBuilder::new()
            .build_json(&report, &SensorHistory::default(), &TickTally::new(), &meta())
            .unwrap();

        assert!(json.contains("summary_version"));
        assert!(json.contains("\"end_reason\": \"manual\""));
        assert!(json.contains("\"grade\": \"excellent\""));
        assert!(json.contains("session_id"));
    }
}
