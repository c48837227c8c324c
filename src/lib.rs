//! SleepWell Simulator - sleep quality scoring from simulated bed sensors.
//!
//! Three simulated inputs (bed pressure, microphone loudness, motion) are
//! sampled on a fixed tick, converted to compressed "virtual" sleep time and
//! fed to a stateful scorer that keeps a 0-100 quality score.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     SleepWell Simulator                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐         │
//! │  │   Sensor    │──▶│   Session   │──▶│    Sleep    │         │
//! │  │    Panel    │   │   Monitor   │   │   Scorer    │         │
//! │  └─────────────┘   └─────────────┘   └─────────────┘         │
//! │                       │       │              │               │
//! │                       ▼       ▼              ▼               │
//! │              ┌──────────┐ ┌──────────┐ ┌─────────────┐       │
//! │              │ Virtual  │ │  Chart   │ │   Report /  │       │
//! │              │  Clock   │ │ History  │ │   Summary   │       │
//! │              └──────────┘ └──────────┘ └─────────────┘       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use sleepwell_simulator::core::{Grade, SleepScorer};
//!
//! let mut scorer = SleepScorer::new();
//! // One virtual hour with the microphone above the snoring threshold.
//! let score = scorer.update(3600.0, 80.0, 0.0);
//! assert_eq!(score, 75.0);
//!
//! let report = scorer.analysis_report();
//! assert_eq!(report.grade, Grade::Adequate);
//! ```

pub mod config;
pub mod core;
pub mod sensors;
pub mod stats;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigError};
pub use self::core::{
    Classification, Grade, MonitorError, ScoringPolicy, SessionMonitor, SleepReport, SleepScorer,
    SummaryBuilder, TickOutcome, Tip, VirtualClock,
};
pub use sensors::{PanelCommand, Preset, SensorLevels, SensorPanel};
pub use stats::TickTally;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Help text for the interactive monitor.
pub const MONITOR_HELP: &str = r#"
Commands (one per line):
  pressure <0-100>    move the bed-pressure slider (alias: fsr)
  mic <0-100>         move the microphone slider
  motion <0-100>      move the motion slider (alias: mpu)
  preset <name>       deep-sleep | snoring | restless | out-of-bed
  sleep               start the session, or wake up and show the report
  speed <1-3600>      change the time multiplier
  status              show the sliders and session state
  quit                leave the monitor

A session needs bed pressure of at least 20 to start, and stops on its own
when the pressure drops below that.
"#;
