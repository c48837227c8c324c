//! Core functionality for the SleepWell simulator.
//!
//! This module contains:
//! - The sleep scorer and its policy
//! - Report and summary generation
//! - The virtual clock, chart history and session monitor that drive the scorer
//! - Scripted nights replayed through the monitor

pub mod clock;
pub mod gauge;
pub mod history;
pub mod monitor;
pub mod policy;
pub mod report;
pub mod scorer;
pub mod simulation;
pub mod summary;

// Re-export commonly used types
pub use clock::{format_elapsed, speed_label, VirtualClock, MAX_MULTIPLIER, MIN_MULTIPLIER};
pub use gauge::{Gauge, GaugeBand};
pub use history::{HistoryPoint, SensorHistory, SeriesStats};
pub use monitor::{
    MonitorError, MonitorSettings, MonitorState, SessionMonitor, TickFrame, TickOutcome,
};
pub use policy::ScoringPolicy;
pub use report::{Grade, SleepReport, Tip};
pub use scorer::{Classification, SleepScorer};
pub use simulation::{run_night, SimulationError, SimulationOutcome};
pub use summary::{EndReason, SessionMeta, SessionSummary, SummaryBuilder};
