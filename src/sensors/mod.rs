//! Simulated sensor inputs for the SleepWell simulator.
//!
//! There is no hardware acquisition here: the panel holds slider values
//! that are moved by presets, CLI flags or text commands.

pub mod command;
pub mod panel;
pub mod types;

// Re-export commonly used types
pub use command::{CommandError, PanelCommand, SimulationPhase};
pub use panel::{PanelError, SensorPanel};
pub use types::{Preset, SensorChannel, SensorLevels, LEVEL_MAX, LEVEL_MIN};
