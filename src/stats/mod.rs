//! Session statistics for the SleepWell simulator.

pub mod tally;

pub use tally::{TallyStats, TickTally};
