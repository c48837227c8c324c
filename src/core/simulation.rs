//! Scripted nights.
//!
//! Replays a list of [`SimulationPhase`]s through a [`SessionMonitor`]
//! without waiting for real time. Each tick covers `tick_interval` of real
//! time at the monitor's multiplier; the last tick of a phase is shortened so
//! the session's virtual time lands exactly on the phase boundary.

use crate::core::monitor::{MonitorError, SessionMonitor, TickOutcome};
use crate::core::policy::SECONDS_PER_HOUR;
use crate::core::report::SleepReport;
use crate::core::summary::EndReason;
use crate::sensors::command::SimulationPhase;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors from a scripted night.
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("at least one phase is required")]
    NoPhases,
    #[error("tick interval must cover some virtual time")]
    InvalidTickInterval,
    #[error("simulation could not run: {0}")]
    Monitor(#[from] MonitorError),
}

/// How a scripted night ended.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub report: SleepReport,
    pub end_reason: EndReason,
}

/// Run `phases` back to back on `monitor`.
///
/// The monitor is started with the first phase's levels. The night ends
/// with [`EndReason::Completed`] after the last phase, or with
/// [`EndReason::AutoStop`] as soon as a phase empties the bed.
pub fn run_night(
    monitor: &mut SessionMonitor,
    phases: &[SimulationPhase],
    tick_interval: Duration,
) -> Result<SimulationOutcome, SimulationError> {
    let first = phases.first().ok_or(SimulationError::NoPhases)?;

    let tick_virtual = tick_interval.as_secs_f64() * monitor.clock().multiplier();
    if tick_virtual <= 0.0 {
        return Err(SimulationError::InvalidTickInterval);
    }

    monitor.start(first.levels, Instant::now())?;

    let mut boundary = 0.0;
    for phase in phases {
        tracing::debug!(hours = phase.hours, levels = %phase.levels, "phase started");
        boundary += phase.hours * SECONDS_PER_HOUR;

        loop {
            let remaining = boundary - monitor.scorer().total_virtual_seconds();
            if remaining <= 0.0 {
                break;
            }

            match monitor.advance_virtual(phase.levels, remaining.min(tick_virtual)) {
                TickOutcome::Updated(_) => {}
                TickOutcome::AutoStopped(report) => {
                    return Ok(SimulationOutcome {
                        report,
                        end_reason: EndReason::AutoStop,
                    });
                }
                TickOutcome::Inactive => return Err(MonitorError::NotRunning.into()),
            }
        }
    }

    Ok(SimulationOutcome {
        report: monitor.stop()?,
        end_reason: EndReason::Completed,
    })
}
