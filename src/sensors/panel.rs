//! Simulated sensor panel.
//!
//! Stands in for real bed-pressure, microphone and motion hardware. Slider
//! movements arrive as [`PanelCommand`]s over a channel so that an input
//! thread can feed the panel while the tick loop reads it.

use crate::sensors::command::PanelCommand;
use crate::sensors::types::SensorLevels;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Maximum number of commands buffered between drains.
const COMMAND_QUEUE_CAPACITY: usize = 256;

/// Errors that can occur while operating the panel.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Sensor panel is already running")]
    AlreadyRunning,
    #[error("Sensor panel command queue is full")]
    QueueFull,
    #[error("Sensor panel has been shut down")]
    Disconnected,
}

/// Simulated sliders plus the command queue that moves them.
pub struct SensorPanel {
    levels: SensorLevels,
    sender: Sender<PanelCommand>,
    receiver: Receiver<PanelCommand>,
    running: Arc<AtomicBool>,
}

impl SensorPanel {
    /// Create a panel with the given initial slider positions.
    pub fn new(levels: SensorLevels) -> Self {
        let (sender, receiver) = bounded(COMMAND_QUEUE_CAPACITY);
        Self {
            levels,
            sender,
            receiver,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start accepting commands.
    pub fn start(&mut self) -> Result<(), PanelError> {
        if self.running.load(Ordering::SeqCst) {
            return Err(PanelError::AlreadyRunning);
        }
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Stop accepting commands and discard anything queued.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        while self.receiver.try_recv().is_ok() {}
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Producing end of the command queue, for input threads.
    pub fn sender(&self) -> Sender<PanelCommand> {
        self.sender.clone()
    }

    /// Queue a command from the current thread.
    pub fn submit(&self, command: PanelCommand) -> Result<(), PanelError> {
        self.sender.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => PanelError::QueueFull,
            TrySendError::Disconnected(_) => PanelError::Disconnected,
        })
    }

    /// Apply every queued slider movement and return the remaining
    /// control commands in arrival order.
    ///
    /// Does nothing while the panel is stopped.
    pub fn drain(&mut self) -> Vec<PanelCommand> {
        let mut controls = Vec::new();
        if !self.is_running() {
            return controls;
        }

        while let Ok(command) = self.receiver.try_recv() {
            match command {
                PanelCommand::Set(channel, value) => {
                    self.levels.set(channel, value);
                    tracing::debug!(channel = channel.name(), value, "slider moved");
                }
                PanelCommand::Preset(preset) => {
                    self.levels = preset.levels();
                    tracing::debug!(preset = preset.name(), "preset applied");
                }
                other => controls.push(other),
            }
        }
        controls
    }

    /// Current slider positions.
    pub fn levels(&self) -> SensorLevels {
        self.levels
    }
}

impl Default for SensorPanel {
    fn default() -> Self {
        Self::new(SensorLevels::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::types::{Preset, SensorChannel};

    #[test]
    fn test_start_twice_fails() {
        let mut panel = SensorPanel::default();
        assert!(panel.start().is_ok());
        assert!(matches!(panel.start(), Err(PanelError::AlreadyRunning)));
        panel.stop();
        assert!(!panel.is_running());
        assert!(panel.start().is_ok());
    }

    #[test]
    fn test_drain_applies_levels_and_returns_controls() {
        let mut panel = SensorPanel::default();
        panel.start().unwrap();

        panel.submit(PanelCommand::Preset(Preset::DeepSleep)).unwrap();
        panel.submit(PanelCommand::ToggleSleep).unwrap();
        panel
            .submit(PanelCommand::Set(SensorChannel::Microphone, 85.0))
            .unwrap();
        panel.submit(PanelCommand::Speed(600.0)).unwrap();

        let controls = panel.drain();
        assert_eq!(
            controls,
            vec![PanelCommand::ToggleSleep, PanelCommand::Speed(600.0)]
        );
        assert_eq!(panel.levels(), SensorLevels::new(50.0, 85.0, 0.0));
        assert!(panel.drain().is_empty());
    }

    #[test]
    fn test_commands_from_another_thread() {
        let mut panel = SensorPanel::default();
        panel.start().unwrap();

        let sender = panel.sender();
        std::thread::spawn(move || {
            sender
                .send(PanelCommand::Set(SensorChannel::Pressure, 60.0))
                .unwrap();
        })
        .join()
        .unwrap();

        panel.drain();
        assert_eq!(panel.levels().pressure, 60.0);
    }

    #[test]
    fn test_stopped_panel_ignores_queue() {
        let mut panel = SensorPanel::default();
        panel
            .submit(PanelCommand::Set(SensorChannel::Motion, 90.0))
            .unwrap();
        assert!(panel.drain().is_empty());
        assert_eq!(panel.levels().motion, 0.0);
    }
}
