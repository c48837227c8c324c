//! Text commands for driving the simulated sensor panel.
//!
//! The interactive monitor reads one command per line, e.g. `mic 80`,
//! `preset snoring`, `sleep`, `speed 600` or `quit`.

use crate::sensors::types::{Preset, SensorChannel, SensorLevels};
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing panel commands and simulation phases.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown sensor channel: {0}")]
    UnknownChannel(String),
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("invalid phase '{0}' (expected <preset|pressure,mic,motion>:<hours>)")]
    InvalidPhase(String),
}

/// A single instruction for the panel or the monitor loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    /// Move one slider
    Set(SensorChannel, f64),
    /// Move all sliders to a preset
    Preset(Preset),
    /// Start the session if idle, stop it if running
    ToggleSleep,
    /// Change the virtual time multiplier
    Speed(f64),
    /// Print the current panel state
    Status,
    /// Leave the monitor
    Quit,
}

impl FromStr for PanelCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let head = parts.next().ok_or(CommandError::Empty)?.to_lowercase();

        match head.as_str() {
            "sleep" | "toggle" | "start" | "stop" | "wake" => Ok(PanelCommand::ToggleSleep),
            "status" => Ok(PanelCommand::Status),
            "quit" | "exit" | "menu" => Ok(PanelCommand::Quit),
            "speed" => {
                let value = parse_value(&head, parts.next())?;
                Ok(PanelCommand::Speed(value))
            }
            "preset" => {
                let name = parts
                    .next()
                    .ok_or_else(|| CommandError::MissingValue(head.clone()))?;
                Ok(PanelCommand::Preset(name.parse()?))
            }
            other => {
                let channel: SensorChannel = other
                    .parse()
                    .map_err(|_| CommandError::UnknownCommand(other.to_string()))?;
                let value = parse_value(&head, parts.next())?;
                Ok(PanelCommand::Set(channel, value))
            }
        }
    }
}

fn parse_value(name: &str, raw: Option<&str>) -> Result<f64, CommandError> {
    let raw = raw.ok_or_else(|| CommandError::MissingValue(name.to_string()))?;
    raw.parse::<f64>()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

/// A stretch of simulated night with fixed sensor levels.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationPhase {
    pub levels: SensorLevels,
    pub hours: f64,
}

impl FromStr for SimulationPhase {
    type Err = CommandError;

    /// Parse `deep-sleep:6` or `50,80,5:1.5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CommandError::InvalidPhase(s.to_string());
        let (levels_part, hours_part) = s.rsplit_once(':').ok_or_else(invalid)?;

        let hours: f64 = hours_part.trim().parse().map_err(|_| invalid())?;
        if !hours.is_finite() || hours < 0.0 {
            return Err(invalid());
        }

        let levels = if levels_part.contains(',') {
            let values: Vec<f64> = levels_part
                .split(',')
                .map(|v| v.trim().parse::<f64>())
                .collect::<Result<_, _>>()
                .map_err(|_| invalid())?;
            match values.as_slice() {
                [pressure, mic, motion] => SensorLevels::new(*pressure, *mic, *motion),
                _ => return Err(invalid()),
            }
        } else {
            levels_part.parse::<Preset>()?.levels()
        };

        Ok(Self { levels, hours })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slider_commands() {
        assert_eq!(
            "mic 80".parse::<PanelCommand>().unwrap(),
            PanelCommand::Set(SensorChannel::Microphone, 80.0)
        );
        assert_eq!(
            "FSR 25.5".parse::<PanelCommand>().unwrap(),
            PanelCommand::Set(SensorChannel::Pressure, 25.5)
        );
        assert_eq!(
            "  motion   41 ".parse::<PanelCommand>().unwrap(),
            PanelCommand::Set(SensorChannel::Motion, 41.0)
        );
    }

    #[test]
    fn test_parse_control_commands() {
        assert_eq!(
            "sleep".parse::<PanelCommand>().unwrap(),
            PanelCommand::ToggleSleep
        );
        assert_eq!(
            "speed 3600".parse::<PanelCommand>().unwrap(),
            PanelCommand::Speed(3600.0)
        );
        assert_eq!(
            "preset snoring".parse::<PanelCommand>().unwrap(),
            PanelCommand::Preset(Preset::Snoring)
        );
        assert_eq!("exit".parse::<PanelCommand>().unwrap(), PanelCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<PanelCommand>(), Err(CommandError::Empty));
        assert_eq!(
            "mic".parse::<PanelCommand>(),
            Err(CommandError::MissingValue("mic".to_string()))
        );
        assert_eq!(
            "mic loud".parse::<PanelCommand>(),
            Err(CommandError::InvalidNumber("loud".to_string()))
        );
        assert_eq!(
            "dance".parse::<PanelCommand>(),
            Err(CommandError::UnknownCommand("dance".to_string()))
        );
        assert_eq!(
            "preset nap".parse::<PanelCommand>(),
            Err(CommandError::UnknownPreset("nap".to_string()))
        );
    }

    #[test]
    fn test_parse_phases() {
        let phase: SimulationPhase = "deep-sleep:6".parse().unwrap();
        assert_eq!(phase.levels, Preset::DeepSleep.levels());
        assert_eq!(phase.hours, 6.0);

        let phase: SimulationPhase = "50,80,5:1.5".parse().unwrap();
        assert_eq!(phase.levels, SensorLevels::new(50.0, 80.0, 5.0));
        assert_eq!(phase.hours, 1.5);

        assert!("deep-sleep".parse::<SimulationPhase>().is_err());
        assert!("50,80:1".parse::<SimulationPhase>().is_err());
        assert!("snoring:-1".parse::<SimulationPhase>().is_err());
    }
}
