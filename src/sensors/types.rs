//! Simulated sensor readings.
//!
//! Each reading sits on the 0-100 slider scale of the simulator panel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::sensors::command::CommandError;

/// Lowest value a panel slider can hold.
pub const LEVEL_MIN: f64 = 0.0;

/// Highest value a panel slider can hold.
pub const LEVEL_MAX: f64 = 100.0;

/// The three simulated inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorChannel {
    /// Force-sensitive resistor under the mattress (bed presence)
    Pressure,
    /// Microphone loudness
    Microphone,
    /// Motion sensor (accelerometer/gyro magnitude)
    Motion,
}

impl SensorChannel {
    pub const ALL: [SensorChannel; 3] = [
        SensorChannel::Pressure,
        SensorChannel::Microphone,
        SensorChannel::Motion,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SensorChannel::Pressure => "pressure",
            SensorChannel::Microphone => "mic",
            SensorChannel::Motion => "motion",
        }
    }
}

impl FromStr for SensorChannel {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pressure" | "fsr" => Ok(SensorChannel::Pressure),
            "mic" | "microphone" => Ok(SensorChannel::Microphone),
            "motion" | "mpu" => Ok(SensorChannel::Motion),
            other => Err(CommandError::UnknownChannel(other.to_string())),
        }
    }
}

/// Current position of the three panel sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorLevels {
    pub pressure: f64,
    pub microphone: f64,
    pub motion: f64,
}

impl SensorLevels {
    /// Build levels, clamping each into the slider range.
    pub fn new(pressure: f64, microphone: f64, motion: f64) -> Self {
        Self {
            pressure: clamp_level(pressure),
            microphone: clamp_level(microphone),
            motion: clamp_level(motion),
        }
    }

    pub fn get(&self, channel: SensorChannel) -> f64 {
        match channel {
            SensorChannel::Pressure => self.pressure,
            SensorChannel::Microphone => self.microphone,
            SensorChannel::Motion => self.motion,
        }
    }

    /// Move one slider.
    pub fn set(&mut self, channel: SensorChannel, value: f64) {
        let value = clamp_level(value);
        match channel {
            SensorChannel::Pressure => self.pressure = value,
            SensorChannel::Microphone => self.microphone = value,
            SensorChannel::Motion => self.motion = value,
        }
    }
}

impl Default for SensorLevels {
    fn default() -> Self {
        Self {
            pressure: 0.0,
            microphone: 10.0,
            motion: 0.0,
        }
    }
}

impl fmt::Display for SensorLevels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pressure {:.1} | mic {:.1} | motion {:.1}",
            self.pressure, self.microphone, self.motion
        )
    }
}

fn clamp_level(value: f64) -> f64 {
    if value.is_nan() {
        return LEVEL_MIN;
    }
    value.clamp(LEVEL_MIN, LEVEL_MAX)
}

/// Named slider positions for common scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    DeepSleep,
    Snoring,
    Restless,
    OutOfBed,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::DeepSleep,
        Preset::Snoring,
        Preset::Restless,
        Preset::OutOfBed,
    ];

    pub fn levels(&self) -> SensorLevels {
        match self {
            Preset::DeepSleep => SensorLevels::new(50.0, 10.0, 0.0),
            Preset::Snoring => SensorLevels::new(50.0, 80.0, 5.0),
            Preset::Restless => SensorLevels::new(50.0, 20.0, 70.0),
            Preset::OutOfBed => SensorLevels::new(0.0, 10.0, 0.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::DeepSleep => "deep-sleep",
            Preset::Snoring => "snoring",
            Preset::Restless => "restless",
            Preset::OutOfBed => "out-of-bed",
        }
    }
}

impl FromStr for Preset {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| CommandError::UnknownPreset(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_clamped() {
        let levels = SensorLevels::new(-5.0, 150.0, f64::NAN);
        assert_eq!(levels.pressure, 0.0);
        assert_eq!(levels.microphone, 100.0);
        assert_eq!(levels.motion, 0.0);

        let mut levels = SensorLevels::default();
        levels.set(SensorChannel::Motion, 240.0);
        assert_eq!(levels.get(SensorChannel::Motion), 100.0);
    }

    #[test]
    fn test_default_levels_match_panel() {
        let levels = SensorLevels::default();
        assert_eq!(levels.pressure, 0.0);
        assert_eq!(levels.microphone, 10.0);
        assert_eq!(levels.motion, 0.0);
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("deep-sleep".parse::<Preset>().unwrap(), Preset::DeepSleep);
        assert_eq!("Snoring".parse::<Preset>().unwrap(), Preset::Snoring);
        assert_eq!("out_of_bed".parse::<Preset>().unwrap(), Preset::OutOfBed);
        assert!("nap".parse::<Preset>().is_err());
    }

    #[test]
    fn test_snoring_preset_levels() {
        let levels = Preset::Snoring.levels();
        assert_eq!(levels.pressure, 50.0);
        assert_eq!(levels.microphone, 80.0);
        assert_eq!(levels.motion, 5.0);
    }

    #[test]
    fn test_channel_aliases() {
        assert_eq!("fsr".parse::<SensorChannel>().unwrap(), SensorChannel::Pressure);
        assert_eq!("mpu".parse::<SensorChannel>().unwrap(), SensorChannel::Motion);
        assert!("light".parse::<SensorChannel>().is_err());
    }
}
