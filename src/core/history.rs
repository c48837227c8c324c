//! Rolling sensor history for the live charts.
//!
//! Points are keyed by virtual hour. At high speed multipliers a tick covers
//! minutes of virtual time, so the minimum spacing between stored points is
//! widened to keep the chart readable.

use crate::sensors::types::{SensorChannel, SensorLevels};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::VecDeque;

/// Default number of points kept per chart.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Multiplier above which the coarse spacing is used.
const COARSE_SPACING_MULTIPLIER: f64 = 100.0;

/// Minimum spacing (hours) between points at high speed.
const COARSE_SPACING_HOURS: f64 = 0.01;

/// Minimum spacing (hours) between points at low speed.
const FINE_SPACING_HOURS: f64 = 0.0001;

/// One sample on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Virtual hours since the session started
    pub hour: f64,
    pub levels: SensorLevels,
}

/// Summary statistics of one channel over the retained points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub samples: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Bounded buffer of recent sensor levels.
#[derive(Debug, Clone)]
pub struct SensorHistory {
    capacity: usize,
    points: VecDeque<HistoryPoint>,
}

impl SensorHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Minimum hour gap between stored points for a given multiplier.
    pub fn spacing_hours(multiplier: f64) -> f64 {
        if multiplier > COARSE_SPACING_MULTIPLIER {
            COARSE_SPACING_HOURS
        } else {
            FINE_SPACING_HOURS
        }
    }

    /// Store a point if it is far enough from the previous one.
    ///
    /// Returns true when the point was stored.
    pub fn record(&mut self, hour: f64, levels: SensorLevels, multiplier: f64) -> bool {
        let due = match self.points.back() {
            Some(last) => hour - last.hour > Self::spacing_hours(multiplier),
            None => true,
        };
        if !due {
            return false;
        }

        self.points.push_back(HistoryPoint { hour, levels });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
        true
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn points(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }

    /// Latest stored point.
    pub fn last(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    /// Statistics for one channel, or `None` when nothing is stored.
    pub fn channel_stats(&self, channel: SensorChannel) -> Option<SeriesStats> {
        if self.points.is_empty() {
            return None;
        }

        let values: Vec<f64> = self.points.iter().map(|p| p.levels.get(channel)).collect();
        let std_dev = if values.len() < 2 {
            0.0
        } else {
            Statistics::std_dev(&values)
        };

        Some(SeriesStats {
            samples: values.len(),
            mean: Statistics::mean(&values),
            std_dev,
            min: Statistics::min(&values),
            max: Statistics::max(&values),
        })
    }
}

impl Default for SensorHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(mic: f64) -> SensorLevels {
        SensorLevels::new(50.0, mic, 0.0)
    }

    #[test]
    fn test_first_point_always_recorded() {
        let mut history = SensorHistory::default();
        assert!(history.record(0.0, levels(10.0), 1.0));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_spacing_depends_on_multiplier() {
        assert_eq!(SensorHistory::spacing_hours(100.0), 0.0001);
        assert_eq!(SensorHistory::spacing_hours(101.0), 0.01);

        let mut history = SensorHistory::default();
        history.record(0.0, levels(10.0), 3600.0);
        assert!(!history.record(0.005, levels(10.0), 3600.0));
        assert!(!history.record(0.01, levels(10.0), 3600.0));
        assert!(history.record(0.0101, levels(10.0), 3600.0));

        let mut history = SensorHistory::default();
        history.record(0.0, levels(10.0), 1.0);
        assert!(history.record(0.0002, levels(10.0), 1.0));
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut history = SensorHistory::new(100);
        for i in 0..150 {
            history.record(i as f64, levels(i as f64 % 100.0), 1.0);
        }
        assert_eq!(history.len(), 100);
        assert_eq!(history.points().next().unwrap().hour, 50.0);
        assert_eq!(history.last().unwrap().hour, 149.0);
    }

    #[test]
    fn test_channel_stats() {
        let mut history = SensorHistory::default();
        assert!(history.channel_stats(SensorChannel::Microphone).is_none());

        history.record(0.0, levels(10.0), 1.0);
        let single = history.channel_stats(SensorChannel::Microphone).unwrap();
        assert_eq!(single.std_dev, 0.0);
        assert_eq!((single.min, single.max), (10.0, 10.0));

        history.record(1.0, levels(20.0), 1.0);
        history.record(2.0, levels(30.0), 1.0);

        let stats = history.channel_stats(SensorChannel::Microphone).unwrap();
        assert_eq!(stats.samples, 3);
        assert!((stats.mean - 20.0).abs() < 1e-9);
        assert!((stats.std_dev - 10.0).abs() < 1e-9);
        assert_eq!(stats.min, 10.0);
        assert_eq!(stats.max, 30.0);

        let pressure = history.channel_stats(SensorChannel::Pressure).unwrap();
        assert_eq!(pressure.std_dev, 0.0);
    }

    #[test]
    fn test_clear() {
        let mut history = SensorHistory::default();
        history.record(0.0, levels(10.0), 1.0);
        history.clear();
        assert!(history.is_empty());
    }
}
