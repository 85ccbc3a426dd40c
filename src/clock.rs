//! Wall-clock sampling and the values derived from it

use crate::constants::MILLIS_PER_MINUTE;
use chrono::{Local, NaiveTime, Timelike};

/// One reading of the local wall clock, truncated to milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSample {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
}

impl ClockSample {
    pub fn now() -> Self {
        Self::from_time(Local::now().time())
    }

    pub fn from_time(time: NaiveTime) -> Self {
        // chrono encodes a leap second as nanos >= 1e9
        let millisecond = (time.nanosecond() / 1_000_000).min(999);
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            millisecond,
        }
    }

    pub fn millis_of_minute(&self) -> u32 {
        self.second * 1000 + self.millisecond
    }

    /// Fraction of the current minute elapsed, in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.millis_of_minute() as f32 / MILLIS_PER_MINUTE as f32).clamp(0.0, 1.0)
    }

    /// Sub-second phase driving the falling grains, in [0, 1)
    pub fn grain_phase(&self) -> f32 {
        self.millisecond as f32 / 1000.0
    }

    /// `HH:MM:SS:mmm`
    pub fn label(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}:{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// Detects minute boundaries and flips a toggle on each one
#[derive(Debug, Clone)]
pub struct MinuteTracker {
    last_minute: u32,
    flip: bool,
}

impl MinuteTracker {
    pub fn new(minute: u32) -> Self {
        Self { last_minute: minute, flip: false }
    }

    /// Returns true when `minute` differs from the previously observed one.
    pub fn observe(&mut self, minute: u32) -> bool {
        if minute == self.last_minute {
            return false;
        }
        self.last_minute = minute;
        self.flip = !self.flip;
        true
    }

    pub fn flip(&self) -> bool {
        self.flip
    }
}
