//! Tunable settings for recording and playback.

use std::time::Duration;

use crate::replay::correction::{DEFAULT_GAIN, MAX_CORRECTION};

/// Settings for a [`Replay`](crate::replay::Replay) engine.
///
/// The defaults match a driver loop sampling every 20 ms.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use retrace::config::ReplayConfig;
///
/// let config = ReplayConfig {
///     correction_gain: 1.5,
///     poll_interval: Duration::from_millis(5),
///     ..ReplayConfig::default()
/// };
/// assert_eq!(config.sample_interval, Duration::from_millis(20));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    /// Heading correction per degree of error, in stick units.
    pub correction_gain:  f64,
    /// Largest heading correction applied to a side, in stick units.
    pub correction_limit: f64,
    /// Pause after zeroing the heading sensor before replay starts.
    pub settle_delay:     Duration,
    /// How often playback checks for due frames.
    pub poll_interval:    Duration,
    /// How often the driver loop should sample a frame while recording.
    pub sample_interval:  Duration,
    /// Full on/off cycle of the blinking status indicator.
    pub blink_period:     Duration,
    /// Stick values with a smaller magnitude are treated as zero in
    /// driver control.
    pub deadband:         i8,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            correction_gain:  DEFAULT_GAIN,
            correction_limit: MAX_CORRECTION,
            settle_delay:     Duration::from_millis(50),
            poll_interval:    Duration::from_millis(10),
            sample_interval:  Duration::from_millis(20),
            blink_period:     Duration::from_millis(1000),
            deadband:         8,
        }
    }
}

impl ReplayConfig {
    /// Whether the indicator is lit `elapsed_ms` into a recording or replay.
    ///
    /// The indicator is lit for the first half of every blink period.
    pub fn blink_lit(&self, elapsed_ms: u32) -> bool {
        let half = (self.blink_period.as_millis() / 2).max(1);
        (u128::from(elapsed_ms) / half) % 2 == 0
    }
}
