//! Proportional heading correction for replayed drive commands.
//!
//! While a recording replays, small mechanical differences make the robot
//! drift away from the heading it had when the driver recorded the run.
//! Each frame carries the heading captured at that instant, so the replay
//! compares it with the live sensor reading and biases the two drivetrain
//! sides in opposite directions to steer back.
//!
//! The controller is memoryless: no integral, no derivative and no
//! deadband. Replays last seconds to a few minutes and drift is small, so
//! a clamped P term is enough.

/// Default proportional gain, in stick units per degree of error.
pub const DEFAULT_GAIN: f64 = 2.0;

/// Largest correction applied to either side, in stick units.
pub const MAX_CORRECTION: f64 = 30.0;

/// Largest magnitude of a drive command.
pub const MAX_DRIVE: f64 = 127.0;

/// A proportional heading controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingCorrection {
    /// Stick units of correction per degree of heading error.
    pub gain:  f64,
    /// Clamp applied to the correction before it is mixed in.
    pub limit: f64,
}

impl Default for HeadingCorrection {
    fn default() -> Self { Self::new(DEFAULT_GAIN) }
}

impl HeadingCorrection {
    /// A controller with the given gain and the default correction limit.
    pub fn new(gain: f64) -> Self {
        Self {
            gain,
            limit: MAX_CORRECTION,
        }
    }

    /// The signed correction for a target and current heading, in stick units.
    ///
    /// A negative limit is taken by magnitude and a NaN limit falls back to
    /// [`MAX_CORRECTION`].
    pub fn correction(&self, target: f64, current: f64) -> f64 {
        let limit = if self.limit.is_nan() { MAX_CORRECTION } else { self.limit.abs() };
        (heading_error(target, current) * self.gain).clamp(-limit, limit)
    }

    /// Applies the correction to a pair of base drive commands.
    ///
    /// A positive error means the robot is behind the target heading, so
    /// the left side slows and the right side speeds up by the same amount.
    /// Both outputs stay within -127 to 127.
    pub fn correct(&self, base_left: i8, base_right: i8, target: f64, current: f64) -> (i8, i8) {
        let correction = self.correction(target, current);
        (
            to_drive(f64::from(base_left) - correction),
            to_drive(f64::from(base_right) + correction),
        )
    }
}

/// Corrects `base_left`/`base_right` toward `target` using `gain`.
///
/// Shorthand for [`HeadingCorrection::correct`] with the default limit.
pub fn correct(base_left: i8, base_right: i8, target: f64, current: f64, gain: f64) -> (i8, i8) {
    HeadingCorrection::new(gain).correct(base_left, base_right, target, current)
}

/// `target - current`, wrapped into (-180, 180].
///
/// ```
/// use retrace::replay::correction::heading_error;
///
/// assert_eq!(heading_error(10.0, 350.0), 20.0);
/// assert_eq!(heading_error(350.0, 10.0), -20.0);
/// ```
pub fn heading_error(target: f64, current: f64) -> f64 {
    180.0 - (180.0 - (target - current)).rem_euclid(360.0)
}

fn to_drive(value: f64) -> i8 {
    // Truncates toward zero, like the integer drive commands it replaces.
    value.clamp(-MAX_DRIVE, MAX_DRIVE) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_takes_the_short_way_round() {
        assert_eq!(heading_error(10.0, 350.0), 20.0);
        assert_eq!(heading_error(350.0, 10.0), -20.0);
        assert_eq!(heading_error(90.0, 45.0), 45.0);
        assert_eq!(heading_error(0.0, 0.0), 0.0);
    }

    #[test]
    fn error_range_is_half_open() {
        assert_eq!(heading_error(180.0, 0.0), 180.0);
        assert_eq!(heading_error(0.0, 180.0), 180.0);
        assert_eq!(heading_error(720.0 + 5.0, 0.0), 5.0);
        assert_eq!(heading_error(-725.0, 0.0), -5.0);
    }

    #[test]
    fn wraparound_corrects_toward_the_target() {
        // +20 degrees of error at gain 1 moves 20 units across the sides.
        let (left, right) = correct(50, 50, 10.0, 350.0, 1.0);
        assert_eq!((left, right), (30, 70));
    }

    #[test]
    fn correction_saturates_at_the_limit() {
        let controller = HeadingCorrection::new(2.0);
        for error in [15.0, 16.0, 45.0, 90.0, 179.0, 180.0] {
            assert_eq!(controller.correction(error, 0.0), 30.0, "error {error}");
            if error < 180.0 {
                assert_eq!(controller.correction(0.0, error), -30.0, "error -{error}");
            }
        }
        assert_eq!(controller.correction(14.0, 0.0), 28.0);
    }

    #[test]
    fn bad_limits_do_not_panic() {
        let negative = HeadingCorrection {
            gain:  2.0,
            limit: -30.0,
        };
        assert_eq!(negative.correct(10, 10, 5.0, 0.0), (0, 20));
        assert_eq!(negative.correction(90.0, 0.0), 30.0);

        let nan = HeadingCorrection {
            gain:  2.0,
            limit: f64::NAN,
        };
        assert_eq!(nan.correction(90.0, 0.0), MAX_CORRECTION);
        assert_eq!(nan.correction(0.0, 90.0), -MAX_CORRECTION);
    }

    #[test]
    fn outputs_stay_in_drive_range() {
        let controller = HeadingCorrection::new(2.0);
        for (target, current) in [(30.0, 0.0), (0.0, 30.0), (1.0, 0.0), (0.0, 1.0)] {
            for base in [127i8, -127] {
                let (left, right) = controller.correct(base, base, target, current);
                assert!((-127..=127).contains(&left));
                assert!((-127..=127).contains(&right));
            }
        }
        assert_eq!(controller.correct(127, 127, 30.0, 0.0), (97, 127));
        assert_eq!(controller.correct(-127, -127, 30.0, 0.0), (-127, -97));
    }

    #[test]
    fn fractional_corrections_truncate_toward_zero() {
        // 0.25 degrees * 2.0 = 0.5 units.
        assert_eq!(correct(10, 10, 0.25, 0.0, 2.0), (9, 10));
        assert_eq!(correct(-10, -10, 0.25, 0.0, 2.0), (-10, -9));
    }

    #[test]
    fn zero_error_leaves_sticks_alone() {
        assert_eq!(correct(-64, 100, 123.0, 123.0, 2.0), (-64, 100));
    }
}
