use log::warn;
use vexide::{math::Angle, prelude::InertialSensor};

use super::HeadingSensor;

impl HeadingSensor for InertialSensor {
    /// The heading in degrees, or zero while the sensor calibrates.
    fn heading(&mut self) -> f64 {
        let is_calibrating = self.is_calibrating().unwrap_or_else(|e| {
            warn!("IMU Calibration State Error: {}", e);
            true
        });
        if is_calibrating {
            return 0.0;
        }

        InertialSensor::heading(self)
            .unwrap_or_else(|e| {
                warn!("IMU Heading Error: {}", e);
                Angle::from_degrees(0.0)
            })
            .as_degrees()
    }

    fn zero(&mut self) {
        self.reset_heading().unwrap_or_else(|e| {
            warn!("IMU Reset Heading Error: {}", e);
        });
    }
}
