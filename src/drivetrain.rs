//! Differential drivetrain control.
//!
//! The drivetrain is commanded in signed stick units (-127 to 127), the
//! same units frames are recorded in, and scaled to motor volts.
//!
//! # Example
//!
//! ```ignore
//! use retrace::drivetrain::Differential;
//! use vexide::prelude::*;
//!
//! let drivetrain = Differential::new(
//!     [
//!         Motor::new(peripherals.port_1, Gearset::Blue, Direction::Reverse),
//!         Motor::new(peripherals.port_2, Gearset::Blue, Direction::Reverse),
//!     ],
//!     [
//!         Motor::new(peripherals.port_3, Gearset::Blue, Direction::Forward),
//!         Motor::new(peripherals.port_4, Gearset::Blue, Direction::Forward),
//!     ],
//! );
//! drivetrain.set_brakemode(BrakeMode::Brake);
//!
//! // Clones share the same motors.
//! let devices = Devices {
//!     drive: Box::new(drivetrain.clone()),
//!     ..
//! };
//! ```

use std::{cell::RefCell, rc::Rc};

use log::warn;
use vexide::{prelude::Motor, smart::motor::BrakeMode};

use crate::peripherals::{DriveOutput, to_volts};

/// A drivetrain with a left and a right motor group.
///
/// The motors are stored in reference-counted cells, so clones of a
/// `Differential` drive the same motors.
#[derive(Clone)]
pub struct Differential {
    /// The left motor group.
    pub left:  Rc<RefCell<dyn AsMut<[Motor]>>>,
    /// The right motor group.
    pub right: Rc<RefCell<dyn AsMut<[Motor]>>>,
}

impl Differential {
    /// Creates a new drivetrain with the provided left/right motors.
    pub fn new<L: AsMut<[Motor]> + 'static, R: AsMut<[Motor]> + 'static>(
        left: L,
        right: R,
    ) -> Self {
        Self {
            left:  Rc::new(RefCell::new(left)),
            right: Rc::new(RefCell::new(right)),
        }
    }

    /// Drives each side at -127 to 127.
    pub fn drive(&self, left: i8, right: i8) {
        set_voltage(&self.left, to_volts(left));
        set_voltage(&self.right, to_volts(right));
    }

    /// Sets the brake mode for all motors in the drivetrain.
    ///
    /// - [`BrakeMode::Coast`]: Motors spin freely.
    /// - [`BrakeMode::Brake`]: Motors actively resist rotation.
    /// - [`BrakeMode::Hold`]: Motors actively hold their position.
    pub fn set_brakemode(&self, brakemode: BrakeMode) {
        for side in [&self.left, &self.right] {
            if let Ok(mut motors) = side.try_borrow_mut() {
                for motor in motors.as_mut() {
                    motor.brake(brakemode).unwrap_or_else(|e| {
                        warn!("Motor Brake Error: {}", e);
                    });
                }
            }
        }
    }
}

impl DriveOutput for Differential {
    fn drive(&mut self, left: i8, right: i8) { Differential::drive(self, left, right); }
}

fn set_voltage(side: &Rc<RefCell<dyn AsMut<[Motor]>>>, voltage: f64) {
    match side.try_borrow_mut() {
        Ok(mut motors) => {
            for motor in motors.as_mut() {
                motor.set_voltage(voltage).unwrap_or_else(|e| {
                    warn!("Motor Set Voltage Error: {}", e);
                });
            }
        }
        Err(e) => warn!("Error Borrowing Drivetrain Motors: {}", e),
    }
}
