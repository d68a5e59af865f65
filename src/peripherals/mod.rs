//! The devices the record/playback engine talks to.
//!
//! The engine never touches a vexide device directly. It reads input,
//! heading and time, and writes drive, mechanism and status commands,
//! through the small traits in this module. That keeps the timing-critical
//! sampling and dispatch code independent of how the robot is wired and
//! of how status is presented, and lets the whole engine run against
//! mock devices on a desktop.
//!
//! # Implementations
//!
//! - [`controller`]: the V5 controller as an [`InputSource`] and [`Notifier`].
//! - [`imu`]: the inertial sensor as a [`HeadingSensor`].
//! - [`mechanisms`]: intake, outtake and pistons as [`Mechanisms`].
//! - [`BrainNotifier`](crate::display::BrainNotifier) adds the Brain screen
//!   indicator to any text [`Notifier`].
//! - [`clock`]: vexide's uptime and timer as a [`Clock`].
//! - [`Differential`](crate::drivetrain::Differential) implements [`DriveOutput`].
//!
//! Devices shared with driver control can be wrapped with
//! [`make_cloneable`]; every trait is implemented for `Rc<RefCell<T>>`.
//!
//! # Example
//!
//! ```ignore
//! use retrace::{
//!     display::{BrainNotifier, DisplayDriver},
//!     peripherals::{Devices, make_cloneable},
//! };
//!
//! let controller = make_cloneable(peripherals.primary_controller);
//! let devices = Devices {
//!     input:      Box::new(controller.clone()),
//!     imu:        Box::new(InertialSensor::new(peripherals.port_10)),
//!     drive:      Box::new(drivetrain.clone()),
//!     mechanisms: Box::new(subsystems.clone()),
//!     notifier:   Box::new(BrainNotifier::new(
//!         controller,
//!         DisplayDriver::new(peripherals.display),
//!     )),
//! };
//! ```

use std::{cell::RefCell, future::Future, rc::Rc, time::Duration};

use log::warn;

use crate::replay::frame::Buttons;

/// The V5 controller as an input source and status surface.
pub mod controller;

/// Intake, outtake and pneumatic pistons.
pub mod mechanisms;

/// The inertial sensor as a heading source.
pub mod imu;

/// Wall-clock time and cooperative sleeping.
pub mod clock;

#[cfg(test)]
pub(crate) mod mock;

/// A snapshot of the driver's sticks and tracked buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    /// Left joystick Y axis, -127 to 127.
    pub left:    i8,
    /// Right joystick Y axis, -127 to 127.
    pub right:   i8,
    /// Tracked buttons currently held.
    pub buttons: Buttons,
}

/// Something that can report the driver's input.
pub trait InputSource {
    /// Reads the current stick positions and held buttons.
    fn read(&mut self) -> InputSnapshot;
}

/// A single-axis orientation sensor.
pub trait HeadingSensor {
    /// The current heading in degrees.
    fn heading(&mut self) -> f64;

    /// Makes the current orientation read as zero degrees.
    fn zero(&mut self);
}

/// The drivetrain, commanded in signed stick units.
pub trait DriveOutput {
    /// Drives each side at -127 to 127.
    fn drive(&mut self, left: i8, right: i8);

    /// Stops both sides.
    fn stop(&mut self) { self.drive(0, 0); }
}

/// The pneumatic pistons toggled by recorded buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piston {
    MidScoring,
    Descore,
    Unloader,
}

/// The scoring mechanisms.
pub trait Mechanisms {
    /// Runs the intake at -127 to 127.
    fn set_intake(&mut self, power: i8);

    /// Runs the outtake at -127 to 127.
    fn set_outtake(&mut self, power: i8);

    /// Extends (`true`) or retracts (`false`) a piston.
    fn set_piston(&mut self, piston: Piston, extended: bool);
}

/// Which line of the status surface a message goes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine {
    /// State changes: recording, replaying, loaded.
    Primary,
    /// Results of the state change: saved, save failed.
    Secondary,
}

/// The small status graphic shown while the engine works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Nothing to show.
    Off,
    /// Recording; `lit` alternates to make the indicator blink.
    Recording { lit: bool },
    /// Replaying; `lit` alternates to make the indicator blink.
    Playing { lit: bool },
    /// Idle with a recording of `frames` frames in memory.
    Loaded { frames: usize },
}

/// Where the engine reports what it is doing.
pub trait Notifier {
    /// Shows a short text message.
    fn status(&mut self, line: StatusLine, text: &str);

    /// Plays a haptic pattern (`.` short, `-` long, ` ` pause).
    fn rumble(&mut self, pattern: &str);

    /// Updates the status graphic.
    fn indicator(&mut self, indicator: Indicator);
}

/// A monotonic time source that can put the current task to sleep.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;

    /// Yields to other tasks for at least `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Every device the engine needs, as trait objects.
pub struct Devices {
    pub input:      Box<dyn InputSource>,
    pub imu:        Box<dyn HeadingSensor>,
    pub drive:      Box<dyn DriveOutput>,
    pub mechanisms: Box<dyn Mechanisms>,
    pub notifier:   Box<dyn Notifier>,
}

impl Devices {
    /// Commands the drivetrain, intake and outtake to stop.
    ///
    /// Pistons keep their position.
    pub fn stop_all(&mut self) {
        self.drive.stop();
        self.mechanisms.set_intake(0);
        self.mechanisms.set_outtake(0);
    }
}

/// Makes an object clonable by wrapping it in `Rc` and `RefCell`
pub fn make_cloneable<T>(t: T) -> Rc<RefCell<T>> { Rc::new(RefCell::new(t)) }

impl<T: InputSource> InputSource for Rc<RefCell<T>> {
    fn read(&mut self) -> InputSnapshot {
        match self.try_borrow_mut() {
            Ok(mut device) => device.read(),
            Err(e) => {
                warn!("Error Borrowing Input Device: {}", e);
                InputSnapshot::default()
            }
        }
    }
}

impl<T: HeadingSensor> HeadingSensor for Rc<RefCell<T>> {
    fn heading(&mut self) -> f64 {
        match self.try_borrow_mut() {
            Ok(mut device) => device.heading(),
            Err(e) => {
                warn!("Error Borrowing Heading Sensor: {}", e);
                0.0
            }
        }
    }

    fn zero(&mut self) {
        match self.try_borrow_mut() {
            Ok(mut device) => device.zero(),
            Err(e) => warn!("Error Borrowing Heading Sensor: {}", e),
        }
    }
}

impl<T: DriveOutput> DriveOutput for Rc<RefCell<T>> {
    fn drive(&mut self, left: i8, right: i8) {
        match self.try_borrow_mut() {
            Ok(mut device) => device.drive(left, right),
            Err(e) => warn!("Error Borrowing Drivetrain: {}", e),
        }
    }
}

impl<T: Mechanisms> Mechanisms for Rc<RefCell<T>> {
    fn set_intake(&mut self, power: i8) {
        match self.try_borrow_mut() {
            Ok(mut device) => device.set_intake(power),
            Err(e) => warn!("Error Borrowing Mechanisms: {}", e),
        }
    }

    fn set_outtake(&mut self, power: i8) {
        match self.try_borrow_mut() {
            Ok(mut device) => device.set_outtake(power),
            Err(e) => warn!("Error Borrowing Mechanisms: {}", e),
        }
    }

    fn set_piston(&mut self, piston: Piston, extended: bool) {
        match self.try_borrow_mut() {
            Ok(mut device) => device.set_piston(piston, extended),
            Err(e) => warn!("Error Borrowing Mechanisms: {}", e),
        }
    }
}

impl<T: Notifier> Notifier for Rc<RefCell<T>> {
    fn status(&mut self, line: StatusLine, text: &str) {
        if let Ok(mut device) = self.try_borrow_mut() {
            device.status(line, text);
        }
    }

    fn rumble(&mut self, pattern: &str) {
        if let Ok(mut device) = self.try_borrow_mut() {
            device.rumble(pattern);
        }
    }

    fn indicator(&mut self, indicator: Indicator) {
        if let Ok(mut device) = self.try_borrow_mut() {
            device.indicator(indicator);
        }
    }
}

/// Converts a -127 to 127 command into motor volts.
pub(crate) fn to_volts(power: i8) -> f64 { f64::from(power) / 127.0 * 12.0 }
