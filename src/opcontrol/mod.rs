//! Operator control for the driver-controlled period.
//!
//! [`DriverControl`] tank-drives from the sticks and toggles the
//! mechanisms on button presses, through the same toggle logic replay
//! uses. Recording is layered on top by sampling a frame after every
//! update.
//!
//! # Example
//!
//! ```ignore
//! use retrace::opcontrol::DriverControl;
//!
//! let mut driver = DriverControl::from_config(replay.config());
//! loop {
//!     driver.update(replay.devices_mut());
//!     replay.sample_frame();
//!     sleep(replay.config().sample_interval).await;
//! }
//! ```

/// Stick and button handling for driver control.
pub mod controller;

pub use controller::DriverControl;
