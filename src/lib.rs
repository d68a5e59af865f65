//! # Retrace
//!
//! Retrace records what a driver does with a VEX V5 robot and plays it back
//! as an autonomous routine. Built on [Vexide](https://vexide.dev).
//!
//! - **Recording**: sticks, seven mechanism buttons and the inertial
//!   heading are sampled into fixed-size frames, stamped with the time
//!   since recording started.
//! - **Storage**: recordings are saved to and loaded from the SD card in a
//!   compact little-endian format.
//! - **Playback**: frames are dispatched on their recorded timestamps, with
//!   a proportional heading correction applied to the drive and mechanism
//!   toggles fired on the same button presses the driver made.
//! - **Feedback**: status text and rumble on the controller, a blinking
//!   indicator on the Brain screen, and a log file on the SD card.
//!
//! ## Quick Start
//!
//! ```ignore
//! use retrace::{
//!     display::{BrainNotifier, DisplayDriver},
//!     drivetrain::Differential,
//!     fs::logger,
//!     opcontrol::DriverControl,
//!     peripherals::{Devices, clock::VexClock, make_cloneable, mechanisms::Subsystems},
//!     replay::Replay,
//! };
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(log::LevelFilter::Info).ok();
//!
//!     let controller = make_cloneable(peripherals.primary_controller);
//!     let devices = Devices {
//!         input:      Box::new(controller.clone()),
//!         imu:        Box::new(InertialSensor::new(peripherals.port_10)),
//!         drive:      Box::new(drivetrain),
//!         mechanisms: Box::new(subsystems),
//!         notifier:   Box::new(BrainNotifier::new(
//!             controller,
//!             DisplayDriver::new(peripherals.display),
//!         )),
//!     };
//!     let mut replay = Replay::new(devices, VexClock);
//!     let mut driver = DriverControl::from_config(replay.config());
//!
//!     replay.start_recording();
//!     for _ in 0..750 {
//!         driver.update(replay.devices_mut());
//!         replay.sample_frame();
//!         sleep(replay.config().sample_interval).await;
//!     }
//!     replay.stop_recording(true).ok();
//!
//!     replay.play().await.ok();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`replay`]: The record/playback engine and the recording format.
//! - [`peripherals`]: The device traits the engine uses, and their vexide
//!   implementations.
//! - [`drivetrain`]: Differential drivetrain control.
//! - [`opcontrol`]: Tank drive and button toggles for driver control.
//! - [`display`]: The Brain screen indicator.
//! - [`fs`]: Logging to the SD card.
//! - [`config`]: Timing and tuning settings.
//! - [`error`]: Error types.

/// Timing and tuning settings.
pub mod config;

/// Error types for frames, storage and playback.
pub mod error;

/// Differential drivetrain control module.
///
/// Provides the [`Differential`](drivetrain::Differential) struct, which
/// drives left and right motor groups from signed stick units.
pub mod drivetrain;

/// Filesystem utilities module.
///
/// Contains the logger that records engine activity and errors to the
/// V5 Brain's SD card.
pub mod fs;

/// Operator control utilities module.
///
/// Tank drive with a deadband and rising-edge button toggles.
pub mod opcontrol;

/// Device abstractions.
///
/// The traits every device the engine touches must implement, plus the
/// vexide implementations used on the robot.
pub mod peripherals;

/// Recording driver input and replaying it autonomously.
pub mod replay;

/// V5 Brain display graphics module.
///
/// Provides an [`embedded-graphics`](https://crates.io/crates/embedded-graphics)
/// compatible [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget)
/// for the V5 Brain display and the replay status indicator drawn on it.
pub mod display;
