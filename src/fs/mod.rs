//! SD card utilities.
//!
//! Recordings are saved by [`RecordingStore`](crate::replay::store::RecordingStore);
//! this module holds the log file.
//!
//! # Example
//!
//! ```ignore
//! use log::{LevelFilter, info};
//! use retrace::fs::logger;
//!
//! logger::init(LevelFilter::Info).expect("Failed to initialize logger");
//! info!("Robot initialized");
//! ```

/// Console and SD card logging.
pub mod logger;
