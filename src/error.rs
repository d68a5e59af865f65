//! Error types for the record/playback engine.
//!
//! Every failure here is local to the operation that produced it. Nothing
//! in this crate panics or aborts the robot program on bad data; the
//! engine reports the error, logs it, and leaves its state consistent.

use std::io;

use thiserror::Error;

/// Errors that can occur when decoding a single frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Fewer bytes were supplied than one encoded frame occupies.
    #[error("Frame too short: expected {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
}

/// Errors that can occur when saving or loading a recording.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing file could not be opened, created or written.
    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] io::Error),

    /// The file ended before the declared number of frames was read.
    #[error("Recording truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The declared frame count is above the sanity ceiling.
    #[error("Recording declares {count} frames, more than the maximum of {max}")]
    TooManyFrames { count: u32, max: u32 },
}

/// Errors returned by the engine's playback entry point.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Nothing in memory and nothing loadable from the store.
    #[error("No recording to replay")]
    NoRecording,

    /// Playback was requested while a recording is in progress.
    #[error("Cannot replay while recording")]
    RecordingActive,

    /// The store failed while the engine was using it.
    #[error(transparent)]
    Store(#[from] StoreError),
}
