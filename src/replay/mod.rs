//! Recording driver input and replaying it autonomously.
//!
//! # Overview
//!
//! A [`Replay`] engine is always in exactly one [`ReplayState`]:
//!
//! ```text
//! Idle --start_recording--> Recording --stop_recording--> Idle
//! Idle --play--> Playing --(every frame dispatched)--> Idle
//! ```
//!
//! While recording, the driver loop calls
//! [`sample_frame`](Replay::sample_frame) at a fixed cadence. Each sample
//! stores the sticks, the tracked buttons and the heading, stamped with
//! the time since recording started. Stopping can save the recording to
//! the SD card.
//!
//! [`play`](Replay::play) replays the recording in real time. Frames are
//! dispatched by their timestamps, not by count, so a slow loop bursts
//! several frames at once instead of dropping any. Every dispatched frame
//! is heading-corrected, and every rising button edge fires the same
//! toggle the driver's press did.
//!
//! # Example
//!
//! ```ignore
//! use retrace::{peripherals::clock::VexClock, replay::Replay};
//!
//! let mut replay = Replay::new(devices, VexClock);
//!
//! // Driver control
//! replay.start_recording();
//! loop {
//!     driver.update(replay.devices_mut());
//!     replay.sample_frame();
//!     sleep(Duration::from_millis(20)).await;
//! }
//! replay.stop_recording(true)?;
//!
//! // Autonomous
//! replay.play().await?;
//! ```

use std::time::Duration;

use log::{info, warn};

use crate::{
    config::ReplayConfig,
    error::StoreError,
    peripherals::{Clock, Devices, Indicator, StatusLine},
};

/// Fixed-size frame encoding and the button mask.
pub mod frame;

/// The in-memory frame sequence.
pub mod recording;

/// Saving and loading recordings.
pub mod store;

/// Heading drift correction.
pub mod correction;

/// Button-driven toggle state.
pub mod toggles;

/// Sampling frames while the driver drives.
pub mod recorder;

/// Real-time replay of a recording.
pub mod playback;

use self::{recording::Recording, store::RecordingStore, toggles::ToggleTable};

/// What the engine is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayState {
    #[default]
    Idle,
    Recording,
    Playing,
}

/// The record/playback engine.
///
/// Owns the recording, the devices and the clock. Construct one per robot
/// and hand it to whichever control loop needs it.
pub struct Replay<C: Clock> {
    state:        ReplayState,
    recording:    Recording,
    store:        RecordingStore,
    config:       ReplayConfig,
    toggles:      ToggleTable,
    record_start: Duration,
    devices:      Devices,
    clock:        C,
}

impl<C: Clock> Replay<C> {
    /// Creates an idle engine with the default settings and the SD card store.
    pub fn new(devices: Devices, clock: C) -> Self {
        Self::with_config(devices, clock, ReplayConfig::default())
    }

    /// Creates an idle engine with custom settings.
    pub fn with_config(devices: Devices, clock: C, config: ReplayConfig) -> Self {
        Self {
            state: ReplayState::Idle,
            recording: Recording::new(),
            store: RecordingStore::default(),
            config,
            toggles: ToggleTable::new(),
            record_start: Duration::ZERO,
            devices,
            clock,
        }
    }

    /// Replaces the store the engine saves to and loads from.
    pub fn with_store(mut self, store: RecordingStore) -> Self {
        self.store = store;
        self
    }

    pub fn state(&self) -> ReplayState { self.state }

    pub fn is_recording(&self) -> bool { self.state == ReplayState::Recording }

    pub fn is_playing(&self) -> bool { self.state == ReplayState::Playing }

    /// The in-memory recording.
    pub fn recording(&self) -> &Recording { &self.recording }

    /// Number of frames in memory.
    pub fn frame_count(&self) -> usize { self.recording.frame_count() }

    /// Timestamp of the last frame in memory, or zero.
    pub fn duration(&self) -> Duration { self.recording.duration() }

    pub fn config(&self) -> &ReplayConfig { &self.config }

    /// Sets how aggressively playback corrects heading drift.
    pub fn set_correction_gain(&mut self, gain: f64) { self.config.correction_gain = gain; }

    /// The latched toggle state left by the last replay.
    pub fn toggles(&self) -> &ToggleTable { &self.toggles }

    pub fn store(&self) -> &RecordingStore { &self.store }

    /// The devices, for driver control between recordings and replays.
    pub fn devices_mut(&mut self) -> &mut Devices { &mut self.devices }

    /// Saves the in-memory recording to the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the file cannot be written.
    pub fn save_recording(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.recording).inspect_err(|e| {
            warn!("Error Saving Recording: {}", e);
        })
    }

    /// Replaces the in-memory recording with the stored one.
    ///
    /// On failure the in-memory recording is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the file is missing, oversized or
    /// truncated.
    pub fn load_recording(&mut self) -> Result<usize, StoreError> {
        let recording = self.store.load().inspect_err(|e| {
            warn!("Error Loading Recording: {}", e);
        })?;
        self.recording = recording;

        let frames = self.recording.frame_count();
        info!("Recording loaded: {} frames", frames);
        self.devices
            .notifier
            .status(StatusLine::Primary, &format!("LOADED: {} frames", frames));
        self.show_idle_indicator();
        Ok(frames)
    }

    fn show_idle_indicator(&mut self) {
        let indicator = if self.recording.is_empty() {
            Indicator::Off
        } else {
            Indicator::Loaded {
                frames: self.recording.frame_count(),
            }
        };
        self.devices.notifier.indicator(indicator);
    }
}

/// Milliseconds from `since` to now, saturating at `u32::MAX`.
fn elapsed_ms(clock: &impl Clock, since: Duration) -> u32 {
    let elapsed = clock.now().saturating_sub(since);
    u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX)
}
