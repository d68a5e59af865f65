use log::{info, trace, warn};

use super::{Replay, ReplayState, elapsed_ms, frame::Frame};
use crate::{
    error::StoreError,
    peripherals::{Clock, Indicator, StatusLine},
};

impl<C: Clock> Replay<C> {
    /// Starts a new recording.
    ///
    /// Discards whatever was in memory, zeroes the heading sensor so
    /// recorded headings are relative to this moment, and begins accepting
    /// [`sample_frame`](Self::sample_frame) calls.
    pub fn start_recording(&mut self) {
        if self.state == ReplayState::Playing {
            warn!("Recording Started Over An Interrupted Replay");
        }

        self.recording.clear();
        self.record_start = self.clock.now();
        self.devices.imu.zero();
        self.state = ReplayState::Recording;
        info!("Recording Started");

        let notifier = &mut self.devices.notifier;
        notifier.status(StatusLine::Primary, "RECORDING...");
        notifier.rumble("-");
        notifier.indicator(Indicator::Recording { lit: true });
    }

    /// Captures one frame of driver input.
    ///
    /// Does nothing and returns `None` unless a recording is in progress.
    /// Call this at a steady cadence from the driver loop; replay timing
    /// comes from the stored timestamps, so the exact rate only affects
    /// how dense the recording is.
    pub fn sample_frame(&mut self) -> Option<Frame> {
        if self.state != ReplayState::Recording {
            return None;
        }

        let input = self.devices.input.read();
        let heading = self.devices.imu.heading();
        let frame = Frame {
            timestamp: elapsed_ms(&self.clock, self.record_start),
            left:      input.left,
            right:     input.right,
            heading:   heading as f32,
            buttons:   input.buttons,
        };
        self.recording.push(frame);
        trace!("Sampled {:?}", frame);

        let lit = self.config.blink_lit(frame.timestamp);
        self.devices.notifier.indicator(Indicator::Recording { lit });
        Some(frame)
    }

    /// Stops recording and optionally saves the result.
    ///
    /// The recording stays in memory either way, so it can be replayed
    /// straight away.
    ///
    /// # Errors
    ///
    /// When `persist` is set, returns the store's error if saving failed.
    pub fn stop_recording(&mut self, persist: bool) -> Result<(), StoreError> {
        self.state = ReplayState::Idle;
        let frames = self.recording.frame_count();
        info!("Recording Stopped: {} frames over {:?}", frames, self.recording.duration());

        self.devices
            .notifier
            .status(StatusLine::Primary, &format!("STOPPED: {} frames", frames));
        self.devices.notifier.rumble(".");

        let result = if persist {
            let result = self.save_recording();
            let message = if result.is_ok() { "SAVED TO SD!" } else { "SD SAVE FAILED!" };
            self.devices.notifier.status(StatusLine::Secondary, message);
            result
        } else {
            Ok(())
        };

        self.show_idle_indicator();
        result
    }

    /// Discards the in-memory recording.
    pub fn clear(&mut self) {
        self.recording.clear();
        info!("Recording Cleared");
        self.devices
            .notifier
            .status(StatusLine::Primary, "RECORDING CLEARED");
        self.devices.notifier.indicator(Indicator::Off);
    }
}
