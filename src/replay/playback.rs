use std::time::Duration;

use log::{debug, info, trace, warn};

use super::{
    Replay, ReplayState,
    correction::HeadingCorrection,
    elapsed_ms,
    frame::{Buttons, Frame},
    toggles::ToggleTable,
};
use crate::{
    error::ReplayError,
    peripherals::{Clock, Devices, Indicator, StatusLine},
};

/// Dispatches the frames of one replay as they come due.
///
/// `Playback` holds no clock. Each [`poll`](Self::poll) is told how far
/// into the replay it is and dispatches every frame stamped at or before
/// that time, in order. A late poll dispatches a burst rather than
/// skipping frames.
pub struct Playback<'a> {
    frames:     &'a [Frame],
    next:       usize,
    previous:   Buttons,
    correction: HeadingCorrection,
    toggles:    &'a mut ToggleTable,
}

impl<'a> Playback<'a> {
    /// Starts a replay of `frames` with no buttons held.
    pub fn new(
        frames: &'a [Frame],
        correction: HeadingCorrection,
        toggles: &'a mut ToggleTable,
    ) -> Self {
        Self {
            frames,
            next: 0,
            previous: Buttons::empty(),
            correction,
            toggles,
        }
    }

    /// Whether every frame has been dispatched.
    pub fn is_finished(&self) -> bool { self.next >= self.frames.len() }

    pub fn dispatched(&self) -> usize { self.next }

    pub fn remaining(&self) -> usize { self.frames.len() - self.next }

    /// Dispatches every frame due at `elapsed_ms` and returns how many.
    pub fn poll(&mut self, elapsed_ms: u32, devices: &mut Devices) -> usize {
        let frames = self.frames;
        let mut dispatched = 0;
        while let Some(frame) = frames.get(self.next) {
            if frame.timestamp > elapsed_ms {
                break;
            }
            self.dispatch(frame, devices);
            self.next += 1;
            dispatched += 1;
        }
        dispatched
    }

    fn dispatch(&mut self, frame: &Frame, devices: &mut Devices) {
        let current = devices.imu.heading();
        let (left, right) =
            self.correction
                .correct(frame.left, frame.right, f64::from(frame.heading), current);
        devices.drive.drive(left, right);
        trace!("Replayed frame at {} ms: ({}, {})", frame.timestamp, left, right);

        let pressed = frame.buttons.rising(self.previous);
        if !pressed.is_empty() {
            self.toggles.fire(pressed, devices.mechanisms.as_mut());
        }
        self.previous = frame.buttons;
    }
}

/// What a finished replay did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Frames dispatched.
    pub frames:   usize,
    /// Times the playback loop checked for due frames.
    pub polls:    usize,
    /// Timestamp of the last recorded frame.
    pub recorded: Duration,
    /// Time from the first poll to the last.
    pub elapsed:  Duration,
}

impl<C: Clock> Replay<C> {
    /// Replays the recording in real time.
    ///
    /// Loads the stored recording first if nothing is in memory. The
    /// heading sensor is zeroed and the toggles unlatched before the
    /// first frame, so the replay starts from the same reference the
    /// recording did. When the last frame has been dispatched the drive,
    /// intake and outtake are stopped.
    ///
    /// Dropping the returned future stops the replay at the next poll.
    /// Outputs keep their last command until something else drives them.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::RecordingActive`] if a recording is in progress.
    /// - [`ReplayError::NoRecording`] if memory is empty and nothing could
    ///   be loaded. No output is commanded in that case.
    pub async fn play(&mut self) -> Result<PlaybackSummary, ReplayError> {
        match self.state {
            ReplayState::Recording => {
                warn!("Replay Requested While Recording");
                return Err(ReplayError::RecordingActive);
            }
            ReplayState::Playing => warn!("Recovering From An Interrupted Replay"),
            ReplayState::Idle => {}
        }

        if self.recording.is_empty() && !matches!(self.load_recording(), Ok(frames) if frames > 0) {
            info!("Nothing To Replay");
            self.state = ReplayState::Idle;
            self.devices
                .notifier
                .status(StatusLine::Primary, "NO RECORDING!");
            return Err(ReplayError::NoRecording);
        }

        self.state = ReplayState::Playing;
        self.toggles.reset();
        self.devices.imu.zero();
        info!(
            "Replay Started: {} frames over {}",
            self.recording.frame_count(),
            humantime::format_duration(self.recording.duration())
        );
        self.devices
            .notifier
            .status(StatusLine::Primary, "REPLAYING...");
        self.devices
            .notifier
            .indicator(Indicator::Playing { lit: true });
        self.clock.sleep(self.config.settle_delay).await;

        let correction = HeadingCorrection {
            gain:  self.config.correction_gain,
            limit: self.config.correction_limit,
        };
        let mut playback = Playback::new(self.recording.frames(), correction, &mut self.toggles);
        let start = self.clock.now();
        let mut polls = 0;
        let mut lit = true;

        loop {
            let elapsed = elapsed_ms(&self.clock, start);
            let dispatched = playback.poll(elapsed, &mut self.devices);
            polls += 1;
            if dispatched > 1 {
                debug!("Dispatched {} frames at {} ms", dispatched, elapsed);
            }
            if playback.is_finished() {
                break;
            }

            let blink = self.config.blink_lit(elapsed);
            if blink != lit {
                lit = blink;
                self.devices.notifier.indicator(Indicator::Playing { lit });
            }
            self.clock.sleep(self.config.poll_interval).await;
        }

        let summary = PlaybackSummary {
            frames: playback.dispatched(),
            polls,
            recorded: self.recording.duration(),
            elapsed: self.clock.now().saturating_sub(start),
        };

        self.devices.stop_all();
        self.state = ReplayState::Idle;
        info!(
            "Replay Complete: {} frames in {} polls",
            summary.frames, summary.polls
        );
        self.devices
            .notifier
            .status(StatusLine::Primary, "REPLAY COMPLETE!");
        self.devices.notifier.indicator(Indicator::Off);
        Ok(summary)
    }
}
