//! An ordered sequence of captured frames.

use std::{slice, time::Duration};

use super::frame::Frame;

/// Frames in capture order.
///
/// Capture order is storage order. Timestamps are non-decreasing and
/// nothing ever sorts or reorders the frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    frames: Vec<Frame>,
}

impl Recording {
    /// Creates an empty recording.
    pub fn new() -> Self { Self::default() }

    /// Appends a frame.
    pub fn push(&mut self, frame: Frame) {
        debug_assert!(
            self.frames.last().is_none_or(|last| last.timestamp <= frame.timestamp),
            "frames must be appended in timestamp order"
        );
        self.frames.push(frame);
    }

    /// Removes every frame.
    pub fn clear(&mut self) { self.frames.clear(); }

    /// The captured frames, oldest first.
    pub fn frames(&self) -> &[Frame] { &self.frames }

    /// Iterates over the frames, oldest first.
    pub fn iter(&self) -> slice::Iter<'_, Frame> { self.frames.iter() }

    /// Number of captured frames.
    pub fn frame_count(&self) -> usize { self.frames.len() }

    pub fn is_empty(&self) -> bool { self.frames.is_empty() }

    /// The last frame's timestamp, or zero when empty.
    pub fn duration(&self) -> Duration {
        self.frames
            .last()
            .map_or(Duration::ZERO, |frame| Duration::from_millis(frame.timestamp.into()))
    }
}

impl From<Vec<Frame>> for Recording {
    fn from(frames: Vec<Frame>) -> Self { Self { frames } }
}

impl<'a> IntoIterator for &'a Recording {
    type IntoIter = slice::Iter<'a, Frame>;
    type Item = &'a Frame;

    fn into_iter(self) -> Self::IntoIter { self.frames.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_at(timestamp: u32) -> Frame {
        Frame {
            timestamp,
            ..Frame::default()
        }
    }

    #[test]
    fn empty_recording_has_zero_duration() {
        let recording = Recording::new();
        assert!(recording.is_empty());
        assert_eq!(recording.frame_count(), 0);
        assert_eq!(recording.duration(), Duration::ZERO);
    }

    #[test]
    fn duration_is_last_timestamp() {
        let mut recording = Recording::new();
        for t in [0, 20, 40, 1_500] {
            recording.push(frame_at(t));
        }
        assert_eq!(recording.frame_count(), 4);
        assert_eq!(recording.duration(), Duration::from_millis(1_500));
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut recording = Recording::from(vec![frame_at(0), frame_at(20)]);
        recording.clear();
        assert!(recording.is_empty());
        assert_eq!(recording.duration(), Duration::ZERO);
    }

    #[test]
    fn iteration_preserves_capture_order() {
        let recording = Recording::from(vec![frame_at(5), frame_at(5), frame_at(9)]);
        let stamps: Vec<u32> = recording.iter().map(|f| f.timestamp).collect();
        assert_eq!(stamps, [5, 5, 9]);
    }
}
