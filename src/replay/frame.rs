//! The fixed-size record for one sampled instant of driver input.
//!
//! # Byte Layout
//!
//! Every frame encodes to exactly [`FRAME_SIZE`] bytes, little-endian,
//! with no padding:
//!
//! ```text
//! offset  size  field
//! 0       4     timestamp (u32, ms since recording start)
//! 4       1     left stick (i8)
//! 5       1     right stick (i8)
//! 6       4     heading (f32, degrees)
//! 10      1     button mask (u8, see [`Buttons`])
//! ```

use bitflags::bitflags;

use crate::error::FrameError;

/// Number of bytes one encoded [`Frame`] occupies.
pub const FRAME_SIZE: usize = 11;

bitflags! {
    /// The seven tracked controller buttons, packed into one byte.
    ///
    /// The bit order is part of the persisted format and must not change.
    /// Bit 7 is unused.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        /// R1, intake forward toggle.
        const INTAKE_FORWARD  = 1 << 0;
        /// R2, intake reverse toggle.
        const INTAKE_REVERSE  = 1 << 1;
        /// L1, outtake forward toggle.
        const OUTTAKE_FORWARD = 1 << 2;
        /// L2, outtake reverse toggle.
        const OUTTAKE_REVERSE = 1 << 3;
        /// X, mid-scoring mode toggle.
        const MID_SCORING     = 1 << 4;
        /// A, descore piston toggle.
        const DESCORE         = 1 << 5;
        /// B, unloader piston toggle.
        const UNLOADER        = 1 << 6;
    }
}

impl Buttons {
    /// Buttons that are held in `self` but were not held in `previous`.
    pub fn rising(self, previous: Buttons) -> Buttons { self.difference(previous) & Buttons::all() }
}

/// One sampled instant of driver input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Milliseconds since the recording started.
    pub timestamp: u32,
    /// Left joystick Y axis, -127 to 127.
    pub left:      i8,
    /// Right joystick Y axis, -127 to 127.
    pub right:     i8,
    /// Heading reported by the inertial sensor when the frame was captured.
    pub heading:   f32,
    /// Buttons held when the frame was captured.
    pub buttons:   Buttons,
}

impl Frame {
    /// Encodes the frame into its fixed byte layout.
    pub fn encode(&self) -> [u8; FRAME_SIZE] {
        let mut bytes = [0u8; FRAME_SIZE];
        bytes[0..4].copy_from_slice(&self.timestamp.to_le_bytes());
        bytes[4] = self.left as u8;
        bytes[5] = self.right as u8;
        bytes[6..10].copy_from_slice(&self.heading.to_le_bytes());
        bytes[10] = self.buttons.bits();
        bytes
    }

    /// Decodes a frame from the first [`FRAME_SIZE`] bytes of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::TooShort`] if fewer than [`FRAME_SIZE`] bytes
    /// are available. Bytes past the first frame are ignored.
    pub fn decode(bytes: &[u8]) -> Result<Frame, FrameError> {
        let Some(bytes) = bytes.first_chunk::<FRAME_SIZE>() else {
            return Err(FrameError::TooShort {
                expected: FRAME_SIZE,
                actual:   bytes.len(),
            });
        };
        Ok(Frame::from_bytes(bytes))
    }

    /// Decodes exactly one frame.
    pub fn from_bytes(bytes: &[u8; FRAME_SIZE]) -> Frame {
        Frame {
            timestamp: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            left:      bytes[4] as i8,
            right:     bytes[5] as i8,
            heading:   f32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]),
            buttons:   Buttons::from_bits_retain(bytes[10]),
        }
    }
}
