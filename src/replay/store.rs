//! Persisting recordings to the V5 Brain's SD card.
//!
//! # File Format
//!
//! ```text
//! [u32 LE frame count][frame count × 11-byte frames]
//! ```
//!
//! There is no header, version or checksum. The count is checked against
//! [`MAX_FRAMES`] before anything is allocated, so a corrupt count can never
//! make the loader reserve an absurd amount of memory.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, ErrorKind, Read, Write},
    path::{Path, PathBuf},
};

use log::{info, warn};

use super::{
    frame::{FRAME_SIZE, Frame},
    recording::Recording,
};
use crate::error::StoreError;

/// Where recordings live on the SD card.
pub const RECORDING_PATH: &str = "auton_recording.bin";

/// Largest frame count accepted on load: 5 minutes at 50 samples a second.
pub const MAX_FRAMES: u32 = 15_000;

const COUNT_SIZE: usize = 4;

/// Saves and loads a single recording file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingStore {
    path: PathBuf,
}

impl Default for RecordingStore {
    fn default() -> Self { Self::at(RECORDING_PATH) }
}

impl RecordingStore {
    /// A store backed by the file at `path`.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Writes `recording` to the backing file, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the file cannot be created or
    /// written (for example, no SD card is inserted).
    pub fn save(&self, recording: &Recording) -> Result<(), StoreError> {
        let file = File::create(&self.path)?;
        write_to(recording, BufWriter::new(file))?;
        info!("Saved {} frames to {}", recording.frame_count(), self.path.display());
        Ok(())
    }

    /// Reads the recording stored in the backing file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Unavailable`] if the file cannot be opened.
    /// - [`StoreError::TooManyFrames`] if the declared count exceeds
    ///   [`MAX_FRAMES`].
    /// - [`StoreError::Truncated`] if the file holds fewer frames than it
    ///   declares.
    ///
    /// Nothing read before a failure is returned.
    pub fn load(&self) -> Result<Recording, StoreError> {
        let file = File::open(&self.path)?;
        let recording = read_from(BufReader::new(file))?;
        info!("Loaded {} frames from {}", recording.frame_count(), self.path.display());
        Ok(recording)
    }
}

/// Writes `recording` to `writer` in the persisted format.
pub fn write_to<W: Write>(recording: &Recording, mut writer: W) -> Result<(), StoreError> {
    let count = u32::try_from(recording.frame_count()).unwrap_or(u32::MAX);
    if count > MAX_FRAMES {
        warn!(
            "Saving {} frames, more than the {} the loader accepts",
            count, MAX_FRAMES
        );
    }

    writer.write_all(&count.to_le_bytes())?;
    for frame in recording {
        writer.write_all(&frame.encode())?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a recording in the persisted format from `reader`.
pub fn read_from<R: Read>(mut reader: R) -> Result<Recording, StoreError> {
    let mut count_bytes = [0u8; COUNT_SIZE];
    let read = read_full(&mut reader, &mut count_bytes)?;
    if read < COUNT_SIZE {
        return Err(StoreError::Truncated {
            expected: COUNT_SIZE,
            actual:   read,
        });
    }

    let count = u32::from_le_bytes(count_bytes);
    if count > MAX_FRAMES {
        return Err(StoreError::TooManyFrames {
            count,
            max: MAX_FRAMES,
        });
    }

    let count = count as usize;
    let mut frames = Vec::with_capacity(count);
    let mut buf = [0u8; FRAME_SIZE];
    for index in 0..count {
        let read = read_full(&mut reader, &mut buf)?;
        if read < FRAME_SIZE {
            return Err(StoreError::Truncated {
                expected: COUNT_SIZE + count * FRAME_SIZE,
                actual:   COUNT_SIZE + index * FRAME_SIZE + read,
            });
        }
        frames.push(Frame::from_bytes(&buf));
    }

    // Stored timestamps are replayed as-is, even out of order.
    Ok(Recording::from(frames))
}

/// Like `read_exact`, but reports how many bytes were read before EOF.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
