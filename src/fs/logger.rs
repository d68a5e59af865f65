//! A [`log`] backend that writes to the console and to `log.txt`.
//!
//! Initialize it once at the start of the program. Every state change of
//! the record/playback engine, and every device or storage error it
//! recovers from, then ends up in the file for review after a match.
//!
//! ```text
//! INFO [1m 2s 340ms] retrace::replay::playback - Replay Started: 750 frames over 15s
//! WARN [1m 2s 350ms] retrace::peripherals::imu - IMU Heading Error: Device not connected
//! ```

use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::format_duration;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use vexide::time::user_uptime;

/// Where [`init`] writes the log.
pub const LOG_PATH: &str = "log.txt";

/// Writes every enabled record to the console and, when the SD card is
/// available, to a log file.
pub struct RetraceLogger {
    /// `None` when the file could not be opened, e.g. no SD card inserted.
    file_writer: Mutex<Option<BufWriter<File>>>,
}

impl RetraceLogger {
    /// Creates a logger that truncates and writes to `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
        }
    }

    /// Whether log lines are reaching a file.
    pub fn has_file(&self) -> bool { self.file_writer.lock().is_ok_and(|writer| writer.is_some()) }
}

impl log::Log for RetraceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), get_time(), record.target(), record.args());
        print!("{}", line);

        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(writer) = writer_guard.as_mut() {
                let _ = writer.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(writer) = writer_guard.as_mut() {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<RetraceLogger> = OnceLock::new();

/// Installs the global logger, writing to [`LOG_PATH`].
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> { init_at(LOG_PATH, level) }

/// Installs the global logger, writing to `path`.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init_at(path: impl AsRef<Path>, level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RetraceLogger::open(path));
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Formats one log line, including the trailing newline.
pub fn format_line(level: Level, uptime: Duration, target: &str, args: &fmt::Arguments) -> String {
    format!("{} [{}] {} - {}\n", level, format_duration(uptime), target, args)
}

/// Time since the user program started, or zero off the robot.
fn get_time() -> Duration {
    if cfg!(target_os = "vexos") {
        // Millisecond resolution keeps the lines short.
        Duration::from_millis(user_uptime().as_millis() as u64)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use log::Log;

    use super::*;

    #[test]
    fn lines_carry_level_uptime_and_target() {
        let line = format_line(
            Level::Warn,
            Duration::from_millis(62_340),
            "retrace::replay",
            &format_args!("Error Saving Recording: {}", "disk full"),
        );
        assert_eq!(
            line,
            "WARN [1m 2s 340ms] retrace::replay - Error Saving Recording: disk full\n"
        );
    }

    #[test]
    fn records_reach_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        let logger = RetraceLogger::open(&path);
        assert!(logger.has_file());

        log::set_max_level(LevelFilter::Trace);
        logger.log(
            &Record::builder()
                .level(Level::Error)
                .target("retrace::test")
                .args(format_args!("Recording truncated"))
                .build(),
        );
        logger.flush();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("ERROR ["));
        assert!(contents.ends_with("retrace::test - Recording truncated\n"));
    }

    #[test]
    fn missing_directory_falls_back_to_console() {
        let dir = tempfile::tempdir().unwrap();
        let logger = RetraceLogger::open(dir.path().join("missing").join("log.txt"));
        assert!(!logger.has_file());
        logger.flush();
    }
}
