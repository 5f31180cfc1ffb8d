//! Log sinks handed to the planner and executor.
//!
//! Planning and execution never touch process-wide logging state; callers
//! pass a [`Sink`] and decide where events end up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub level: Level,
    pub message: String,
}

/// Receiver for log events emitted while planning or executing
pub trait Sink {
    fn log(&mut self, level: Level, message: &str);

    fn debug(&mut self, message: &str) {
        self.log(Level::Debug, message);
    }

    fn info(&mut self, message: &str) {
        self.log(Level::Info, message);
    }

    fn warn(&mut self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&mut self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {
    fn log(&mut self, _level: Level, _message: &str) {}
}

/// Keeps events in memory
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub events: Vec<LogEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &LogEvent> {
        self.events.iter().filter(move |e| e.level == level)
    }
}

impl Sink for MemorySink {
    fn log(&mut self, level: Level, message: &str) {
        self.events.push(LogEvent {
            level,
            message: message.to_string(),
        });
    }
}

/// Forwards events to the `tracing` macros
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn log(&mut self, level: Level, message: &str) {
        match level {
            Level::Debug => tracing::debug!("{}", message),
            Level::Info => tracing::info!("{}", message),
            Level::Warn => tracing::warn!("{}", message),
            Level::Error => tracing::error!("{}", message),
        }
    }
}

/// Appends timestamped lines to a log file
pub struct FileSink {
    file: File,
    min_level: Level,
}

impl FileSink {
    pub fn open(path: &Path, min_level: Level) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file, min_level })
    }
}

impl Sink for FileSink {
    fn log(&mut self, level: Level, message: &str) {
        if level < self.min_level {
            return;
        }
        // A broken log file must not abort a rename batch
        let _ = writeln!(
            self.file,
            "[{}] {} {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            message
        );
        let _ = self.file.flush();
    }
}

impl<A: Sink, B: Sink> Sink for (A, B) {
    fn log(&mut self, level: Level, message: &str) {
        self.0.log(level, message);
        self.1.log(level, message);
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn log(&mut self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_sink_collects_events() {
        let mut sink = MemorySink::new();
        sink.info("one");
        sink.warn("two");
        sink.info("three");

        assert_eq!(sink.events.len(), 3);
        assert_eq!(sink.at_level(Level::Info).count(), 2);
        assert_eq!(sink.at_level(Level::Warn).next().unwrap().message, "two");
    }

    #[test]
    fn test_file_sink_filters_and_timestamps() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("logs").join("renamer.log");

        {
            let mut sink = FileSink::open(&log_path, Level::Info).unwrap();
            sink.debug("hidden");
            sink.info("Renamed a.txt -> b.txt");
            sink.error("Failed c.txt");
        }

        let content = fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("INFO Renamed a.txt -> b.txt"));
        assert!(lines[1].ends_with("ERROR Failed c.txt"));
    }

    #[test]
    fn test_pair_sink_fans_out() {
        let mut pair = (MemorySink::new(), MemorySink::new());
        pair.warn("both");
        assert_eq!(pair.0.events.len(), 1);
        assert_eq!(pair.1.events.len(), 1);
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert!("loud".parse::<Level>().is_err());
        assert!(Level::Debug < Level::Error);
    }
}
