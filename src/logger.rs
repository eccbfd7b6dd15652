//! Logging collaborator owned by [`DirectoryManager`](crate::DirectoryManager).
//!
//! Operations report progress and per-file failures through the [`Logger`]
//! trait instead of a process-wide logger, so callers choose where messages
//! go. [`TracingLogger`] forwards to `tracing`; [`MemoryLogger`] keeps the
//! messages for later inspection.

use std::sync::{Arc, Mutex, PoisonError};

/// Sink for informational and error messages.
pub trait Logger {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards messages to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Severity of a captured message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

/// A message captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// Captures messages in memory.
///
/// Clones share the same buffer, so a clone can be handed to a manager
/// while the original is kept for reading.
///
/// ```
/// use dirkeep::logger::{Logger, MemoryLogger};
///
/// let logger = MemoryLogger::default();
/// logger.clone().error("boom");
/// assert_eq!(logger.errors(), vec!["boom".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemoryLogger {
    /// Returns every captured record in emission order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the info messages.
    pub fn infos(&self) -> Vec<String> {
        self.messages(LogLevel::Info)
    }

    /// Returns the error messages.
    pub fn errors(&self) -> Vec<String> {
        self.messages(LogLevel::Error)
    }

    fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|record| record.level == level)
            .map(|record| record.message)
            .collect()
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogRecord {
                level,
                message: message.to_string(),
            });
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}
