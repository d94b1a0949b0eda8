//! Progress notices for the cleaning run.
//!
//! Every stage reports what it is doing through the global [`PROGRESS_LOG`],
//! which prints to stdout and keeps a short in-memory history.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Number of entries kept by [`ProgressLog::recent`].
const HISTORY_LIMIT: usize = 1000;

/// Log level of a progress notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Optional indentation level (for nested notices)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Line as printed to stdout.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "",
            LogLevel::Success => "✓ ",
            LogLevel::Warning => "⚠️ ",
            LogLevel::Error => "❌ ",
        };
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{}{}", indent, prefix, self.message)
    }
}

/// Global progress log
pub static PROGRESS_LOG: Lazy<ProgressLog> = Lazy::new(ProgressLog::new);

/// Prints progress notices and remembers the latest ones
pub struct ProgressLog {
    quiet: AtomicBool,
    history: Mutex<VecDeque<LogEntry>>,
}

impl ProgressLog {
    pub fn new() -> Self {
        Self {
            quiet: AtomicBool::new(false),
            history: Mutex::new(VecDeque::with_capacity(HISTORY_LIMIT)),
        }
    }

    /// Record an entry and print it. Errors go to stderr even when quiet.
    pub fn log(&self, entry: LogEntry) {
        if entry.level == LogLevel::Error {
            eprintln!("{}", entry.render());
        } else if !self.quiet.load(Ordering::Relaxed) {
            println!("{}", entry.render());
        }

        // A poisoned history only loses notices, never the run.
        if let Ok(mut history) = self.history.lock() {
            if history.len() == HISTORY_LIMIT {
                history.pop_front();
            }
            history.push_back(entry);
        }
    }

    /// Stop printing to stdout (history is still kept)
    pub fn set_quiet(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    /// Most recent entries, oldest first
    pub fn recent(&self) -> Vec<LogEntry> {
        self.history
            .lock()
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for ProgressLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    PROGRESS_LOG.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    PROGRESS_LOG.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    PROGRESS_LOG.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    PROGRESS_LOG.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    PROGRESS_LOG.log(LogEntry::info(msg).with_indent(indent));
}

pub fn set_quiet(quiet: bool) {
    PROGRESS_LOG.set_quiet(quiet);
}
