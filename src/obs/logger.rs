use std::fmt::Arguments;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Severity levels for log messages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Fine-grained, low-level diagnostic messages.
    Debug,
    /// Progress of the demo: inserts, updates, counts.
    Info,
    /// Warnings about unexpected but non-fatal behavior.
    Warn,
    /// Errors that may require attention.
    Error,
}

/// Interface for the console progress output and structured trace events.
///
/// Messages are formatted lazily through `std::fmt::Arguments`, so a disabled
/// level costs nothing beyond the `level_enabled` check.
pub trait LoggerAndTracer: Send + Sync {
    /// Logs a formatted message at the specified level.
    fn log(&self, level: LogLevel, context: &'static str, msg: Arguments);

    /// Emits a trace event message. Format should follow:
    ///
    /// `<action>, key1=value1, key2=value2`
    ///
    /// Example:
    /// `update done, _id=65f1..., matched=1, modified=1`
    fn event(&self, context: &'static str, event: Arguments);

    /// Returns `true` if tracing events are enabled.
    fn is_tracing_enabled(&self) -> bool;

    /// Returns `true` if the given log level is currently enabled.
    fn level_enabled(&self, level: LogLevel) -> bool;
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::obs::logger::LogLevel::Debug, module_path!(), format_args!($($arg)*));
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::obs::logger::LogLevel::Info, module_path!(), format_args!($($arg)*));
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::obs::logger::LogLevel::Warn, module_path!(), format_args!($($arg)*));
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::obs::logger::LogLevel::Error, module_path!(), format_args!($($arg)*));
    };
}

#[macro_export]
macro_rules! event {
    ($logger:expr, $($arg:tt)*) => {
        $logger.event(module_path!(), format_args!($($arg)*));
    };
}

/// Prints messages to stdout.
///
/// A decorated logger prefixes every line with the level, a timestamp, the
/// thread id and the emitting module. A plain logger prints the message alone,
/// which is what the demo binary uses for its progress lines.
pub struct StdoutLogger {
    /// Minimum log level to emit.
    pub min_level: LogLevel,
    /// Whether structured trace events are enabled.
    pub tracing_enabled: bool,
    /// Whether lines carry the `[level] [timestamp] [thread] [module]` prefix.
    pub decorated: bool,
}

impl StdoutLogger {
    pub fn new(min_level: LogLevel, tracing_enabled: bool) -> Arc<Self> {
        Arc::new(StdoutLogger {
            tracing_enabled,
            min_level,
            decorated: true,
        })
    }

    pub fn plain(min_level: LogLevel) -> Arc<Self> {
        Arc::new(StdoutLogger {
            tracing_enabled: false,
            min_level,
            decorated: false,
        })
    }

    /// Returns current timestamp in microseconds since UNIX_EPOCH.
    fn now_micros() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros())
            .unwrap_or_default()
    }
}

impl LoggerAndTracer for StdoutLogger {
    fn log(&self, level: LogLevel, context: &'static str, msg: Arguments) {
        if !self.level_enabled(level) {
            return;
        }
        if self.decorated {
            let timestamp = Self::now_micros();
            let thread_id = std::thread::current().id();
            println!(
                "[{:?}] [{}] [thread={:?}] [{}] {}",
                level, timestamp, thread_id, context, msg
            );
        } else {
            println!("{}", msg);
        }
    }

    fn event(&self, context: &'static str, event: Arguments) {
        if self.tracing_enabled {
            let timestamp = Self::now_micros();
            let thread_id = std::thread::current().id();
            println!("[TRACE] [{}] [thread={:?}] [{}] {}", timestamp, thread_id, context, event);
        }
    }

    fn is_tracing_enabled(&self) -> bool {
        self.tracing_enabled
    }

    fn level_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// Discards everything.
#[derive(Default)]
pub struct NoOpLogger;

impl LoggerAndTracer for NoOpLogger {
    fn log(&self, _level: LogLevel, _context: &'static str, _msg: Arguments) {}

    fn event(&self, _context: &'static str, _event: Arguments) {}

    fn is_tracing_enabled(&self) -> bool {
        false
    }

    fn level_enabled(&self, _level: LogLevel) -> bool {
        false
    }
}

/// Keeps every message at or above `min_level` in memory, in emission order.
/// Trace events are kept separately.
pub struct MemoryLogger {
    min_level: LogLevel,
    lines: Mutex<Vec<String>>,
    events: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new(min_level: LogLevel) -> Arc<Self> {
        Arc::new(MemoryLogger {
            min_level,
            lines: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl LoggerAndTracer for MemoryLogger {
    fn log(&self, level: LogLevel, _context: &'static str, msg: Arguments) {
        if self.level_enabled(level) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(msg.to_string());
            }
        }
    }

    fn event(&self, _context: &'static str, event: Arguments) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.to_string());
        }
    }

    fn is_tracing_enabled(&self) -> bool {
        true
    }

    fn level_enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

#[cfg(test)]
pub fn test_instance() -> Arc<dyn LoggerAndTracer> {
    StdoutLogger::new(LogLevel::Debug, true)
}
