//! Engine facade - global logging services
//!
//! The engine keeps exactly one piece of process-global state: the logger.
//! Renderers are NOT globals; a backend hands the caller an explicit renderer
//! object that is passed by reference to whoever needs it. The underlying
//! graphics context is current on a single thread and the renderer types are
//! not `Send`, so a global registry would be unsound as well as unnecessary.

use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;

use crate::log::{DefaultLogger, LogEntry, LogSeverity, Logger};

/// Global logger (initialized with DefaultLogger on first use)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Engine facade
///
/// Hosts the swappable global logger used by the `engine_*!` macros.
///
/// # Example
///
/// ```no_run
/// use lumina_engine::lumina::Engine;
/// use lumina_engine::lumina::log::{Logger, LogEntry};
///
/// struct FileLogger;
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
///
/// Engine::set_logger(FileLogger);
/// ```
pub struct Engine;

impl Engine {
    fn logger() -> &'static RwLock<Box<dyn Logger>> {
        LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
    }

    /// Replace the global logger with a custom implementation
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = Self::logger().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset the global logger to the default console logger
    pub fn reset_logger() {
        if let Ok(mut lock) = Self::logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by the `engine_trace!` .. `engine_warn!` macros.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = Self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information
    ///
    /// Used by the `engine_error!` macro to include the source location.
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = Self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }
}
