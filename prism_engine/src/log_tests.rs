//! Unit tests for log.rs
//!
//! Tests LogSeverity, LogEntry and DefaultLogger formatting/filtering.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

// ============================================================================
// HELPERS
// ============================================================================

fn entry(severity: LogSeverity, message: &str, location: Option<(&'static str, u32)>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "prism::ShaderResourceManager".to_string(),
        message: message.to_string(),
        file: location.map(|(f, _)| f),
        line: location.map(|(_, l)| l),
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_labels_are_fixed_width() {
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        assert_eq!(severity.label().len(), 5);
    }
    assert_eq!(LogSeverity::Info.label(), "INFO ");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_with_file_line() {
    let e = entry(LogSeverity::Error, "Resizing is an invalid operation", Some(("resource_manager.rs", 42)));
    assert_eq!(e.file, Some("resource_manager.rs"));
    assert_eq!(e.line, Some(42));

    let cloned = e.clone();
    assert_eq!(cloned.message, e.message);
    assert_eq!(cloned.severity, LogSeverity::Error);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_format_plain_without_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Warn, "unset texture", None));
    assert!(line.contains("[WARN ]"));
    assert!(line.contains("[prism::ShaderResourceManager]"));
    assert!(line.ends_with("unset texture"));
}

#[test]
fn test_format_plain_with_location() {
    let line = DefaultLogger::format_plain(&entry(LogSeverity::Error, "bad", Some(("a.rs", 7))));
    assert!(line.contains("[ERROR]"));
    assert!(line.ends_with("bad (a.rs:7)"));
}

#[test]
fn test_default_logger_min_severity() {
    assert_eq!(DefaultLogger::new().min_severity(), LogSeverity::Trace);
    assert_eq!(DefaultLogger::default().min_severity(), LogSeverity::Trace);

    let logger = DefaultLogger::with_min_severity(LogSeverity::Warn);
    assert_eq!(logger.min_severity(), LogSeverity::Warn);

    // Filtered and printed paths must both be panic-free
    logger.log(&entry(LogSeverity::Debug, "dropped", None));
    logger.log(&entry(LogSeverity::Error, "printed", Some(("x.rs", 1))));
}

#[test]
fn test_default_logger_all_severities() {
    let logger = DefaultLogger::new();
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        logger.log(&entry(severity, "message", None));
        logger.log(&entry(severity, "message with location", Some(("test.rs", 42))));
    }
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CountingLogger {
    logged_count: std::sync::Mutex<usize>,
}

impl Logger for CountingLogger {
    fn log(&self, _entry: &LogEntry) {
        *self.logged_count.lock().unwrap() += 1;
    }
}

#[test]
fn test_custom_logger_implementation() {
    let logger = CountingLogger { logged_count: std::sync::Mutex::new(0) };
    logger.log(&entry(LogSeverity::Info, "one", None));
    logger.log(&entry(LogSeverity::Info, "two", None));
    assert_eq!(*logger.logged_count.lock().unwrap(), 2);
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}
