//! Unit tests for the Engine logging facade
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! All tests are marked with #[serial] to run sequentially.

use crate::engine::Engine;
use crate::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        let mut entries = self.entries.lock().unwrap();
        entries.push(format!("{:?}: {}", entry.severity, entry.message));
    }
}

fn install() -> Arc<Mutex<Vec<String>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Engine::set_logger(TestLogger { entries: entries.clone() });
    entries
}

// ============================================================================
// LOGGING API TESTS
// ============================================================================

#[test]
#[serial]
fn test_set_logger_captures_messages() {
    let entries = install();

    Engine::log(LogSeverity::Info, "portal3d::Test", "hello".to_string());
    Engine::log(LogSeverity::Debug, "portal3d::Test", "world".to_string());

    {
        let captured = entries.lock().unwrap();
        let ours: Vec<&String> = captured.iter()
            .filter(|e| e.ends_with("hello") || e.ends_with("world"))
            .collect();
        assert_eq!(ours, vec!["Info: hello", "Debug: world"]);
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let entries = install();
    Engine::reset_logger();

    Engine::log(LogSeverity::Trace, "portal3d::Test", "not captured".to_string());

    assert!(!entries.lock().unwrap().iter().any(|e| e.contains("not captured")));
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let captured: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    struct EntryLogger(Arc<Mutex<Vec<LogEntry>>>);
    impl Logger for EntryLogger {
        fn log(&self, entry: &LogEntry) {
            self.0.lock().unwrap().push(entry.clone());
        }
    }

    Engine::set_logger(EntryLogger(captured.clone()));
    Engine::log_detailed(LogSeverity::Error, "portal3d::Test", "boom".to_string(), "x.rs", 9);

    {
        let entries = captured.lock().unwrap();
        let boom = entries.iter().find(|e| e.message == "boom").unwrap();
        assert_eq!(boom.file, Some("x.rs"));
        assert_eq!(boom.line, Some(9));
    }

    Engine::reset_logger();
}
