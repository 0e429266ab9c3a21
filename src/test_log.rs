//! Capturing logger for unit tests.
//!
//! Installed once per test binary via [`init`]. Records are kept per thread so tests running
//! in parallel only see their own lines.

use std::sync::{Mutex, Once};
use std::thread::{self, ThreadId};

use log::{LevelFilter, Log, Metadata, Record};

static INIT: Once = Once::new();
static RECORDS: Mutex<Vec<(ThreadId, String, String)>> = Mutex::new(Vec::new());

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.lock().unwrap_or_else(|e| e.into_inner()).push((
            thread::current().id(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

/// Installs the capturing logger. Safe to call from every test.
pub fn init() {
    INIT.call_once(|| {
        if log::set_boxed_logger(Box::new(CaptureLogger)).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Lines logged on `target` by the current thread, oldest first.
pub fn lines(target: &str) -> Vec<String> {
    let me = thread::current().id();
    RECORDS
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .iter()
        .filter(|(id, t, _)| *id == me && t == target)
        .map(|(_, _, line)| line.clone())
        .collect()
}
