//! Structured JSON logger
//!
//! - One log line = one event, written to stderr
//! - `event` first, then `severity`, then caller fields sorted by key
//! - Lines below the process-wide threshold are dropped
//!
//! stdout is reserved for operation output, so nothing here ever writes to it.

use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

#[cfg(test)]
use std::cell::RefCell;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Step-by-step detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Domain conditions worth noticing (conflicts, misses)
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Highest level; as a threshold it silences every operation event
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

#[cfg(not(test))]
static THRESHOLD: AtomicU8 = AtomicU8::new(Severity::Warn as u8);

// Unit tests run on parallel threads: each gets its own threshold and its
// own capture buffer in place of stderr.
#[cfg(test)]
thread_local! {
    static THRESHOLD: AtomicU8 = AtomicU8::new(Severity::Warn as u8);
    static CAPTURED: RefCell<Vec<u8>> = RefCell::new(Vec::new());
}

#[cfg(not(test))]
fn load_threshold() -> u8 {
    THRESHOLD.load(Ordering::Relaxed)
}

#[cfg(not(test))]
fn store_threshold(value: u8) {
    THRESHOLD.store(value, Ordering::Relaxed);
}

#[cfg(test)]
fn load_threshold() -> u8 {
    THRESHOLD.with(|t| t.load(Ordering::Relaxed))
}

#[cfg(test)]
fn store_threshold(value: u8) {
    THRESHOLD.with(|t| t.store(value, Ordering::Relaxed));
}

/// Stateless structured logger
pub struct Logger;

impl Logger {
    /// Set the minimum severity that will be emitted
    pub fn set_threshold(severity: Severity) {
        store_threshold(severity as u8);
    }

    /// Current minimum severity
    pub fn threshold() -> Severity {
        Severity::from_u8(load_threshold())
    }

    /// Whether a line at `severity` would be written
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::threshold()
    }

    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if !Self::enabled(severity) {
            return;
        }
        #[cfg(not(test))]
        Self::log_to_writer(severity, event, fields, &mut std::io::stderr());
        #[cfg(test)]
        CAPTURED.with(|buf| Self::log_to_writer(severity, event, fields, &mut *buf.borrow_mut()));
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut output = String::with_capacity(128);

        output.push('{');

        output.push_str("\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');

        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push_str("}\n");

        // One write per line; a failing stderr must not fail the operation.
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

/// Drain the lines logged on this thread, one parsed JSON object per line
#[cfg(test)]
pub(crate) fn take_captured() -> Vec<serde_json::Value> {
    let bytes = CAPTURED.with(|buf| std::mem::take(&mut *buf.borrow_mut()));
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
