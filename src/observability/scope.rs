//! OperationScope brackets one store operation in the log
//!
//! - `{name}_BEGIN` on creation (TRACE)
//! - `{name}_COMPLETE` with elapsed time when `complete()` is called (INFO)
//! - `{name}_FAILED` when `fail()` is called (ERROR)
//! - `{name}_INCOMPLETE` if dropped without either (WARN)

use std::time::Instant;

use super::logger::Logger;

/// Logs the lifetime of a single operation
pub struct OperationScope {
    name: String,
    path: String,
    started: Instant,
    finished: bool,
}

impl OperationScope {
    /// Open a scope for `name` against the store at `path`
    pub fn new(name: &str, path: &str) -> Self {
        let name = name.to_ascii_uppercase();
        Logger::trace(&format!("{}_BEGIN", name), &[("path", path)]);

        Self {
            name,
            path: path.to_string(),
            started: Instant::now(),
            finished: false,
        }
    }

    /// Mark the operation as done, attaching `outcome`
    pub fn complete(mut self, outcome: &str) {
        self.finished = true;
        let elapsed = self.elapsed_us();
        Logger::info(
            &format!("{}_COMPLETE", self.name),
            &[
                ("elapsed_us", &elapsed),
                ("outcome", outcome),
                ("path", &self.path),
            ],
        );
    }

    /// Mark the operation as failed
    pub fn fail(mut self, reason: &str) {
        self.finished = true;
        Logger::error(
            &format!("{}_FAILED", self.name),
            &[("path", &self.path), ("reason", reason)],
        );
    }

    fn elapsed_us(&self) -> String {
        self.started.elapsed().as_micros().to_string()
    }
}

impl Drop for OperationScope {
    fn drop(&mut self) {
        if !self.finished {
            Logger::warn(
                &format!("{}_INCOMPLETE", self.name),
                &[("path", &self.path)],
            );
        }
    }
}
