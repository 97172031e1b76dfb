//! Observability for recstore
//!
//! Structured JSON lines on stderr. stdout carries operation output only.
//!
//! ```ignore
//! use recstore::observability::{Logger, OperationScope, Severity};
//!
//! Logger::set_threshold(Severity::Info);
//! Logger::info("STORE_FLUSHED", &[("records", "3")]);
//!
//! let scope = OperationScope::new("add", "users.json");
//! // ... do work ...
//! scope.complete("payload");
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::OperationScope;

#[cfg(test)]
pub(crate) use logger::take_captured;
