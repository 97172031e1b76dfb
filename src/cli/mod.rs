//! CLI module for recstore
//!
//! One invocation, one operation:
//! - list: echo the store file
//! - add: append a record unless its id exists
//! - remove: drop records by id
//! - findById: print one record

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{normalize_args, Cli};
pub use commands::{perform, render, run, run_with};
pub use config::{resolve_log_level, Operation, Request, DEFAULT_LOG_LEVEL, LOG_ENV};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_output;
