//! Typed request built once from the raw flags
//!
//! Validation runs in a fixed order and finishes before any file is opened:
//! `fileName`, then `operation`, then the operation's own argument.

use std::fmt;
use std::path::{Path, PathBuf};

use super::args::Cli;
use super::errors::{CliError, CliResult};
use crate::observability::Severity;

/// Environment variable consulted when `--log-level` is absent
pub const LOG_ENV: &str = "RECSTORE_LOG";

/// Threshold used when neither flag nor environment sets one
pub const DEFAULT_LOG_LEVEL: Severity = Severity::Warn;

/// The four supported operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Add,
    Remove,
    FindById,
}

impl Operation {
    /// Flag spelling of the operation
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::FindById => "findById",
        }
    }

    /// Parse a flag value; `None` for anything not spelled exactly
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "list" => Some(Operation::List),
            "add" => Some(Operation::Add),
            "remove" => Some(Operation::Remove),
            "findById" => Some(Operation::FindById),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List { path: PathBuf },
    Add { path: PathBuf, item: String },
    Remove { path: PathBuf, id: String },
    FindById { path: PathBuf, id: String },
}

impl Request {
    /// Validate raw flags into a request
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        if cli.file_name.is_empty() {
            return Err(CliError::missing_flag("fileName"));
        }
        let path = PathBuf::from(&cli.file_name);

        if cli.operation.is_empty() {
            return Err(CliError::missing_flag("operation"));
        }
        let operation = Operation::parse(&cli.operation)
            .ok_or_else(|| CliError::unknown_operation(&cli.operation))?;

        match operation {
            Operation::List => Ok(Request::List { path }),
            Operation::Add => {
                if cli.item.is_empty() {
                    return Err(CliError::missing_flag("item"));
                }
                Ok(Request::Add {
                    path,
                    item: cli.item.clone(),
                })
            }
            Operation::Remove | Operation::FindById => {
                if cli.id.is_empty() {
                    return Err(CliError::missing_flag("id"));
                }
                let id = cli.id.clone();
                Ok(if operation == Operation::Remove {
                    Request::Remove { path, id }
                } else {
                    Request::FindById { path, id }
                })
            }
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Request::List { .. } => Operation::List,
            Request::Add { .. } => Operation::Add,
            Request::Remove { .. } => Operation::Remove,
            Request::FindById { .. } => Operation::FindById,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Request::List { path }
            | Request::Add { path, .. }
            | Request::Remove { path, .. }
            | Request::FindById { path, .. } => path,
        }
    }
}

/// Pick the log threshold: flag, then environment, then default.
pub fn resolve_log_level(flag: Option<Severity>, env: Option<&str>) -> CliResult<Severity> {
    if let Some(level) = flag {
        return Ok(level);
    }
    match env {
        Some(value) if !value.trim().is_empty() => value
            .parse::<Severity>()
            .map_err(|e: String| CliError::invalid_args(format!("{}: {}", LOG_ENV, e))),
        _ => Ok(DEFAULT_LOG_LEVEL),
    }
}
