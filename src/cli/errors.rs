//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it to stderr and exits 1.

use std::fmt;
use std::io;

use crate::store::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Missing or unknown flag value
    InvalidArgs,
    /// `-item` is not a decodable record
    InvalidItem,
    /// Store file content could not be decoded or encoded
    StorageError,
    /// I/O error on the store file or stdout
    IoError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgs => "RECSTORE_CLI_INVALID_ARGS",
            Self::InvalidItem => "RECSTORE_CLI_INVALID_ITEM",
            Self::StorageError => "RECSTORE_CLI_STORAGE_ERROR",
            Self::IoError => "RECSTORE_CLI_IO_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Invalid or missing argument
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgs, msg)
    }

    /// A required flag was left empty
    pub fn missing_flag(flag: &str) -> Self {
        Self::invalid_args(format!("-{} flag has to be specified", flag))
    }

    /// Operation name outside list|add|remove|findById
    pub fn unknown_operation(op: &str) -> Self {
        Self::invalid_args(format!("Operation {} not allowed!", op))
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        let code = match &e {
            StoreError::InvalidItem(_) => CliErrorCode::InvalidItem,
            StoreError::Corrupt { .. } | StoreError::Encode(_) => CliErrorCode::StorageError,
            StoreError::Io { .. } => CliErrorCode::IoError,
        };
        Self::new(code, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
