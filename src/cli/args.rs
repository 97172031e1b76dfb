//! CLI argument definitions using clap
//!
//! ```text
//! recstore -operation add -item '{"id":"1","email":"a@b.com","age":30}' -fileName users.json
//! recstore --operation findById --id 1 --fileName users.json
//! ```
//!
//! Single-dash long flags are rewritten to double-dash before clap sees them.

use clap::Parser;

use crate::observability::Severity;

/// Long flag names that may be spelled with a single dash
const LONG_FLAGS: &[&str] = &[
    "id",
    "item",
    "operation",
    "fileName",
    "log-level",
    "help",
    "version",
];

/// recstore - list, add, remove and find user records in a JSON file
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "recstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Record id (remove, findById)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub id: String,

    /// JSON-encoded record (add)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub item: String,

    /// One of list, add, remove, findById
    #[arg(long, default_value = "")]
    pub operation: String,

    /// Path to the store file
    #[arg(long = "fileName", default_value = "")]
    pub file_name: String,

    /// Log threshold: trace, info, warn, error (overrides RECSTORE_LOG)
    #[arg(long = "log-level")]
    pub log_level: Option<Severity>,
}

impl Cli {
    /// Parse process arguments
    pub fn parse_args() -> Self {
        Cli::parse_from(normalize_args(std::env::args()))
    }

    /// Parse an explicit argument list (first item is the program name)
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Cli::try_parse_from(normalize_args(args.into_iter().map(Into::into)))
    }
}

/// Rewrite `-fileName x` / `-fileName=x` to `--fileName x` / `--fileName=x`.
///
/// Only names in [`LONG_FLAGS`] are touched, and nothing after a bare `--`.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }
        if let Some(rest) = arg.strip_prefix('-') {
            if !rest.starts_with('-') {
                let name = rest.split('=').next().unwrap_or(rest);
                if LONG_FLAGS.contains(&name) {
                    out.push(format!("-{}", arg));
                    continue;
                }
            }
        }
        out.push(arg);
    }

    out
}
