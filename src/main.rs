//! recstore CLI entry point
//!
//! Parses flags and dispatches via `cli::run`. Any error is printed to
//! stderr and the process exits non-zero; nothing panics on bad input.

use recstore::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
