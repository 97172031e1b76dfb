//! recstore - a flag-driven record store over a single JSON file
//!
//! The library half exposes the store itself ([`store::RecordStore`]) so it
//! can be driven without the CLI; the binary is a thin wrapper over
//! [`cli::run`].

pub mod cli;
pub mod observability;
pub mod store;
