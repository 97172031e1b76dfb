//! Record store over a single JSON file
//!
//! The whole file is read for every operation and, when a mutation changes
//! something, rewritten whole. No index, no cache, no locking.
//!
//! # Invariants
//!
//! - Zero-length file ⇔ empty store
//! - `id` is unique on add; nothing enforces it otherwise
//! - A conflict or miss never rewrites the file

mod errors;
mod file;
mod ops;
mod record;

pub use errors::{StoreError, StoreResult};
pub use file::StoreFile;
pub use ops::{Outcome, RecordStore};
pub use record::{decode_records, encode_records, Record};
