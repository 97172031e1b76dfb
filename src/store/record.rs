//! Record type and the JSON codec for records and whole stores
//!
//! A store on disk is a JSON array of records:
//!
//! ```text
//! [{"id":"1","email":"a@b.com","age":30}]
//! ```
//!
//! Zero-length content, whitespace-only content and the literal `null` all
//! decode to an empty store. An empty store always encodes as `[]`.
//!
//! Records already in the file decode leniently: every field, `id` included,
//! falls back to its zero value. Only an `-item` must carry an `id`.

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};

/// A single user record. `id` is the unique key within a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: i64,
}

impl Record {
    pub fn new(id: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            age,
        }
    }

    /// Decode a record from the `item` argument
    pub fn from_item(item: &str) -> StoreResult<Self> {
        let item: Item = serde_json::from_str(item).map_err(StoreError::InvalidItem)?;
        Ok(item.into())
    }

    /// Compact JSON encoding of this record
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(StoreError::Encode)
    }
}

/// Shape accepted from the `item` argument
#[derive(Deserialize)]
struct Item {
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    age: i64,
}

impl From<Item> for Record {
    fn from(item: Item) -> Self {
        Record::new(item.id, item.email, item.age)
    }
}

/// Decode raw store content into records.
///
/// Returns the serde error untouched so the caller can attach the file path.
pub fn decode_records(content: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let records: Option<Vec<Record>> = serde_json::from_slice(content)?;
    Ok(records.unwrap_or_default())
}

/// Encode records as a compact JSON array
pub fn encode_records(records: &[Record]) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(records).map_err(StoreError::Encode)
}
