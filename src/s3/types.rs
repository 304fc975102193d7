//! S3 data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage class reported for objects when the service leaves it out
pub const DEFAULT_STORAGE_CLASS: &str = "STANDARD";

/// One stored object, as returned by a listing call
///
/// Combines what the service reports with the bucket and region the listing
/// was issued against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    pub key: String,
    pub last_modified: DateTime<Utc>,
    /// Content fingerprint without the surrounding quote characters
    pub etag: String,
    pub size: u64,
    pub storage_class: String,
    pub bucket: String,
    pub region: String,
}

/// Continuation state handed back after a truncated page
///
/// Must be supplied unchanged with the next page request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Continuation {
    pub continuation_token: String,
}

impl Continuation {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            continuation_token: token.into(),
        }
    }
}

/// One page of a listing
///
/// Serializes as `{"result": [...], "continuation": {"continuationToken": ...}}`,
/// with `continuation` left out once the listing is complete.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListPage {
    #[serde(rename = "result")]
    pub records: Vec<ObjectRecord>,
    #[serde(rename = "continuation", default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Continuation>,
}

impl ListPage {
    /// Whether this is the last page of the listing
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }
}
