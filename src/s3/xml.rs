//! S3 XML response decoding
//!
//! Covers the two documents this crate reads: `ListBucketResult` from
//! ListObjectsV2 and the flat `<Error>` document S3 returns on failure.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::s3::types::{Continuation, ListPage, ObjectRecord, DEFAULT_STORAGE_CLASS};

/// `ListBucketResult` as returned by ListObjectsV2
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListBucketResult {
    #[serde(default)]
    pub contents: Vec<ListedObject>,
    pub is_truncated: Option<bool>,
    pub next_continuation_token: Option<String>,
    pub key_count: Option<u64>,
}

/// One `<Contents>` entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListedObject {
    pub key: String,
    pub last_modified: String,
    #[serde(rename = "ETag")]
    pub etag: String,
    pub size: u64,
    pub storage_class: Option<String>,
}

impl ListedObject {
    /// Normalize into a record for the given bucket and region
    pub fn into_record(self, bucket: &str, region: &str) -> Result<ObjectRecord> {
        let last_modified = parse_timestamp(&self.last_modified)?;
        Ok(ObjectRecord {
            key: self.key,
            last_modified,
            etag: strip_quotes(&self.etag),
            size: self.size,
            storage_class: self
                .storage_class
                .unwrap_or_else(|| DEFAULT_STORAGE_CLASS.to_string()),
            bucket: bucket.to_string(),
            region: region.to_string(),
        })
    }
}

impl ListBucketResult {
    /// Decode a ListObjectsV2 response body
    pub fn parse(body: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(body)
            .map_err(|e| Error::MalformedResponse(format!("listing body is not UTF-8: {e}")))?;
        quick_xml::de::from_str(text)
            .map_err(|e| Error::MalformedResponse(format!("cannot decode listing: {e}")))
    }

    /// Turn the decoded listing into a page of records plus the next cursor
    pub fn into_page(self, bucket: &str, region: &str) -> Result<ListPage> {
        let is_truncated = self
            .is_truncated
            .ok_or_else(|| Error::MalformedResponse("listing has no IsTruncated".to_string()))?;

        // S3 omits Contents for an empty bucket. It reports KeyCount 0; some
        // compatible servers leave KeyCount out and only mark the listing complete.
        if self.contents.is_empty() {
            let empty = match self.key_count {
                Some(count) => count == 0,
                None => !is_truncated,
            };
            if !empty {
                return Err(Error::MalformedResponse(
                    "listing has no Contents".to_string(),
                ));
            }
        }

        let next = if is_truncated {
            let token = self.next_continuation_token.ok_or_else(|| {
                Error::MalformedResponse(
                    "truncated listing has no NextContinuationToken".to_string(),
                )
            })?;
            Some(Continuation::new(token))
        } else {
            None
        };

        let records = self
            .contents
            .into_iter()
            .map(|item| item.into_record(bucket, region))
            .collect::<Result<Vec<_>>>()?;

        Ok(ListPage { records, next })
    }
}

/// Fields of an S3 `<Error>` document
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorDocument {
    pub code: Option<String>,
    pub message: Option<String>,
    pub request_id: Option<String>,
}

/// Decode an S3 error body; `None` when it is empty or not an error document
pub fn parse_error(body: &[u8]) -> Option<ErrorDocument> {
    let text = std::str::from_utf8(body).ok()?;
    if text.trim().is_empty() {
        return None;
    }
    quick_xml::de::from_str(text).ok()
}

/// Remove every literal quote character from an ETag
pub fn strip_quotes(etag: &str) -> String {
    etag.replace('"', "")
}

/// Parse an S3 timestamp such as `2009-10-12T17:50:30.000Z`
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ").map(|ndt| ndt.and_utc())
        })
        .map_err(|e| Error::MalformedResponse(format!("invalid timestamp '{s}': {e}")))
}
