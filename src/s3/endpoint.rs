//! Request URL construction
//!
//! AWS buckets are addressed virtual-hosted style:
//! `https://{bucket}.s3.{region}.amazonaws.com/`. S3-compatible servers can be
//! reached through a custom endpoint, either virtual-hosted or path style.
//!
//! Bucket names and regions are not validated; the service rejects bad ones.
//! Only values that cannot form a URL at all fail here.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::{Error, Result};

/// Everything except RFC 3986 unreserved characters is encoded.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single path segment or query component
pub fn uri_encode(value: &str) -> String {
    utf8_percent_encode(value, URI_ENCODE_SET).to_string()
}

/// Percent-encode an object key, keeping `/` separators
///
/// Dot segments are encoded too, so URL normalization cannot collapse
/// `a/../b` into a different key.
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| match segment {
            "." => "%2E".to_string(),
            ".." => "%2E%2E".to_string(),
            _ => uri_encode(segment),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Where bucket requests are sent
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// `https://{bucket}.s3.{region}.amazonaws.com`
    #[default]
    Aws,
    /// An S3-compatible server (MinIO, LocalStack, ...)
    Custom { base: Url, path_style: bool },
}

impl Endpoint {
    /// Parse a custom endpoint such as `http://localhost:9000`
    pub fn custom(url: &str, path_style: bool) -> Result<Self> {
        let base = Url::parse(url)
            .map_err(|e| Error::InvalidRequest(format!("invalid endpoint URL '{url}': {e}")))?;
        if base.host_str().is_none() {
            return Err(Error::InvalidRequest(format!("endpoint URL '{url}' has no host")));
        }
        Ok(Endpoint::Custom { base, path_style })
    }

    /// URL of the bucket itself (create bucket, list objects)
    pub fn bucket_url(&self, bucket: &str, region: &str) -> Result<Url> {
        let raw = match self {
            Endpoint::Aws => format!("https://{bucket}.s3.{region}.amazonaws.com/"),
            Endpoint::Custom { base, path_style: true } => {
                format!("{}/{}", base_without_slash(base), uri_encode(bucket))
            }
            Endpoint::Custom { base, path_style: false } => {
                let host = base.host_str().unwrap_or_default();
                let port = base.port().map(|p| format!(":{p}")).unwrap_or_default();
                format!("{}://{bucket}.{host}{port}/", base.scheme())
            }
        };
        parse(&raw)
    }

    /// URL of an object within a bucket
    ///
    /// An empty key has no object URL; it would address the bucket itself.
    pub fn object_url(&self, bucket: &str, region: &str, key: &str) -> Result<Url> {
        if key.is_empty() {
            return Err(Error::InvalidRequest("object key must not be empty".to_string()));
        }
        let bucket_url = self.bucket_url(bucket, region)?;
        let base = bucket_url.as_str().trim_end_matches('/');
        parse(&format!("{base}/{}", encode_key(key)))
    }

    /// ListObjectsV2 URL for one page
    pub fn list_url(
        &self,
        bucket: &str,
        region: &str,
        continuation_token: Option<&str>,
        max_keys: Option<u32>,
    ) -> Result<Url> {
        let mut url = self.bucket_url(bucket, region)?;

        let mut query = String::from("list-type=2");
        if let Some(token) = continuation_token {
            query.push_str("&continuation-token=");
            query.push_str(&uri_encode(token));
        }
        if let Some(max_keys) = max_keys {
            query.push_str(&format!("&max-keys={max_keys}"));
        }
        url.set_query(Some(&query));

        Ok(url)
    }
}

fn base_without_slash(base: &Url) -> &str {
    base.as_str().trim_end_matches('/')
}

fn parse(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::InvalidRequest(format!("cannot build URL '{raw}': {e}")))
}
