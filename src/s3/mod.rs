//! S3 access module
//!
//! This module provides the bucket actions and the pieces they are built from:
//! - [`client::S3Client`] - create bucket, put object, list objects
//! - [`lister::ObjectLister`] - one-page listing plus lazy page/record streams
//! - [`fetch`] - the HTTP capability ([`fetch::Fetcher`], [`fetch::HttpFetcher`])
//! - [`signing`] - request signers ([`signing::SigV4Signer`])
//! - [`credentials`] - access keys and the AWS credential chain
//! - [`endpoint`] - request URL construction
//! - [`types`] - object records and pagination cursors
//! - [`xml`] - S3 XML response decoding

pub mod client;
pub mod credentials;
pub mod endpoint;
pub mod fetch;
pub mod lister;
pub mod signing;
pub mod types;
pub mod xml;

// Re-export commonly used types
pub use client::S3Client;
pub use credentials::AwsCredentials;
pub use endpoint::Endpoint;
pub use fetch::{FetchRequest, FetchResponse, Fetcher, HttpFetcher};
pub use lister::ObjectLister;
pub use signing::{RequestSigner, SigV4Signer, Unsigned};
pub use types::{Continuation, ListPage, ObjectRecord};
