//! S3 Actions Library
//!
//! Three S3 bucket operations behind access-key authentication: create a
//! bucket, list its objects one page at a time, upload an object.
//!
//! ```ignore
//! use std::sync::Arc;
//! use s3_actions::s3::{AwsCredentials, HttpFetcher, S3Client, SigV4Signer};
//!
//! let signer = Arc::new(SigV4Signer::new(AwsCredentials::new("AKID", "SECRET", None)));
//! let client = S3Client::new(HttpFetcher::new(signer, std::time::Duration::from_secs(30))?);
//!
//! let page = client.list_objects("my-bucket", "us-east-1", None).await?;
//! let next = client.list_objects("my-bucket", "us-east-1", page.next.as_ref()).await?;
//! ```

pub mod error;
pub mod s3;
pub mod settings;

pub use error::{Error, Result, ServiceRequestError};
