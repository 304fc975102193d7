//! Outbound HTTP capability
//!
//! Operations never talk to the network directly. They hand a [`FetchRequest`]
//! to a [`Fetcher`] and get back the raw status and body. [`HttpFetcher`] is the
//! production implementation; tests substitute an in-memory one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

use crate::error::{Result, ServiceRequestError};
use crate::s3::signing::RequestSigner;
use crate::s3::xml;

/// Default timeout for a single request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A request ready to be signed and sent
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    /// Region the request is scoped to, used for signing
    pub region: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl FetchRequest {
    pub fn new(method: Method, url: Url, region: impl Into<String>) -> Self {
        Self {
            method,
            url,
            region: region.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Status and body of a completed request
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl FetchResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Turn a non-success status into [`crate::Error::ServiceRequest`]
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }

        let details = xml::parse_error(&self.body).unwrap_or_default();
        Err(ServiceRequestError {
            status: self.status,
            code: details.code,
            message: details.message,
            request_id: details.request_id,
            body: self.body,
        }
        .into())
    }
}

/// Something that can perform a request and return the raw response
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status; status handling belongs to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for &T {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse> {
        (**self).fetch(request).await
    }
}

/// [`Fetcher`] backed by `reqwest`, signing each request before it is sent
pub struct HttpFetcher {
    client: reqwest::Client,
    signer: Arc<dyn RequestSigner>,
}

impl HttpFetcher {
    /// Create a fetcher with its own HTTP client
    pub fn new(signer: Arc<dyn RequestSigner>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, signer })
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, mut request: FetchRequest) -> Result<FetchResponse> {
        self.signer.sign(&mut request)?;

        tracing::debug!(method = %request.method, url = %request.url, "sending S3 request");

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(%status, bytes = body.len(), "received S3 response");

        Ok(FetchResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_error_for_status_passes_success() {
        let response = FetchResponse::new(StatusCode::OK, "");
        assert!(response.error_for_status().is_ok());
    }

    #[test]
    fn test_error_for_status_keeps_service_details() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>NoSuchBucket</Code><Message>The specified bucket does not exist</Message><BucketName>missing</BucketName><RequestId>4442587FB7D0A2F9</RequestId></Error>"#;
        let err = FetchResponse::new(StatusCode::NOT_FOUND, body)
            .error_for_status()
            .unwrap_err();

        match err {
            Error::ServiceRequest(e) => {
                assert_eq!(e.status, StatusCode::NOT_FOUND);
                assert_eq!(e.code.as_deref(), Some("NoSuchBucket"));
                assert_eq!(e.message.as_deref(), Some("The specified bucket does not exist"));
                assert_eq!(e.request_id.as_deref(), Some("4442587FB7D0A2F9"));
                assert_eq!(e.body, Bytes::from(body));
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_for_status_without_xml_body() {
        let err = FetchResponse::new(StatusCode::FORBIDDEN, "")
            .error_for_status()
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.service_code(), None);
    }

    #[test]
    fn test_fetch_request_builder() {
        let url = Url::parse("https://b.s3.us-east-1.amazonaws.com/a.txt").unwrap();
        let request = FetchRequest::new(Method::PUT, url, "us-east-1").with_body("hello");
        assert_eq!(request.body, Some(Bytes::from("hello")));
        assert_eq!(request.region, "us-east-1");
        assert!(request.headers.is_empty());
    }
}
