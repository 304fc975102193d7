//! S3 client with the bucket actions

use std::sync::Arc;

use bytes::Bytes;
use http::Method;

use crate::error::Result;
use crate::s3::endpoint::Endpoint;
use crate::s3::fetch::{FetchRequest, Fetcher};
use crate::s3::lister::ObjectLister;
use crate::s3::types::{Continuation, ListPage};

/// S3 client wrapper with high-level operations
///
/// Every operation issues exactly one request and does not retry.
#[derive(Debug)]
pub struct S3Client<F> {
    fetcher: Arc<F>,
    endpoint: Endpoint,
    page_size: Option<u32>,
}

impl<F> Clone for S3Client<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            endpoint: self.endpoint.clone(),
            page_size: self.page_size,
        }
    }
}

impl<F: Fetcher> S3Client<F> {
    /// Create a client talking to AWS through the given fetcher
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            endpoint: Endpoint::default(),
            page_size: None,
        }
    }

    /// Send requests to a different endpoint
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Limit the number of keys returned per listing page
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Create a bucket in the given region
    pub async fn create_bucket(&self, bucket: &str, region: &str) -> Result<()> {
        let url = self.endpoint.bucket_url(bucket, region)?;

        self.fetcher
            .fetch(FetchRequest::new(Method::PUT, url, region))
            .await?
            .error_for_status()?;

        tracing::info!(bucket, region, "created bucket");
        Ok(())
    }

    /// Upload bytes as an object
    pub async fn put_object(
        &self,
        bucket: &str,
        region: &str,
        key: &str,
        contents: impl Into<Bytes>,
    ) -> Result<()> {
        let url = self.endpoint.object_url(bucket, region, key)?;
        let contents = contents.into();
        let size = contents.len();

        self.fetcher
            .fetch(FetchRequest::new(Method::PUT, url, region).with_body(contents))
            .await?
            .error_for_status()?;

        tracing::info!(bucket, region, key, size, "uploaded object");
        Ok(())
    }

    /// List one page of objects, continuing from `cursor` if given
    pub async fn list_objects(
        &self,
        bucket: &str,
        region: &str,
        cursor: Option<&Continuation>,
    ) -> Result<ListPage> {
        self.lister().list_page(bucket, region, cursor).await
    }

    /// Lister sharing this client's fetcher and endpoint, for streaming
    pub fn lister(&self) -> ObjectLister<Arc<F>> {
        ObjectLister::new(Arc::clone(&self.fetcher), self.endpoint.clone())
            .with_page_size(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::s3::fetch::testing::MockFetcher;
    use crate::s3::fetch::FetchResponse;
    use http::StatusCode;

    #[tokio::test]
    async fn test_create_bucket_sends_empty_put() {
        let client = S3Client::new(MockFetcher::new([FetchResponse::new(StatusCode::OK, "")]));

        client.create_bucket("my-bucket", "eu-central-1").await.unwrap();

        let requests = client.fetcher.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(
            requests[0].url.as_str(),
            "https://my-bucket.s3.eu-central-1.amazonaws.com/"
        );
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_create_existing_bucket_propagates_conflict() {
        let body = "<Error><Code>BucketAlreadyExists</Code><Message>The requested bucket name is not available.</Message></Error>";
        let client = S3Client::new(MockFetcher::new([FetchResponse::new(StatusCode::CONFLICT, body)]));

        let err = client.create_bucket("taken", "us-east-1").await.unwrap_err();

        match err {
            Error::ServiceRequest(e) => {
                assert_eq!(e.status, StatusCode::CONFLICT);
                assert_eq!(e.code.as_deref(), Some("BucketAlreadyExists"));
                assert_eq!(e.body, Bytes::from(body));
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_put_object_sends_contents() {
        let client = S3Client::new(MockFetcher::new([FetchResponse::new(StatusCode::OK, "")]));

        client
            .put_object("my-bucket", "us-east-1", "a/b.txt", "hello")
            .await
            .unwrap();

        let requests = client.fetcher.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(
            requests[0].url.as_str(),
            "https://my-bucket.s3.us-east-1.amazonaws.com/a/b.txt"
        );
        assert_eq!(requests[0].body, Some(Bytes::from("hello")));
    }

    #[tokio::test]
    async fn test_put_object_with_empty_key_sends_nothing() {
        let client = S3Client::new(MockFetcher::default());

        let err = client
            .put_object("my-bucket", "us-east-1", "", "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(client.fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_put_object_keeps_dot_segments_in_key() {
        let client = S3Client::new(MockFetcher::new([FetchResponse::new(StatusCode::OK, "")]));

        client
            .put_object("my-bucket", "us-east-1", "a/../secret.txt", "hello")
            .await
            .unwrap();

        assert_eq!(
            client.fetcher.requests()[0].url.as_str(),
            "https://my-bucket.s3.us-east-1.amazonaws.com/a/%2E%2E/secret.txt"
        );
    }

    #[tokio::test]
    async fn test_put_object_to_missing_bucket() {
        let client = S3Client::new(MockFetcher::new([FetchResponse::new(
            StatusCode::NOT_FOUND,
            "<Error><Code>NoSuchBucket</Code></Error>",
        )]));

        let err = client
            .put_object("missing", "us-east-1", "k", Vec::from("data"))
            .await
            .unwrap_err();
        assert_eq!(err.service_code(), Some("NoSuchBucket"));
    }

    #[tokio::test]
    async fn test_custom_endpoint_is_used() {
        let endpoint = Endpoint::custom("http://localhost:9000", true).unwrap();
        let client = S3Client::new(MockFetcher::new([FetchResponse::new(StatusCode::OK, "")]))
            .with_endpoint(endpoint);

        client.create_bucket("data", "us-east-1").await.unwrap();

        assert_eq!(
            client.fetcher.requests()[0].url.as_str(),
            "http://localhost:9000/data"
        );
    }

    #[tokio::test]
    async fn test_list_objects_uses_page_size() {
        let body = "<ListBucketResult><KeyCount>0</KeyCount><IsTruncated>false</IsTruncated></ListBucketResult>";
        let client = S3Client::new(MockFetcher::new([FetchResponse::new(StatusCode::OK, body)]))
            .with_page_size(Some(2));

        let page = client.list_objects("my-bucket", "us-east-1", None).await.unwrap();

        assert!(page.records.is_empty());
        assert!(page.is_last());
        assert_eq!(
            client.fetcher.requests()[0].url.query(),
            Some("list-type=2&max-keys=2")
        );
    }
}
