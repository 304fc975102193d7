//! Paginated object listing
//!
//! [`ObjectLister::list_page`] fetches exactly one ListObjectsV2 page. The
//! caller keeps the returned cursor and passes it back for the next page.
//! [`ObjectLister::pages`] and [`ObjectLister::records`] drive that loop as a
//! lazy stream: one fetch per advance, finishing after the last page, and
//! resumable from any cursor a previous page returned.

use async_stream::try_stream;
use futures::Stream;
use http::Method;

use crate::error::Result;
use crate::s3::endpoint::Endpoint;
use crate::s3::fetch::{FetchRequest, Fetcher};
use crate::s3::types::{Continuation, ListPage, ObjectRecord};
use crate::s3::xml::ListBucketResult;

/// Lists a bucket's objects one page per request
///
/// Holds no state between calls; all progress lives in the cursor.
#[derive(Debug, Clone)]
pub struct ObjectLister<F> {
    fetcher: F,
    endpoint: Endpoint,
    page_size: Option<u32>,
}

impl<F: Fetcher> ObjectLister<F> {
    pub fn new(fetcher: F, endpoint: Endpoint) -> Self {
        Self {
            fetcher,
            endpoint,
            page_size: None,
        }
    }

    /// Ask the service for at most `page_size` keys per page
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Fetch one page, starting at `cursor` (or the beginning when `None`)
    pub async fn list_page(
        &self,
        bucket: &str,
        region: &str,
        cursor: Option<&Continuation>,
    ) -> Result<ListPage> {
        let url = self.endpoint.list_url(
            bucket,
            region,
            cursor.map(|c| c.continuation_token.as_str()),
            self.page_size,
        )?;

        let response = self
            .fetcher
            .fetch(FetchRequest::new(Method::GET, url, region))
            .await?
            .error_for_status()?;

        let page = ListBucketResult::parse(&response.body)?.into_page(bucket, region)?;

        tracing::info!(
            bucket,
            region,
            records = page.records.len(),
            truncated = page.next.is_some(),
            "listed object page"
        );

        Ok(page)
    }

    /// Stream pages until the listing is complete
    ///
    /// A failed fetch is yielded as the stream's last item. Restart by calling
    /// again with the cursor of the last page received.
    pub fn pages<'a>(
        &'a self,
        bucket: &'a str,
        region: &'a str,
        start: Option<Continuation>,
    ) -> impl Stream<Item = Result<ListPage>> + 'a {
        try_stream! {
            let mut cursor = start;
            loop {
                let page = self.list_page(bucket, region, cursor.as_ref()).await?;
                let last = page.is_last();
                cursor = page.next.clone();
                yield page;
                if last {
                    break;
                }
            }
        }
    }

    /// Stream every record of the bucket, fetching pages as needed
    pub fn records<'a>(
        &'a self,
        bucket: &'a str,
        region: &'a str,
        start: Option<Continuation>,
    ) -> impl Stream<Item = Result<ObjectRecord>> + 'a {
        try_stream! {
            let mut cursor = start;
            loop {
                let page = self.list_page(bucket, region, cursor.as_ref()).await?;
                cursor = page.next;
                for record in page.records {
                    yield record;
                }
                if cursor.is_none() {
                    break;
                }
            }
        }
    }
}
