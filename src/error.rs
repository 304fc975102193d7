//! Error types for S3 actions

use bytes::Bytes;
use http::StatusCode;

/// Result alias used across the library
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by bucket, listing and upload operations
///
/// Nothing is caught or retried internally; every variant reaches the caller
/// as produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The storage service answered with a non-success status
    #[error(transparent)]
    ServiceRequest(#[from] ServiceRequestError),

    /// The request never produced an HTTP response (connect, TLS, timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not have the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// A request URL could not be built from the given parameters
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No usable credentials were found
    #[error("credentials error: {0}")]
    Credentials(String),

    /// The request could not be signed
    #[error("signing error: {0}")]
    Signing(String),
}

impl Error {
    /// HTTP status of a service error, if this is one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ServiceRequest(e) => Some(e.status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// S3 error code (e.g. `NoSuchBucket`) of a service error, if present
    pub fn service_code(&self) -> Option<&str> {
        match self {
            Error::ServiceRequest(e) => e.code.as_deref(),
            _ => None,
        }
    }
}

/// A non-success response from the storage service, kept as received
#[derive(Debug, Clone, thiserror::Error)]
#[error("S3 request failed with status {status}{}", describe(.code, .message))]
pub struct ServiceRequestError {
    pub status: StatusCode,
    /// `Code` element of the S3 error document
    pub code: Option<String>,
    /// `Message` element of the S3 error document
    pub message: Option<String>,
    pub request_id: Option<String>,
    /// Raw response body
    pub body: Bytes,
}

fn describe(code: &Option<String>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(": {code}: {message}"),
        (Some(code), None) => format!(": {code}"),
        (None, Some(message)) => format!(": {message}"),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_error(code: Option<&str>, message: Option<&str>) -> ServiceRequestError {
        ServiceRequestError {
            status: StatusCode::CONFLICT,
            code: code.map(String::from),
            message: message.map(String::from),
            request_id: None,
            body: Bytes::new(),
        }
    }

    #[test]
    fn test_service_error_display_with_code_and_message() {
        let err = service_error(Some("BucketAlreadyExists"), Some("The requested bucket name is not available"));
        assert_eq!(
            err.to_string(),
            "S3 request failed with status 409 Conflict: BucketAlreadyExists: The requested bucket name is not available"
        );
    }

    #[test]
    fn test_service_error_display_without_details() {
        let err = service_error(None, None);
        assert_eq!(err.to_string(), "S3 request failed with status 409 Conflict");
    }

    #[test]
    fn test_error_accessors() {
        let err = Error::from(service_error(Some("BucketAlreadyOwnedByYou"), None));
        assert_eq!(err.status(), Some(StatusCode::CONFLICT));
        assert_eq!(err.service_code(), Some("BucketAlreadyOwnedByYou"));

        let err = Error::MalformedResponse("missing IsTruncated".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.service_code(), None);
    }
}
