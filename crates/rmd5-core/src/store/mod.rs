//! Object-store abstraction: object descriptor, fetch capabilities, and
//! transport-level errors.
//!
//! The hashing pipeline consumes exactly two capabilities from a store
//! client: look up the total object size, and fetch one byte range. Auth,
//! retries, and timeouts live behind this trait, not in the pipeline.

mod http;

pub use http::HttpStore;

use std::fmt;

/// Identifies a remote object: container (bucket) plus key within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Capabilities the pipeline needs from a store client. Implementations
/// must be safe to share across concurrent fetch workers.
pub trait ObjectStore: Send + Sync {
    /// Total object size in bytes.
    fn head_size(&self, object: &ObjectRef) -> Result<u64, StoreError>;

    /// Raw bytes for one range. `range_spec` uses HTTP byte-range syntax,
    /// `bytes=<start>-<end>` with an inclusive end.
    fn fetch_range(&self, object: &ObjectRef, range_spec: &str) -> Result<Vec<u8>, StoreError>;
}

/// Error from a single store call (curl failure, HTTP error, or a payload
/// that does not match the requested range).
#[derive(Debug)]
pub enum StoreError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
    /// HEAD response carried no usable `Content-Length`.
    MissingContentLength,
    /// Response body length did not match the requested range (e.g. the
    /// server ignored `Range` and sent the whole object).
    ShortRead { expected: u64, received: u64 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Curl(e) => write!(f, "{}", e),
            StoreError::Http(code) => write!(f, "HTTP {}", code),
            StoreError::MissingContentLength => write!(f, "response missing Content-Length"),
            StoreError::ShortRead { expected, received } => {
                write!(f, "range mismatch: expected {} bytes, got {}", expected, received)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Curl(e) => Some(e),
            StoreError::Http(_) | StoreError::MissingContentLength | StoreError::ShortRead { .. } => {
                None
            }
        }
    }
}
