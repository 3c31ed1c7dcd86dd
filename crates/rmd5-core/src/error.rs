//! Error taxonomy for the hashing pipeline.
//!
//! All three variants surface directly to the caller of `compute_md5`;
//! nothing is retried or recovered internally, and no partial digest is
//! ever returned.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum HashError {
    /// Chunk size is zero or larger than the object. Caller must fix its
    /// inputs; never retried.
    #[error("invalid chunk size {chunk_size} for object of {object_size} bytes")]
    Config { chunk_size: u64, object_size: u64 },

    /// The size probe failed (object missing, access denied, transport error).
    #[error("size lookup failed")]
    SizeLookup(#[source] StoreError),

    /// A range fetch failed; carries the 0-based index of the failing range.
    /// When several fetches fail, the lowest index is reported.
    #[error("fetch for range {index} failed")]
    Fetch {
        index: usize,
        #[source]
        source: StoreError,
    },
}
