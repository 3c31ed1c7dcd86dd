//! Range planning: split an object into fixed-size byte ranges.
//!
//! The returned order is the authoritative fold order for the digest,
//! independent of how the fetches later complete.

use crate::error::HashError;

/// A single planned range: byte interval [start, end) (half-open).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Start offset (inclusive).
    pub start: u64,
    /// End offset (exclusive).
    pub end: u64,
}

impl ByteRange {
    /// Length of this range in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// HTTP Range header value (inclusive end): `bytes=start-(end-1)`.
    pub fn range_header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end.saturating_sub(1))
    }
}

/// Builds the range plan for an object of `object_size` bytes.
///
/// Range count is `object_size / chunk_size` (floor). Every range spans
/// exactly `chunk_size` bytes except the last, which always runs to the
/// true end of the object and absorbs the division remainder (so it may
/// be up to `2 * chunk_size - 1` bytes long). Every byte of the object
/// is covered by exactly one range.
///
/// Fails with `HashError::Config` when `chunk_size` is zero or exceeds
/// the object size.
pub fn plan_ranges(object_size: u64, chunk_size: u64) -> Result<Vec<ByteRange>, HashError> {
    if chunk_size == 0 || chunk_size > object_size {
        return Err(HashError::Config {
            chunk_size,
            object_size,
        });
    }

    let count = object_size / chunk_size;
    let mut out = Vec::with_capacity(count as usize);
    for i in 0..count {
        let start = i * chunk_size;
        let end = if i + 1 == count {
            object_size
        } else {
            start + chunk_size
        };
        out.push(ByteRange { start, end });
    }
    Ok(out)
}
