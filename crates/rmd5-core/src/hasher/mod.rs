//! Concurrent fetch-and-fold pipeline.
//!
//! Plans the ranges, fans out one fetch per range, waits for all of them,
//! then folds the payloads into a single MD5 in range order. Folding by
//! completion order would silently produce a wrong digest, so the fold
//! only ever walks the slot vector, never the arrival stream.

mod fetch;

use crate::error::HashError;
use crate::planner::plan_ranges;
use crate::store::{ObjectRef, ObjectStore};

/// Computes the MD5 of a remote object by fetching `chunk_size`-byte
/// ranges concurrently, returning the lowercase hex digest.
///
/// `max_concurrent` caps the number of in-flight fetches; `None` runs one
/// worker per range. The digest is identical either way. The operation is
/// all-or-nothing: any failed fetch fails the whole run with the index of
/// the failing range, and nothing is retried here.
pub fn compute_md5<S: ObjectStore + ?Sized>(
    store: &S,
    object: &ObjectRef,
    chunk_size: u64,
    max_concurrent: Option<usize>,
) -> Result<String, HashError> {
    let object_size = store.head_size(object).map_err(HashError::SizeLookup)?;
    tracing::info!("object {} is {} bytes", object, object_size);

    let ranges = plan_ranges(object_size, chunk_size)?;
    tracing::info!("planned {} ranges of {} bytes", ranges.len(), chunk_size);

    let results = fetch::fetch_all(store, object, &ranges, max_concurrent);

    // Every fetch has resolved; surface the lowest-indexed failure, if any.
    let mut payloads = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(bytes) => payloads.push(bytes),
            Err(source) => return Err(HashError::Fetch { index, source }),
        }
    }

    // Fold strictly in range order. The accumulator is created after the
    // fan-in barrier and never shared.
    let mut context = md5::Context::new();
    for payload in &payloads {
        context.consume(payload);
    }
    Ok(hex::encode(context.finalize().0))
}
