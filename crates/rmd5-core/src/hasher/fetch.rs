//! Fan-out fetch: one worker per range, or a bounded pool consuming a
//! shared work queue. Either way the results come back slotted by range
//! index; arrival order is discarded at the channel.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use crate::planner::ByteRange;
use crate::store::{ObjectRef, ObjectStore, StoreError};

pub(super) type FetchResult = Result<Vec<u8>, StoreError>;

/// Fetches every planned range and returns the results indexed by range
/// position. When `max_concurrent` is `Some(n)`, at most `n` fetches are
/// in flight at once; `None` runs one worker per range.
pub(super) fn fetch_all<S: ObjectStore + ?Sized>(
    store: &S,
    object: &ObjectRef,
    ranges: &[ByteRange],
    max_concurrent: Option<usize>,
) -> Vec<FetchResult> {
    match max_concurrent {
        Some(max) => run_pool(store, object, ranges, max),
        None => run_unbounded(store, object, ranges),
    }
}

/// One worker thread per range (the reference fan-out behavior).
fn run_unbounded<S: ObjectStore + ?Sized>(
    store: &S,
    object: &ObjectRef,
    ranges: &[ByteRange],
) -> Vec<FetchResult> {
    let (tx, rx) = mpsc::channel();
    thread::scope(|scope| {
        for (index, range) in ranges.iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                let _ = tx.send((index, fetch_one(store, object, range, index)));
            });
        }
    });
    drop(tx);
    collect_slots(ranges.len(), rx)
}

/// Fixed pool of `max` workers popping `(index, range)` items off a shared
/// queue. Initiation still follows range order; only the in-flight count
/// changes.
fn run_pool<S: ObjectStore + ?Sized>(
    store: &S,
    object: &ObjectRef,
    ranges: &[ByteRange],
    max: usize,
) -> Vec<FetchResult> {
    let work: Mutex<VecDeque<(usize, &ByteRange)>> =
        Mutex::new(ranges.iter().enumerate().collect());
    let (tx, rx) = mpsc::channel();
    let workers = max.clamp(1, ranges.len().max(1));
    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let work = &work;
            scope.spawn(move || loop {
                let item = work.lock().unwrap().pop_front();
                let (index, range) = match item {
                    Some(pair) => pair,
                    None => break,
                };
                let _ = tx.send((index, fetch_one(store, object, range, index)));
            });
        }
    });
    drop(tx);
    collect_slots(ranges.len(), rx)
}

fn fetch_one<S: ObjectStore + ?Sized>(
    store: &S,
    object: &ObjectRef,
    range: &ByteRange,
    index: usize,
) -> FetchResult {
    let spec = range.range_header_value();
    tracing::debug!("fetching range {} ({})", index, spec);
    let result = store.fetch_range(object, &spec);
    match &result {
        Ok(bytes) => tracing::debug!("fetched range {} ({} bytes)", index, bytes.len()),
        Err(e) => tracing::debug!("range {} failed: {}", index, e),
    }
    result
}

/// Drains the result channel into a slot vector indexed by range position.
/// Every worker sends exactly one result per popped range, so every slot
/// is filled once all senders hang up.
fn collect_slots(count: usize, rx: mpsc::Receiver<(usize, FetchResult)>) -> Vec<FetchResult> {
    let mut slots: Vec<Option<FetchResult>> = (0..count).map(|_| None).collect();
    for (index, result) in rx {
        slots[index] = Some(result);
    }
    slots
        .into_iter()
        .map(|slot| slot.expect("every range reports exactly one result"))
        .collect()
}
