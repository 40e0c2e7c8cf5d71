//! Bounded-concurrency fan-out.
//!
//! The one backpressure mechanism in this workspace: per-issue relation
//! fetches run through [`map_bounded`] so the remote API never sees more
//! than `limit` simultaneous requests.

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::{OpsError, Result};

/// Apply `worker` to every item with at most `limit` workers in flight.
///
/// Output index `i` always holds the transform of input index `i`, regardless
/// of completion order. Workers start in input order; whenever one completes
/// the next pending item starts, keeping the in-flight count at `limit` until
/// fewer than `limit` items remain.
///
/// The first worker failure aborts the whole operation; results of workers
/// still in flight are discarded. An empty input yields an empty output
/// without invoking `worker`.
pub async fn map_bounded<T, R, F, Fut>(items: Vec<T>, limit: usize, worker: F) -> Result<Vec<R>>
where
    F: Fn(T, usize) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    if limit == 0 {
        return Err(OpsError::InvalidConcurrency);
    }
    // `buffered` (not `buffer_unordered`) keeps output positionally aligned
    // with input while capping in-flight futures at `limit`.
    stream::iter(items.into_iter().enumerate())
        .map(|(index, item)| worker(item, index))
        .buffered(limit)
        .try_collect()
        .await
}
