//! Lazy relation values.
//!
//! A related entity on an issue can arrive in one of four shapes: already
//! present inline, known only by id (an extra fetch away), already in flight,
//! or missing entirely. [`Relation`] makes the shape explicit as a sum type
//! so callers never duck-type against "is this a future or a value".

use std::future::Future;

use futures::future::BoxFuture;

use crate::error::Result;

/// A relation in one of its four representational shapes.
///
/// Resolution consumes the relation — a relation is resolved at most once.
pub enum Relation<T> {
    /// No relation present.
    Absent,
    /// Already-concrete value, returned unchanged.
    Value(T),
    /// A fetch that has already been started.
    Deferred(BoxFuture<'static, Result<Option<T>>>),
    /// A fetch that starts when invoked.
    Thunk(Box<dyn FnOnce() -> BoxFuture<'static, Result<Option<T>>> + Send>),
}

impl<T> Relation<T> {
    /// Wrap an in-flight fetch.
    pub fn deferred<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = Result<Option<T>>> + Send + 'static,
    {
        Relation::Deferred(Box::pin(fut))
    }

    /// Wrap a fetch that only starts on resolution.
    pub fn thunk<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Option<T>>> + Send + 'static,
    {
        Relation::Thunk(Box::new(move || Box::pin(f())))
    }

    /// Reduce to a concrete value or `None`.
    ///
    /// An absent relation and a fetch that comes back empty are both `None`;
    /// callers cannot distinguish the two. Fetch errors propagate verbatim —
    /// soft-fail defaults like `"(No State)"` belong at the call site.
    pub async fn resolve(self) -> Result<Option<T>> {
        match self {
            Relation::Absent => Ok(None),
            Relation::Value(v) => Ok(Some(v)),
            Relation::Deferred(fut) => fut.await,
            Relation::Thunk(f) => f().await,
        }
    }
}

impl<T> From<Option<T>> for Relation<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Relation::Value(v),
            None => Relation::Absent,
        }
    }
}
