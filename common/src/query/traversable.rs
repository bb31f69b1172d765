//! Traversable over the effects a client actually meets.
//!
//! Without higher-kinded types there is one method per target effect. In each
//! of them `Loading` and `Left` are lifted into the effect unchanged and only
//! the `Right` value is run through the per-element computation.

use super::Query;

use std::future::Future;

impl<E, A> Query<E, A> {
    /// `None` from `f` makes the whole result `None`.
    pub fn traverse_option<B>(self, f: impl FnOnce(A) -> Option<B>) -> Option<Query<E, B>> {
        self.fold(
            || Some(Query::loading()),
            |error| Some(Query::left(error)),
            |value| f(value).map(Query::right),
        )
    }

    pub fn traverse_result<B, X>(self, f: impl FnOnce(A) -> Result<B, X>) -> Result<Query<E, B>, X> {
        self.fold(
            || Ok(Query::loading()),
            |error| Ok(Query::left(error)),
            |value| f(value).map(Query::right),
        )
    }

    /// Runs `f` only for a `Right`; other states resolve immediately.
    pub async fn traverse_future<B, Fut>(self, f: impl FnOnce(A) -> Fut) -> Query<E, B>
    where
        Fut: Future<Output = B>,
    {
        match self.map(f) {
            Query::Right(pending) => Query::Right(pending.await),
            Query::Left(error) => Query::Left(error),
            Query::Loading => Query::Loading,
        }
    }
}

impl<E, A> Query<E, Option<A>> {
    pub fn sequence_option(self) -> Option<Query<E, A>> {
        self.traverse_option(|value| value)
    }
}

impl<E, A, X> Query<E, Result<A, X>> {
    pub fn sequence_result(self) -> Result<Query<E, A>, X> {
        self.traverse_result(|value| value)
    }
}

impl<E, Fut: Future> Query<E, Fut> {
    pub async fn sequence_future(self) -> Query<E, Fut::Output> {
        self.traverse_future(|pending| pending).await
    }
}
