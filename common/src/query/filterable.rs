//! Filterable and Witherable.
//!
//! A `Right` that is filtered out becomes `Left(monoid.empty())`; `Loading`
//! and an existing `Left` are never touched. Partitions split on
//! `Result`: `Err` goes to the `left` side, `Ok` to the `right` side.

use super::Query;
use crate::semigroup::Monoid;

use std::future::Future;

/// Outcome of a partition: the rejected side and the accepted side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Separated<L, R> {
    pub left: L,
    pub right: R,
}

impl<E, A> Query<E, A> {
    pub fn filter<M>(self, monoid: M, predicate: impl FnOnce(&A) -> bool) -> Query<E, A>
    where
        M: Monoid<E>,
    {
        self.chain(|value| {
            if predicate(&value) {
                Query::right(value)
            } else {
                Query::left(monoid.empty())
            }
        })
    }

    pub fn filter_map<B, M>(self, monoid: M, f: impl FnOnce(A) -> Option<B>) -> Query<E, B>
    where
        M: Monoid<E>,
    {
        self.map(f).compact(monoid)
    }

    /// `right` keeps values satisfying `predicate`, `left` keeps the rest.
    pub fn partition<M>(
        self,
        monoid: M,
        predicate: impl FnOnce(&A) -> bool,
    ) -> Separated<Query<E, A>, Query<E, A>>
    where
        M: Monoid<E>,
        E: Clone,
    {
        self.partition_map(monoid, |value| if predicate(&value) { Ok(value) } else { Err(value) })
    }

    pub fn partition_map<B, C, M>(
        self,
        monoid: M,
        f: impl FnOnce(A) -> Result<C, B>,
    ) -> Separated<Query<E, B>, Query<E, C>>
    where
        M: Monoid<E>,
        E: Clone,
    {
        self.map(f).separate(monoid)
    }

    /// Effectful [`Query::filter_map`]: `f` runs only for a `Right`.
    pub async fn wither<B, M, Fut>(self, monoid: M, f: impl FnOnce(A) -> Fut) -> Query<E, B>
    where
        M: Monoid<E>,
        Fut: Future<Output = Option<B>>,
    {
        self.traverse_future(f).await.compact(monoid)
    }

    /// Effectful [`Query::partition_map`]: `f` runs only for a `Right`.
    pub async fn wilt<B, C, M, Fut>(
        self,
        monoid: M,
        f: impl FnOnce(A) -> Fut,
    ) -> Separated<Query<E, B>, Query<E, C>>
    where
        M: Monoid<E>,
        E: Clone,
        Fut: Future<Output = Result<C, B>>,
    {
        self.traverse_future(f).await.separate(monoid)
    }
}

impl<E, A> Query<E, Option<A>> {
    pub fn compact<M>(self, monoid: M) -> Query<E, A>
    where
        M: Monoid<E>,
    {
        self.chain(|value| value.map_or_else(|| Query::left(monoid.empty()), Query::right))
    }
}

impl<E: Clone, B, C> Query<E, Result<C, B>> {
    pub fn separate<M>(self, monoid: M) -> Separated<Query<E, B>, Query<E, C>>
    where
        M: Monoid<E>,
    {
        self.fold(
            || Separated {
                left: Query::loading(),
                right: Query::loading(),
            },
            |error| Separated {
                left: Query::left(error.clone()),
                right: Query::left(error),
            },
            |value| match value {
                Ok(accepted) => Separated {
                    left: Query::left(monoid.empty()),
                    right: Query::right(accepted),
                },
                Err(rejected) => Separated {
                    left: Query::right(rejected),
                    right: Query::left(monoid.empty()),
                },
            },
        )
    }
}
