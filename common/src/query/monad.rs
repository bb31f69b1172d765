//! Functor, Bifunctor, Applicative (both flavours), Alt, Monad and MonadThrow.
//!
//! The short-circuiting and the accumulating applicative share one type; the
//! call site picks the flavour: [`Query::ap`] keeps the first error,
//! [`Query::ap_validation`] merges both errors with a [`Semigroup`].

use super::Query;
use crate::semigroup::Semigroup;

impl<E, A> Query<E, A> {
    /// Applies `f` to a `Right`; `Loading` and `Left` pass through.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Query<E, B> {
        self.fold(Query::loading, Query::left, |value| Query::right(f(value)))
    }

    pub fn map_left<G>(self, f: impl FnOnce(E) -> G) -> Query<G, A> {
        self.fold(Query::loading, |error| Query::left(f(error)), Query::right)
    }

    pub fn bimap<G, B>(self, on_left: impl FnOnce(E) -> G, on_right: impl FnOnce(A) -> B) -> Query<G, B> {
        self.fold(
            Query::loading,
            |error| Query::left(on_left(error)),
            |value| Query::right(on_right(value)),
        )
    }

    /// Monadic bind. `Loading` and `Left` short-circuit.
    pub fn chain<B>(self, f: impl FnOnce(A) -> Query<E, B>) -> Query<E, B> {
        self.fold(Query::loading, Query::left, f)
    }

    /// Runs `f` for its outcome but keeps the original value on success.
    pub fn chain_first<B>(self, f: impl FnOnce(&A) -> Query<E, B>) -> Query<E, A> {
        self.chain(|value| f(&value).map(|_| value))
    }

    /// Recovers from a `Left`; `Loading` and `Right` pass through.
    pub fn or_else<G>(self, f: impl FnOnce(E) -> Query<G, A>) -> Query<G, A> {
        self.fold(Query::loading, f, Query::right)
    }

    /// MonadThrow: inject a failure from inside a chained computation.
    pub const fn throw_error(error: E) -> Self {
        Query::Left(error)
    }

    /// Keeps `self` unless it is a `Left`, in which case `that` is evaluated.
    pub fn alt(self, that: impl FnOnce() -> Query<E, A>) -> Query<E, A> {
        self.fold(Query::loading, |_| that(), Query::right)
    }

    /// Like [`Query::alt`], but two `Left`s are merged with `semigroup`.
    pub fn alt_validation<S>(self, semigroup: S, that: impl FnOnce() -> Query<E, A>) -> Query<E, A>
    where
        S: Semigroup<E>,
    {
        self.fold(
            Query::loading,
            |first| {
                that().fold(
                    Query::loading,
                    |second| Query::left(semigroup.concat(first, second)),
                    Query::right,
                )
            },
            Query::right,
        )
    }

    /// Short-circuiting product: the first `Left` wins, then `Loading`.
    pub fn zip<B>(self, other: Query<E, B>) -> Query<E, (A, B)> {
        self.combine(other, |first, _| first, |a, b| (a, b))
    }

    /// Accumulating product: two `Left`s are merged with `semigroup`.
    pub fn zip_validation<B, S>(self, semigroup: S, other: Query<E, B>) -> Query<E, (A, B)>
    where
        S: Semigroup<E>,
    {
        self.combine(other, |x, y| semigroup.concat(x, y), |a, b| (a, b))
    }

    /// Pairs two queries. A `Left` on either side beats `Loading`;
    /// `on_both_left` decides what two `Left`s become.
    ///
    /// The match lists every pair of states so a new state cannot slip through.
    fn combine<B, C>(
        self,
        other: Query<E, B>,
        on_both_left: impl FnOnce(E, E) -> E,
        on_both_right: impl FnOnce(A, B) -> C,
    ) -> Query<E, C> {
        match (self, other) {
            (Query::Left(x), Query::Left(y)) => Query::Left(on_both_left(x, y)),
            (Query::Left(x), Query::Loading | Query::Right(_)) => Query::Left(x),
            (Query::Loading | Query::Right(_), Query::Left(y)) => Query::Left(y),
            (Query::Loading, Query::Loading | Query::Right(_)) | (Query::Right(_), Query::Loading) => {
                Query::Loading
            }
            (Query::Right(a), Query::Right(b)) => Query::Right(on_both_right(a, b)),
        }
    }
}

impl<E, F> Query<E, F> {
    /// Short-circuiting apply. If either side is `Left`, the first `Left`
    /// is returned; otherwise any `Loading` makes the result `Loading`.
    pub fn ap<A, B>(self, argument: Query<E, A>) -> Query<E, B>
    where
        F: FnOnce(A) -> B,
    {
        self.combine(argument, |first, _| first, |f, value| f(value))
    }

    /// Validation apply. When both sides are `Left`, the errors are merged
    /// with `semigroup` (function side first) instead of dropping one.
    pub fn ap_validation<A, B, S>(self, semigroup: S, argument: Query<E, A>) -> Query<E, B>
    where
        F: FnOnce(A) -> B,
        S: Semigroup<E>,
    {
        self.combine(argument, |x, y| semigroup.concat(x, y), |f, value| f(value))
    }
}

impl<E, A> Query<E, Query<E, A>> {
    pub fn flatten(self) -> Query<E, A> {
        self.chain(|inner| inner)
    }
}
