//! Render-compatible state of a fetch or mutation.
//!
//! A [`Query`] is either still in flight ([`Query::Loading`]), settled with a
//! domain error ([`Query::Left`]), or settled with a value ([`Query::Right`]).
//! It is an inert value: inspecting, folding, or combining queries never runs
//! an effect, so a view can hold one and re-render on every transition.
//!
//! The operation families live in submodules:
//!
//! - [`monad`]: functor, bifunctor, both applicatives, alternative, monad, throw
//! - [`foldable`]: treat the query as a container of at most one value
//! - [`traversable`]: lift a per-value effect (`Option`, `Result`, futures)
//! - [`filterable`]: filter, partition, compact, separate, wither, wilt
//! - [`array`]: short-circuiting traversal over sequences
//!
//! Every derived operation goes through [`Query::fold`]. Adding a state means
//! changing `fold` and following the compiler from there.

pub mod array;
pub mod filterable;
pub mod foldable;
pub mod monad;
pub mod traversable;

pub use array::{sequence_array, traverse_array, traverse_array_with_index};
pub use filterable::Separated;

/// Three-state result of an asynchronous operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query<E, A> {
    /// In flight, or not yet started.
    Loading,
    /// Settled with a domain error.
    Left(E),
    /// Settled with a success value.
    Right(A),
}

impl<E, A> Default for Query<E, A> {
    fn default() -> Self {
        Query::Loading
    }
}

impl<E, A> Query<E, A> {
    pub const fn loading() -> Self {
        Query::Loading
    }

    pub const fn left(error: E) -> Self {
        Query::Left(error)
    }

    pub const fn right(value: A) -> Self {
        Query::Right(value)
    }

    /// Applicative `pure`; same as [`Query::right`].
    pub const fn of(value: A) -> Self {
        Query::Right(value)
    }

    /// Total eliminator. Exactly one branch runs, exactly once.
    pub fn fold<B>(
        self,
        on_loading: impl FnOnce() -> B,
        on_left: impl FnOnce(E) -> B,
        on_right: impl FnOnce(A) -> B,
    ) -> B {
        match self {
            Query::Loading => on_loading(),
            Query::Left(error) => on_left(error),
            Query::Right(value) => on_right(value),
        }
    }

    /// Borrowing view, so the eliminator can be used without consuming `self`.
    pub fn as_ref(&self) -> Query<&E, &A> {
        match self {
            Query::Loading => Query::Loading,
            Query::Left(error) => Query::Left(error),
            Query::Right(value) => Query::Right(value),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.as_ref().fold(|| true, |_| false, |_| false)
    }

    pub fn is_left(&self) -> bool {
        self.as_ref().fold(|| false, |_| true, |_| false)
    }

    pub fn is_right(&self) -> bool {
        self.as_ref().fold(|| false, |_| false, |_| true)
    }

    /// A settled query is no longer [`Query::Loading`].
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn get_or_else(self, on_missing: impl FnOnce() -> A) -> A {
        self.to_option().unwrap_or_else(on_missing)
    }

    /// `true` only for a `Right` whose value satisfies `predicate`.
    pub fn exists(&self, predicate: impl FnOnce(&A) -> bool) -> bool {
        self.as_ref().fold(|| false, |_| false, predicate)
    }

    pub fn to_option(self) -> Option<A> {
        self.fold(|| None, |_| None, Some)
    }

    pub fn left_value(self) -> Option<E> {
        self.fold(|| None, Some, |_| None)
    }

    /// `Some(value)` becomes `Right`, `None` becomes `Left(on_none())`.
    pub fn from_option(option: Option<A>, on_none: impl FnOnce() -> E) -> Self {
        option.map_or_else(|| Query::Left(on_none()), Query::Right)
    }

    /// Settled outcome as a `Result`, with `on_loading` standing in for a
    /// query that has not settled yet.
    pub fn into_result(self, on_loading: impl FnOnce() -> E) -> Result<A, E> {
        self.fold(|| Err(on_loading()), Err, Ok)
    }
}

impl<E, A> From<Result<A, E>> for Query<E, A> {
    fn from(result: Result<A, E>) -> Self {
        result.map_or_else(Query::Left, Query::Right)
    }
}
