//! Foldable: a query is a container of at most one element.
//!
//! Only `Right` holds an element; `Loading` and `Left` fold like an empty container.

use super::Query;
use crate::semigroup::Monoid;

impl<E, A> Query<E, A> {
    pub fn reduce<B>(self, initial: B, f: impl FnOnce(B, A) -> B) -> B {
        match self.to_option() {
            Some(value) => f(initial, value),
            None => initial,
        }
    }

    pub fn reduce_right<B>(self, initial: B, f: impl FnOnce(A, B) -> B) -> B {
        match self.to_option() {
            Some(value) => f(value, initial),
            None => initial,
        }
    }

    pub fn fold_map<M, T>(self, monoid: M, f: impl FnOnce(A) -> T) -> T
    where
        M: Monoid<T>,
    {
        let empty = monoid.empty();
        self.reduce(empty, |accumulated, value| monoid.concat(accumulated, f(value)))
    }

    /// Number of contained elements: `1` for `Right`, otherwise `0`.
    pub fn len(&self) -> usize {
        self.as_ref().fold(|| 0, |_| 0, |_| 1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::option::IntoIter<&A> {
        self.as_ref().to_option().into_iter()
    }
}

impl<E, A> IntoIterator for Query<E, A> {
    type Item = A;
    type IntoIter = std::option::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.to_option().into_iter()
    }
}
