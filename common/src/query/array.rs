//! Short-circuiting traversal over ordered sequences.
//!
//! Traversal goes left to right and stops at the first element that is not a
//! `Right`; that element's state (`Loading` or its `Left`) is the result.
//! Successes seen before the stop are discarded.

use super::Query;

pub fn traverse_array_with_index<E, A, B, I>(
    items: I,
    mut f: impl FnMut(usize, A) -> Query<E, B>,
) -> Query<E, Vec<B>>
where
    I: IntoIterator<Item = A>,
{
    let items = items.into_iter();
    let mut values = Vec::with_capacity(items.size_hint().0);

    for (index, item) in items.enumerate() {
        let step = f(index, item).fold(
            || Err(Query::loading()),
            |error| Err(Query::left(error)),
            Ok,
        );
        match step {
            Ok(value) => values.push(value),
            Err(stopped) => return stopped,
        }
    }

    Query::right(values)
}

pub fn traverse_array<E, A, B, I>(items: I, mut f: impl FnMut(A) -> Query<E, B>) -> Query<E, Vec<B>>
where
    I: IntoIterator<Item = A>,
{
    traverse_array_with_index(items, |_, item| f(item))
}

pub fn sequence_array<E, A, I>(queries: I) -> Query<E, Vec<A>>
where
    I: IntoIterator<Item = Query<E, A>>,
{
    traverse_array(queries, |query| query)
}

/// Collecting behaves like [`sequence_array`], mirroring `Result`'s `collect`.
impl<E, A> FromIterator<Query<E, A>> for Query<E, Vec<A>> {
    fn from_iter<I: IntoIterator<Item = Query<E, A>>>(iter: I) -> Self {
        sequence_array(iter)
    }
}
