// Bifunctor, eliminators, conversions and nested chaining for Query, checked in every state.

use crate::{Joined, Query};

use std::cell::Cell;

type Q = Query<String, i32>;

fn states() -> [Q; 3] {
    [Query::loading(), Query::left("boom".to_string()), Query::right(2)]
}

// ============================================
// BIFUNCTOR
// ============================================

/// **VALUE**: Verifies `map_left` rewrites only the error channel.
///
/// **WHY THIS MATTERS**: Views translate transport errors into their own error type without
/// disturbing data or the spinner state.
///
/// **BUG THIS CATCHES**: Would catch `map_left` touching a `Right` or turning `Loading` into `Left`.
#[test]
fn given_each_state_when_left_mapped_then_only_left_changes() {
    // GIVEN / WHEN
    let mapped: Vec<Query<usize, i32>> = states().into_iter().map(|q| q.map_left(|e| e.len())).collect();

    // THEN
    assert_eq!(mapped, vec![Query::loading(), Query::left(4), Query::right(2)]);
}

#[test]
fn given_each_state_when_bimapped_then_matching_side_changes() {
    let calls = Cell::new(0);

    let mapped: Vec<Query<usize, String>> = states()
        .into_iter()
        .map(|q| {
            q.bimap(
                |e| {
                    calls.set(calls.get() + 1);
                    e.len()
                },
                |a| {
                    calls.set(calls.get() + 1);
                    format!("#{a}")
                },
            )
        })
        .collect();

    assert_eq!(
        mapped,
        vec![Query::loading(), Query::left(4), Query::right("#2".to_string())]
    );
    assert_eq!(calls.get(), 2, "Loading must not run either function");
}

// ============================================
// ELIMINATORS & PREDICATES
// ============================================

/// **VALUE**: Verifies `get_or_else` falls back for both `Loading` and `Left`, and only then.
///
/// **WHY THIS MATTERS**: Placeholder rendering relies on the fallback being lazy.
///
/// **BUG THIS CATCHES**: Would catch the fallback running for a `Right`.
#[test]
fn given_each_state_when_get_or_else_then_fallback_only_for_non_right() {
    // GIVEN
    let fallbacks = Cell::new(0);

    // WHEN
    let values: Vec<i32> = states()
        .into_iter()
        .map(|q| {
            q.get_or_else(|| {
                fallbacks.set(fallbacks.get() + 1);
                -1
            })
        })
        .collect();

    // THEN
    assert_eq!(values, vec![-1, -1, 2]);
    assert_eq!(fallbacks.get(), 2);
}

#[test]
fn given_each_state_when_exists_checked_then_true_only_for_matching_right() {
    let [loading, left, right] = states();

    assert!(!loading.exists(|_| true));
    assert!(!left.exists(|_| true));
    assert!(right.exists(|v| *v == 2));
    assert!(!right.exists(|v| *v > 2));
}

// ============================================
// CONVERSIONS
// ============================================

#[test]
fn given_option_when_converted_then_none_becomes_left() {
    let some: Q = Query::from_option(Some(5), || "missing".to_string());
    let none: Q = Query::from_option(None, || "missing".to_string());

    assert_eq!(some, Query::right(5));
    assert_eq!(none, Query::left("missing".to_string()));
}

/// **VALUE**: Verifies `into_result` maps every state and substitutes `Loading`.
///
/// **WHY THIS MATTERS**: Code at the edge of the async world (CLI exit codes, tests) needs a
/// plain `Result` and must decide what an unsettled query means.
///
/// **BUG THIS CATCHES**: Would catch `Loading` silently becoming `Ok`.
#[test]
fn given_each_state_when_into_result_then_loading_uses_substitute() {
    let results: Vec<Result<i32, String>> = states()
        .into_iter()
        .map(|q| q.into_result(|| "still loading".to_string()))
        .collect();

    assert_eq!(
        results,
        vec![
            Err("still loading".to_string()),
            Err("boom".to_string()),
            Ok(2)
        ]
    );
}

#[test]
fn given_result_when_converted_then_settled_query() {
    let ok: Q = Query::from(Ok::<i32, String>(1));
    let err: Q = Err::<i32, String>("bad".to_string()).into();

    assert_eq!(ok, Query::right(1));
    assert_eq!(err, Query::left("bad".to_string()));
    assert!(ok.is_settled() && err.is_settled());
}

// ============================================
// PRODUCTS & NESTING
// ============================================

/// **VALUE**: Verifies `zip_validation` merges two `Left`s left-to-right and otherwise behaves
/// like `zip`.
///
/// **WHY THIS MATTERS**: A page loading two resources shows both failures together.
///
/// **BUG THIS CATCHES**: Would catch merged errors in the wrong order, or `Loading` winning
/// over a known failure.
#[test]
fn given_state_pairs_when_zipped_with_validation_then_lefts_merge_in_order() {
    let joined = Joined("; ");
    let left = |m: &str| Query::<String, i32>::left(m.to_string());

    // GIVEN / WHEN / THEN: both Left
    assert_eq!(
        left("first").zip_validation(&joined, left("second")),
        Query::left("first; second".to_string())
    );

    // One Left beats Loading and Right on either side
    assert_eq!(
        left("only").zip_validation(&joined, Query::<String, i32>::loading()),
        Query::left("only".to_string())
    );
    assert_eq!(
        Query::<String, i32>::right(1).zip_validation(&joined, left("only")),
        Query::left("only".to_string())
    );

    // Loading without any Left stays Loading
    assert_eq!(
        Query::<String, i32>::right(1).zip_validation(&joined, Query::<String, i32>::loading()),
        Query::loading()
    );

    // Both Right
    assert_eq!(
        Query::<String, i32>::right(1).zip_validation(&joined, Query::right("a")),
        Query::right((1, "a"))
    );
}

#[test]
fn given_nested_states_when_flattened_then_outer_state_wins_first() {
    let outer_loading: Query<String, Q> = Query::loading();
    let outer_left: Query<String, Q> = Query::left("outer".to_string());

    assert_eq!(outer_loading.flatten(), Query::loading());
    assert_eq!(outer_left.flatten(), Query::left("outer".to_string()));

    let inner: Vec<Q> = states()
        .into_iter()
        .map(|q| Query::<String, Q>::right(q).flatten())
        .collect();
    assert_eq!(inner, states().to_vec());
}

/// **VALUE**: Verifies `chain_first` keeps the original value but adopts the side effect's failure.
///
/// **WHY THIS MATTERS**: Validation steps that return nothing useful must still be able to fail
/// the pipeline.
///
/// **BUG THIS CATCHES**: Would catch the side computation's value replacing the original, or its
/// `Left`/`Loading` being ignored.
#[test]
fn given_side_computation_when_chain_first_then_original_value_kept() {
    let check = |outcome: Query<String, ()>| move |_: &i32| outcome.clone();

    assert_eq!(Q::right(2).chain_first(check(Query::right(()))), Query::right(2));
    assert_eq!(
        Q::right(2).chain_first(check(Query::left("invalid".to_string()))),
        Query::left("invalid".to_string())
    );
    assert_eq!(Q::right(2).chain_first(check(Query::loading())), Query::loading());

    let runs = Cell::new(0);
    let skipped = Q::left("boom".to_string()).chain_first(|_| {
        runs.set(runs.get() + 1);
        Query::<String, ()>::right(())
    });
    assert_eq!(skipped, Query::left("boom".to_string()));
    assert_eq!(Q::loading().chain_first(|_| Query::<String, ()>::right(())), Query::loading());
    assert_eq!(runs.get(), 0);
}
