//! Tests for the five-state resource type.
//!
//! Verifies:
//! - Concrete combinator scenarios
//! - Fold totality (exactly one handler runs)
//! - The request lifecycle table driven by `reduce`
//! - Boundary conversions and the JSON representation

use std::cell::Cell;

use refreshable_data::{
    apply, both, failure, lift, pending, success, EitherOrBoth, Event, RemoteData, Resource,
    ResourceError, StateKind, Transition,
};
use serde_json::json;

type R = Resource<i32, i32>;

fn double(n: i32) -> i32 {
    n * 2
}

// ═══════════════════════════════════════════════════════════════
// Combinator scenarios
// ═══════════════════════════════════════════════════════════════

#[test]
fn map_doubles_success() {
    assert_eq!(R::success(2, false).map(double), R::success(4, false));
}

#[test]
fn map_leaves_failure_alone() {
    assert_eq!(R::failure(2, false).map(double), R::failure(2, false));
}

#[test]
fn chain_to_success_and_failure() {
    assert_eq!(
        R::success(1, false).chain(|n| R::success(n * 2, false)),
        R::success(2, false)
    );
    assert_eq!(
        R::success(1, false).chain(|_| R::failure(9, false)),
        R::failure(9, false)
    );
}

#[test]
fn chain_takes_continuation_refreshing() {
    let r = R::success(1, true).chain(|n| R::success(n, false));
    assert!(!r.is_refreshing(), "Continuation flag must win");
}

#[test]
fn apply_function_to_argument() {
    let f = Resource::<i32, fn(i32) -> i32>::success(double, false);
    assert_eq!(apply(f, R::success(2, false)), R::success(4, false));
    assert_eq!(apply(f, R::failure(2, false)), R::failure(2, false));
}

#[test]
fn apply_pending_dominates_absent() {
    let f = Resource::<i32, fn(i32) -> i32>::Absent;
    assert_eq!(apply(f, R::pending()), R::pending());
    let f = Resource::<i32, fn(i32) -> i32>::Pending;
    assert_eq!(apply(f, R::absent()), R::pending());
    assert_eq!(apply(f, R::success(1, true)), R::pending());
}

#[test]
fn apply_keeps_error_next_to_computed_value() {
    let f = Resource::<i32, fn(i32) -> i32>::success(double, true);
    assert_eq!(apply(f, R::both(7, 2, false)), R::both(7, 4, true));
    let f = Resource::<i32, fn(i32) -> i32>::both(5, double, false);
    assert_eq!(apply(f, R::both(7, 2, false)), R::both(5, 4, false));
    assert_eq!(apply(f, R::failure(7, false)), R::failure(5, false));
}

#[test]
fn apply_ors_refreshing() {
    let f = Resource::<i32, fn(i32) -> i32>::success(double, false);
    assert!(apply(f, R::success(1, true)).is_refreshing());
    let f = Resource::<i32, fn(i32) -> i32>::success(double, true);
    assert!(apply(f, R::success(1, false)).is_refreshing());
    assert!(apply(f, R::failure(1, false)).is_refreshing());
}

#[test]
fn zip_pairs_values() {
    let zipped = R::success(1, false).zip(Resource::<i32, &str>::success("x", true));
    assert_eq!(zipped, Resource::success((1, "x"), true));
}

#[test]
fn lift_maps_every_shape() {
    let lifted = lift(double);
    assert_eq!(lifted(R::both(1, 3, true)), R::both(1, 6, true));
    assert_eq!(lifted(R::pending()), R::pending());
}

#[test]
fn free_constructors_match_associated_ones() {
    assert_eq!(pending::<i32, i32>(), R::Pending);
    assert_eq!(failure::<i32, i32>(1, true), R::failure(1, true));
    assert_eq!(success::<i32, i32>(1, true), R::success(1, true));
    assert_eq!(both::<i32, i32>(1, 2, false), R::both(1, 2, false));
}

// ═══════════════════════════════════════════════════════════════
// Fold totality
// ═══════════════════════════════════════════════════════════════

#[test]
fn fold_both_sums_error_length_and_value() {
    let r: Resource<&str, usize> = Resource::both("abc", 3, false);
    let n = r.fold(|| 0, || 0, |_, _| 0, |_, _| 0, |e, a, _| e.len() + a);
    assert_eq!(n, 6);
}

#[test]
fn fold_invokes_exactly_one_handler() {
    let cases = [
        (R::absent(), 0),
        (R::pending(), 1),
        (R::failure(1, true), 2),
        (R::success(1, false), 3),
        (R::both(1, 1, true), 4),
    ];

    for (state, expected) in cases {
        let calls: [Cell<u32>; 5] = Default::default();
        state.fold(
            || calls[0].set(calls[0].get() + 1),
            || calls[1].set(calls[1].get() + 1),
            |_, _| calls[2].set(calls[2].get() + 1),
            |_, _| calls[3].set(calls[3].get() + 1),
            |_, _, _| calls[4].set(calls[4].get() + 1),
        );
        for (i, c) in calls.iter().enumerate() {
            let want = u32::from(i == expected);
            assert_eq!(c.get(), want, "Handler {} for {:?}", i, state);
        }
    }
}

#[test]
fn fold_passes_refreshing_through() {
    let flag = R::both(0, 0, true).fold(|| false, || false, |_, r| r, |_, r| r, |_, _, r| r);
    assert!(flag);
}

// ═══════════════════════════════════════════════════════════════
// Lifecycle
// ═══════════════════════════════════════════════════════════════

#[test]
fn lifecycle_first_load() {
    let r = R::absent().reduce(Event::Request);
    assert_eq!(r, R::pending());
    let r = r.reduce(Event::Succeed { value: 10 });
    assert_eq!(r, R::success(10, false));
}

#[test]
fn lifecycle_refresh_then_fail_retains_value() {
    let r = R::success(10, false)
        .reduce(Event::Request)
        .reduce(Event::Fail { error: 500 });
    assert_eq!(r, R::both(500, 10, false));
}

#[test]
fn lifecycle_refresh_of_both() {
    let r = R::both(500, 10, false).reduce(Event::Request);
    assert_eq!(r, R::both(500, 10, true));
    let r = r.reduce(Event::Fail { error: 503 });
    assert_eq!(r, R::both(503, 10, false), "Newer error replaces older one");
    let r = r.reduce(Event::Request).reduce(Event::Succeed { value: 11 });
    assert_eq!(r, R::success(11, false));
}

#[test]
fn lifecycle_failure_without_value() {
    let r = R::pending().reduce(Event::Fail { error: 1 });
    assert_eq!(r, R::failure(1, false));
    let r = r.reduce(Event::Request);
    assert_eq!(r, R::failure(1, true));
    let r = r.reduce(Event::Fail { error: 2 });
    assert_eq!(r, R::failure(2, false));
}

#[test]
fn lifecycle_reset() {
    for r in [R::pending(), R::both(1, 2, true), R::success(1, true)] {
        assert_eq!(r.reduce(Event::Reset), R::absent());
    }
}

#[test]
fn custom_transition_ignores_failures() {
    let start_only_fresh: Transition<i32, i32> = Transition::new()
        .on_absent(R::pending)
        .on_success(|a, _| R::success(a, true));
    assert_eq!(R::absent().transition(&start_only_fresh), R::pending());
    assert_eq!(R::failure(3, false).transition(&start_only_fresh), R::failure(3, false));
    assert_eq!(R::success(3, false).transition(&start_only_fresh), R::success(3, true));
}

// ═══════════════════════════════════════════════════════════════
// Conversions
// ═══════════════════════════════════════════════════════════════

#[test]
fn from_two_sided_result() {
    assert_eq!(R::from(EitherOrBoth::Both(1, 2)), R::both(1, 2, false));
    assert_eq!(R::from(EitherOrBoth::Left(1)), R::failure(1, false));
    assert_eq!(R::from(EitherOrBoth::Right(2)), R::success(2, false));
}

#[test]
fn from_option_and_predicate() {
    assert_eq!(R::from_option(None, || 2), R::failure(2, false));
    assert_eq!(R::from_option(Some(1), || 2), R::success(1, false));

    let parse_direction = |s: &'static str| {
        Resource::from_predicate(s, |s| *s == "asc" || *s == "desc", |_| "failure")
    };
    assert_eq!(parse_direction("asc"), Resource::success("asc", false));
    assert_eq!(parse_direction("foo"), Resource::failure("failure", false));
}

#[test]
fn settled_round_trip_to_two_sided() {
    let these: Result<EitherOrBoth<i32, i32>, _> = R::both(1, 2, true).try_into();
    assert_eq!(these, Ok(EitherOrBoth::Both(1, 2)));
    assert_eq!(
        R::absent().settled(),
        Err(ResourceError::NotSettled(StateKind::Absent))
    );
    assert_eq!(
        ResourceError::NotSettled(StateKind::Pending).to_string(),
        "Resource not settled: state is pending"
    );
}

#[test]
fn remote_data_embeds_without_refreshing() {
    assert_eq!(R::from(RemoteData::success(1)), R::success(1, false));
    assert_eq!(R::from(RemoteData::failure(1)), R::failure(1, false));
    assert_eq!(R::from(RemoteData::Pending), R::pending());
}

// ═══════════════════════════════════════════════════════════════
// Serialization
// ═══════════════════════════════════════════════════════════════

#[test]
fn json_shape_is_tagged_by_state() {
    let r: Resource<String, i32> = Resource::both("late".into(), 1, true);
    assert_eq!(
        serde_json::to_value(&r).unwrap(),
        json!({"state": "both", "error": "late", "result": 1, "refreshing": true})
    );
    let absent: Resource<String, i32> = Resource::Absent;
    assert_eq!(serde_json::to_value(&absent).unwrap(), json!({"state": "absent"}));
}

#[test]
fn json_deserializes_states_and_events() {
    let r: Resource<String, i32> =
        serde_json::from_value(json!({"state": "success", "result": 3, "refreshing": false}))
            .unwrap();
    assert_eq!(r, Resource::success(3, false));

    let e: Event<String, i32> = serde_json::from_value(json!({"kind": "fail", "error": "x"})).unwrap();
    assert_eq!(e, Event::Fail { error: "x".to_string() });
    let e: Event<String, i32> = serde_json::from_value(json!({"kind": "request"})).unwrap();
    assert_eq!(e, Event::Request);
}
