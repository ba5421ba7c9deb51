//! Refreshable Data - stale-while-revalidating resource states
//!
//! Models every observable state of an asynchronously produced value:
//! - `Resource`: five shapes (absent, pending, failure, success, and a
//!   retained value next to a newer error), each outcome flagged while a
//!   refresh is in flight
//! - `RemoteData`: the four-shape variant where a refresh overwrites the
//!   previous outcome
//! - A total eliminator (`fold`) and partial, identity-defaulting
//!   `Transition`s for event-driven updates
//! - Functor, bifunctor, applicative and monad combinators with lawful
//!   `refreshing` bookkeeping
//! - Conversions from `Option`, `Result` and two-sided `EitherOrBoth` results
//!
//! Everything here is a pure function over immutable values. Nothing in this
//! crate knows about time, request identity or cancellation.

pub mod combinators;
pub mod convert;
pub mod remote;
pub mod resource;
pub mod transition;

pub use combinators::{apply, lift, lift2};
pub use itertools::EitherOrBoth;
pub use remote::{RemoteData, RemoteTransition};
pub use resource::{Resource, StateKind};
pub use transition::{Event, Transition};

use thiserror::Error;

/// Errors from converting a resource into a plain outcome.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Resource not settled: state is {0}")]
    NotSettled(StateKind),
}

pub fn absent<E, A>() -> Resource<E, A> {
    Resource::Absent
}

pub fn pending<E, A>() -> Resource<E, A> {
    Resource::Pending
}

pub fn failure<E, A>(error: E, refreshing: bool) -> Resource<E, A> {
    Resource::failure(error, refreshing)
}

pub fn success<E, A>(result: A, refreshing: bool) -> Resource<E, A> {
    Resource::success(result, refreshing)
}

pub fn both<E, A>(error: E, result: A, refreshing: bool) -> Resource<E, A> {
    Resource::both(error, result, refreshing)
}
