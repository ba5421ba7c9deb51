//! Event-driven state updates.
//!
//! A [`Transition`] is a partial fold: handlers are registered only for the
//! shapes an event cares about, and every other shape is returned unchanged.
//! Transitions are reusable, so a reducer can build one per event kind and
//! apply it to each incoming state.
//!
//! [`Event`] and [`Resource::reduce`] cover the common request lifecycle:
//!
//! | from \ event | Request | Succeed(a) | Fail(e) | Reset |
//! |---|---|---|---|---|
//! | Absent | Pending | Success(a) | Failure(e) | Absent |
//! | Pending | Pending | Success(a) | Failure(e) | Absent |
//! | Failure(e) | Failure(e, refreshing) | Success(a) | Failure(e') | Absent |
//! | Success(x) | Success(x, refreshing) | Success(a) | Both(e, x) | Absent |
//! | Both(e, x) | Both(e, x, refreshing) | Success(a) | Both(e', x) | Absent |
//!
//! A failed refresh of a held value is the only lifecycle path into `Both`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

type NullaryHandler<E, A> = Box<dyn Fn() -> Resource<E, A> + Send + Sync>;
type FailureHandler<E, A> = Box<dyn Fn(E, bool) -> Resource<E, A> + Send + Sync>;
type SuccessHandler<E, A> = Box<dyn Fn(A, bool) -> Resource<E, A> + Send + Sync>;
type BothHandler<E, A> = Box<dyn Fn(E, A, bool) -> Resource<E, A> + Send + Sync>;

/// A fold whose missing handlers default to identity.
pub struct Transition<E, A> {
    on_absent: Option<NullaryHandler<E, A>>,
    on_pending: Option<NullaryHandler<E, A>>,
    on_failure: Option<FailureHandler<E, A>>,
    on_success: Option<SuccessHandler<E, A>>,
    on_both: Option<BothHandler<E, A>>,
}

impl<E, A> Transition<E, A> {
    /// A transition with no handlers. Running it returns its input.
    pub fn new() -> Self {
        Self {
            on_absent: None,
            on_pending: None,
            on_failure: None,
            on_success: None,
            on_both: None,
        }
    }

    pub fn on_absent<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Resource<E, A> + Send + Sync + 'static,
    {
        self.on_absent = Some(Box::new(f));
        self
    }

    pub fn on_pending<F>(mut self, f: F) -> Self
    where
        F: Fn() -> Resource<E, A> + Send + Sync + 'static,
    {
        self.on_pending = Some(Box::new(f));
        self
    }

    pub fn on_failure<F>(mut self, f: F) -> Self
    where
        F: Fn(E, bool) -> Resource<E, A> + Send + Sync + 'static,
    {
        self.on_failure = Some(Box::new(f));
        self
    }

    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(A, bool) -> Resource<E, A> + Send + Sync + 'static,
    {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_both<F>(mut self, f: F) -> Self
    where
        F: Fn(E, A, bool) -> Resource<E, A> + Send + Sync + 'static,
    {
        self.on_both = Some(Box::new(f));
        self
    }

    /// Apply the transition to a state.
    pub fn run(&self, state: Resource<E, A>) -> Resource<E, A> {
        state.fold(
            || match &self.on_absent {
                Some(f) => f(),
                None => Resource::Absent,
            },
            || match &self.on_pending {
                Some(f) => f(),
                None => Resource::Pending,
            },
            |error, refreshing| match &self.on_failure {
                Some(f) => f(error, refreshing),
                None => Resource::failure(error, refreshing),
            },
            |result, refreshing| match &self.on_success {
                Some(f) => f(result, refreshing),
                None => Resource::success(result, refreshing),
            },
            |error, result, refreshing| match &self.on_both {
                Some(f) => f(error, result, refreshing),
                None => Resource::both(error, result, refreshing),
            },
        )
    }
}

impl<E: 'static, A: 'static> Transition<E, A> {
    /// The "request started" transition: `Absent` becomes `Pending`, held
    /// outcomes start refreshing, `Pending` stays as it is.
    pub fn request_started() -> Self {
        Self::new()
            .on_absent(Resource::pending)
            .on_failure(|error, _| Resource::failure(error, true))
            .on_success(|result, _| Resource::success(result, true))
            .on_both(|error, result, _| Resource::both(error, result, true))
    }
}

impl<E, A> Default for Transition<E, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> fmt::Debug for Transition<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("on_absent", &self.on_absent.is_some())
            .field("on_pending", &self.on_pending.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .field("on_success", &self.on_success.is_some())
            .field("on_both", &self.on_both.is_some())
            .finish()
    }
}

/// A lifecycle event from whatever produces the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event<E, A> {
    /// A new request was issued.
    Request,
    /// The in-flight request produced a value.
    Succeed { value: A },
    /// The in-flight request produced an error.
    Fail { error: E },
    /// Forget everything, back to `Absent`.
    Reset,
}

impl<E, A> Resource<E, A> {
    pub fn transition(self, transition: &Transition<E, A>) -> Self {
        transition.run(self)
    }

    /// Apply a lifecycle event and return the next state.
    pub fn reduce(self, event: Event<E, A>) -> Self {
        match event {
            Event::Request => match self {
                Resource::Absent | Resource::Pending => Resource::Pending,
                Resource::Failure { error, .. } => Resource::failure(error, true),
                Resource::Success { result, .. } => Resource::success(result, true),
                Resource::Both { error, result, .. } => Resource::both(error, result, true),
            },
            Event::Succeed { value } => Resource::success(value, false),
            Event::Fail { error } => match self.into_result_option() {
                Some(held) => Resource::both(error, held, false),
                None => Resource::failure(error, false),
            },
            Event::Reset => Resource::Absent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type R = Resource<&'static str, i32>;

    #[test]
    fn test_empty_transition_is_identity() {
        let t = Transition::new();
        for r in [
            R::absent(),
            R::pending(),
            R::failure("e", true),
            R::success(1, false),
            R::both("e", 1, true),
        ] {
            assert_eq!(t.run(r), r);
        }
    }

    #[test]
    fn test_only_registered_arm_runs() {
        let t = Transition::new().on_absent(|| R::pending());
        assert_eq!(R::absent().transition(&t), R::pending());
        assert_eq!(R::success(4, false).transition(&t), R::success(4, false));
    }

    #[test]
    fn test_transition_is_reusable() {
        let t: Transition<&str, i32> = Transition::new().on_success(|a, r| R::success(a + 1, r));
        let once = R::success(1, false).transition(&t);
        let twice = once.transition(&t);
        assert_eq!(twice, R::success(3, false));
    }

    #[test]
    fn test_debug_lists_registered_handlers() {
        let t: Transition<&str, i32> = Transition::new().on_pending(|| R::absent());
        let dbg = format!("{:?}", t);
        assert!(dbg.contains("on_pending: true"));
        assert!(dbg.contains("on_absent: false"));
    }

    #[test]
    fn test_fail_after_success_keeps_value() {
        let r = R::success(5, true).reduce(Event::Fail { error: "boom" });
        assert_eq!(r, R::both("boom", 5, false));
    }
}
