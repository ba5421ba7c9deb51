//! Four-state degenerate variant of [`Resource`](crate::Resource).
//!
//! `RemoteData` has no `Both` shape and no `refreshing` flag. A new request
//! overwrites whatever outcome was held, so a refresh is simply `Pending`
//! again. Use it when consumers never show stale data during a reload.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::resource::StateKind;
use crate::transition::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RemoteData<E, A> {
    Absent,
    Pending,
    Failure { error: E },
    Success { result: A },
}

impl<E, A> Default for RemoteData<E, A> {
    fn default() -> Self {
        RemoteData::Absent
    }
}

impl<E, A> RemoteData<E, A> {
    pub fn absent() -> Self {
        RemoteData::Absent
    }

    pub fn pending() -> Self {
        RemoteData::Pending
    }

    pub fn failure(error: E) -> Self {
        RemoteData::Failure { error }
    }

    pub fn success(result: A) -> Self {
        RemoteData::Success { result }
    }

    /// Total pattern match with one handler per shape.
    pub fn fold<B>(
        self,
        on_absent: impl FnOnce() -> B,
        on_pending: impl FnOnce() -> B,
        on_failure: impl FnOnce(E) -> B,
        on_success: impl FnOnce(A) -> B,
    ) -> B {
        match self {
            RemoteData::Absent => on_absent(),
            RemoteData::Pending => on_pending(),
            RemoteData::Failure { error } => on_failure(error),
            RemoteData::Success { result } => on_success(result),
        }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            RemoteData::Absent => StateKind::Absent,
            RemoteData::Pending => StateKind::Pending,
            RemoteData::Failure { .. } => StateKind::Failure,
            RemoteData::Success { .. } => StateKind::Success,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RemoteData::Absent)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RemoteData::Pending)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RemoteData::Failure { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RemoteData::Success { .. })
    }

    pub fn result(&self) -> Option<&A> {
        match self {
            RemoteData::Success { result } => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            RemoteData::Failure { error } => Some(error),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> RemoteData<&E, &A> {
        match self {
            RemoteData::Absent => RemoteData::Absent,
            RemoteData::Pending => RemoteData::Pending,
            RemoteData::Failure { error } => RemoteData::failure(error),
            RemoteData::Success { result } => RemoteData::success(result),
        }
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> RemoteData<E, B> {
        self.bimap(|e| e, f)
    }

    pub fn map_error<F>(self, g: impl FnOnce(E) -> F) -> RemoteData<F, A> {
        self.bimap(g, |a| a)
    }

    pub fn bimap<F, B>(self, g: impl FnOnce(E) -> F, f: impl FnOnce(A) -> B) -> RemoteData<F, B> {
        self.fold(
            || RemoteData::Absent,
            || RemoteData::Pending,
            |error| RemoteData::failure(g(error)),
            |result| RemoteData::success(f(result)),
        )
    }

    pub fn chain<B>(self, f: impl FnOnce(A) -> RemoteData<E, B>) -> RemoteData<E, B> {
        self.fold(
            || RemoteData::Absent,
            || RemoteData::Pending,
            RemoteData::failure,
            f,
        )
    }

    pub fn chain_first<B>(self, f: impl FnOnce(&A) -> RemoteData<E, B>) -> RemoteData<E, A> {
        self.chain(|a| f(&a).map(move |_| a))
    }

    pub fn ap_first<B>(self, other: RemoteData<E, B>) -> RemoteData<E, A> {
        self.map(|a| move |_: B| a).ap(other)
    }

    pub fn ap_second<B>(self, other: RemoteData<E, B>) -> RemoteData<E, B> {
        self.map(|_| |b: B| b).ap(other)
    }

    pub fn from_option(value: Option<A>, on_none: impl FnOnce() -> E) -> Self {
        match value {
            Some(result) => RemoteData::success(result),
            None => RemoteData::failure(on_none()),
        }
    }

    pub fn from_predicate(
        value: A,
        predicate: impl FnOnce(&A) -> bool,
        on_false: impl FnOnce(&A) -> E,
    ) -> Self {
        if predicate(&value) {
            RemoteData::success(value)
        } else {
            RemoteData::failure(on_false(&value))
        }
    }

    pub fn filter_or_else(
        self,
        predicate: impl FnOnce(&A) -> bool,
        on_false: impl FnOnce(&A) -> E,
    ) -> Self {
        self.chain(|a| RemoteData::from_predicate(a, predicate, on_false))
    }

    pub fn transition(self, transition: &RemoteTransition<E, A>) -> Self {
        transition.run(self)
    }

    /// Apply a lifecycle event. Every request restarts from `Pending`.
    pub fn reduce(self, event: Event<E, A>) -> Self {
        match event {
            Event::Request => RemoteData::Pending,
            Event::Succeed { value } => RemoteData::success(value),
            Event::Fail { error } => RemoteData::failure(error),
            Event::Reset => RemoteData::Absent,
        }
    }
}

impl<E, A> RemoteData<E, RemoteData<E, A>> {
    pub fn flatten(self) -> RemoteData<E, A> {
        self.chain(|inner| inner)
    }
}

impl<E, F> RemoteData<E, F> {
    /// Apply a held function to an independently held argument.
    ///
    /// `Pending` wins over `Absent`; a failure on the function side wins
    /// over one on the argument side.
    pub fn ap<A, B>(self, arg: RemoteData<E, A>) -> RemoteData<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match (self, arg) {
            (RemoteData::Pending, _) | (_, RemoteData::Pending) => RemoteData::Pending,
            (RemoteData::Absent, _) | (_, RemoteData::Absent) => RemoteData::Absent,
            (RemoteData::Failure { error }, _) | (_, RemoteData::Failure { error }) => {
                RemoteData::failure(error)
            }
            (RemoteData::Success { result: f }, RemoteData::Success { result: a }) => {
                RemoteData::success(f(a))
            }
        }
    }
}

impl<E, A> From<Result<A, E>> for RemoteData<E, A> {
    fn from(value: Result<A, E>) -> Self {
        match value {
            Ok(result) => RemoteData::success(result),
            Err(error) => RemoteData::failure(error),
        }
    }
}

type NullaryHandler<E, A> = Box<dyn Fn() -> RemoteData<E, A> + Send + Sync>;
type FailureHandler<E, A> = Box<dyn Fn(E) -> RemoteData<E, A> + Send + Sync>;
type SuccessHandler<E, A> = Box<dyn Fn(A) -> RemoteData<E, A> + Send + Sync>;

/// Partial fold over [`RemoteData`]; missing handlers leave the state as is.
pub struct RemoteTransition<E, A> {
    on_absent: Option<NullaryHandler<E, A>>,
    on_pending: Option<NullaryHandler<E, A>>,
    on_failure: Option<FailureHandler<E, A>>,
    on_success: Option<SuccessHandler<E, A>>,
}

impl<E, A> RemoteTransition<E, A> {
    pub fn new() -> Self {
        Self {
            on_absent: None,
            on_pending: None,
            on_failure: None,
            on_success: None,
        }
    }

    pub fn on_absent<F>(mut self, f: F) -> Self
    where
        F: Fn() -> RemoteData<E, A> + Send + Sync + 'static,
    {
        self.on_absent = Some(Box::new(f));
        self
    }

    pub fn on_pending<F>(mut self, f: F) -> Self
    where
        F: Fn() -> RemoteData<E, A> + Send + Sync + 'static,
    {
        self.on_pending = Some(Box::new(f));
        self
    }

    pub fn on_failure<F>(mut self, f: F) -> Self
    where
        F: Fn(E) -> RemoteData<E, A> + Send + Sync + 'static,
    {
        self.on_failure = Some(Box::new(f));
        self
    }

    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: Fn(A) -> RemoteData<E, A> + Send + Sync + 'static,
    {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn run(&self, state: RemoteData<E, A>) -> RemoteData<E, A> {
        state.fold(
            || match &self.on_absent {
                Some(f) => f(),
                None => RemoteData::Absent,
            },
            || match &self.on_pending {
                Some(f) => f(),
                None => RemoteData::Pending,
            },
            |error| match &self.on_failure {
                Some(f) => f(error),
                None => RemoteData::failure(error),
            },
            |result| match &self.on_success {
                Some(f) => f(result),
                None => RemoteData::success(result),
            },
        )
    }
}

impl<E, A> Default for RemoteTransition<E, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, A> fmt::Debug for RemoteTransition<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteTransition")
            .field("on_absent", &self.on_absent.is_some())
            .field("on_pending", &self.on_pending.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .field("on_success", &self.on_success.is_some())
            .finish()
    }
}
