//! The five-state resource algebra and its eliminator.
//!
//! A [`Resource`] is the current knowledge about a value that is produced
//! asynchronously and may be re-requested while an earlier outcome is still
//! held. The five shapes are mutually exclusive:
//!
//! - `Absent`: nothing has been requested yet
//! - `Pending`: a request is in flight and nothing is held
//! - `Failure`: the last outcome was an error
//! - `Success`: the last outcome was a value
//! - `Both`: a value is retained alongside a more recent error
//!
//! The three outcome-bearing shapes carry a `refreshing` flag which is true
//! while another request is in flight. `Absent` and `Pending` never carry it.
//!
//! [`Resource::fold`] is the single total extraction point. Every other
//! combinator in this crate is a structural match over the same five arms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Current knowledge about an asynchronously produced value.
///
/// # Type Parameters
/// - `E`: the error carried by `Failure` and `Both`. Opaque to this crate.
/// - `A`: the value carried by `Success` and `Both`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Resource<E, A> {
    /// No request has ever been made.
    Absent,
    /// A request is in flight and no prior outcome exists.
    Pending,
    /// The last outcome was an error.
    Failure { error: E, refreshing: bool },
    /// The last outcome was a value.
    Success { result: A, refreshing: bool },
    /// A previously loaded value plus a newer error.
    Both {
        error: E,
        result: A,
        refreshing: bool,
    },
}

/// Fieldless tag naming which shape a resource is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateKind {
    Absent,
    Pending,
    Failure,
    Success,
    Both,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StateKind::Absent => "absent",
            StateKind::Pending => "pending",
            StateKind::Failure => "failure",
            StateKind::Success => "success",
            StateKind::Both => "both",
        };
        f.write_str(name)
    }
}

impl<E, A> Default for Resource<E, A> {
    fn default() -> Self {
        Resource::Absent
    }
}

impl<E, A> Resource<E, A> {
    // ── Constructors ────────────────────────────────────────────

    pub fn absent() -> Self {
        Resource::Absent
    }

    pub fn pending() -> Self {
        Resource::Pending
    }

    pub fn failure(error: E, refreshing: bool) -> Self {
        Resource::Failure { error, refreshing }
    }

    pub fn success(result: A, refreshing: bool) -> Self {
        Resource::Success { result, refreshing }
    }

    pub fn both(error: E, result: A, refreshing: bool) -> Self {
        Resource::Both {
            error,
            result,
            refreshing,
        }
    }

    /// A settled value that is not being refreshed.
    pub fn of(result: A) -> Self {
        Resource::success(result, false)
    }

    /// A settled error that is not being refreshed.
    pub fn throw_error(error: E) -> Self {
        Resource::failure(error, false)
    }

    // ── Eliminator ──────────────────────────────────────────────

    /// Total pattern match with one handler per shape.
    ///
    /// Exactly one handler runs, receiving that shape's fields. All five
    /// handlers are required, so a new shape cannot be silently ignored.
    ///
    /// ```
    /// use refreshable_data::Resource;
    ///
    /// let r: Resource<&str, usize> = Resource::both("abc", 3, false);
    /// let n = r.fold(|| 0, || 0, |e, _| e.len(), |a, _| a, |e, a, _| e.len() + a);
    /// assert_eq!(n, 6);
    /// ```
    pub fn fold<B>(
        self,
        on_absent: impl FnOnce() -> B,
        on_pending: impl FnOnce() -> B,
        on_failure: impl FnOnce(E, bool) -> B,
        on_success: impl FnOnce(A, bool) -> B,
        on_both: impl FnOnce(E, A, bool) -> B,
    ) -> B {
        match self {
            Resource::Absent => on_absent(),
            Resource::Pending => on_pending(),
            Resource::Failure { error, refreshing } => on_failure(error, refreshing),
            Resource::Success { result, refreshing } => on_success(result, refreshing),
            Resource::Both {
                error,
                result,
                refreshing,
            } => on_both(error, result, refreshing),
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn kind(&self) -> StateKind {
        match self {
            Resource::Absent => StateKind::Absent,
            Resource::Pending => StateKind::Pending,
            Resource::Failure { .. } => StateKind::Failure,
            Resource::Success { .. } => StateKind::Success,
            Resource::Both { .. } => StateKind::Both,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Resource::Absent)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Resource::Pending)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Resource::Failure { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success { .. })
    }

    pub fn is_both(&self) -> bool {
        matches!(self, Resource::Both { .. })
    }

    /// Whether another request is in flight while an outcome is held.
    ///
    /// Always false for `Absent` and `Pending`.
    pub fn is_refreshing(&self) -> bool {
        match self {
            Resource::Absent | Resource::Pending => false,
            Resource::Failure { refreshing, .. }
            | Resource::Success { refreshing, .. }
            | Resource::Both { refreshing, .. } => *refreshing,
        }
    }

    /// Whether any request is in flight, with or without a held outcome.
    pub fn is_loading(&self) -> bool {
        self.is_pending() || self.is_refreshing()
    }

    /// The held value, if any (`Success` or `Both`).
    pub fn result(&self) -> Option<&A> {
        match self {
            Resource::Success { result, .. } | Resource::Both { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The held error, if any (`Failure` or `Both`).
    pub fn error(&self) -> Option<&E> {
        match self {
            Resource::Failure { error, .. } | Resource::Both { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn into_result_option(self) -> Option<A> {
        match self {
            Resource::Success { result, .. } | Resource::Both { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn into_error_option(self) -> Option<E> {
        match self {
            Resource::Failure { error, .. } | Resource::Both { error, .. } => Some(error),
            _ => None,
        }
    }

    // ── Borrowing views ─────────────────────────────────────────

    pub fn as_ref(&self) -> Resource<&E, &A> {
        match self {
            Resource::Absent => Resource::Absent,
            Resource::Pending => Resource::Pending,
            Resource::Failure { error, refreshing } => Resource::failure(error, *refreshing),
            Resource::Success { result, refreshing } => Resource::success(result, *refreshing),
            Resource::Both {
                error,
                result,
                refreshing,
            } => Resource::both(error, result, *refreshing),
        }
    }

    pub fn as_mut(&mut self) -> Resource<&mut E, &mut A> {
        match self {
            Resource::Absent => Resource::Absent,
            Resource::Pending => Resource::Pending,
            Resource::Failure { error, refreshing } => Resource::failure(error, *refreshing),
            Resource::Success { result, refreshing } => Resource::success(result, *refreshing),
            Resource::Both {
                error,
                result,
                refreshing,
            } => Resource::both(error, result, *refreshing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type R = Resource<String, i32>;

    #[test]
    fn test_default_is_absent() {
        assert_eq!(R::default(), R::absent());
    }

    #[test]
    fn test_fold_selects_matching_arm() {
        let describe = |r: R| {
            r.fold(
                || "absent".to_string(),
                || "pending".to_string(),
                |e, _| format!("failure{}", e.len()),
                |a, _| format!("success{}", a),
                |e, a, _| format!("both{}{}", e.len(), a),
            )
        };
        assert_eq!(describe(R::absent()), "absent");
        assert_eq!(describe(R::pending()), "pending");
        assert_eq!(describe(R::failure("abc".into(), false)), "failure3");
        assert_eq!(describe(R::success(3, false)), "success3");
        assert_eq!(describe(R::both("abc".into(), 3, false)), "both33");
    }

    #[test]
    fn test_refreshing_only_on_outcomes() {
        assert!(!R::absent().is_refreshing());
        assert!(!R::pending().is_refreshing());
        assert!(R::failure("e".into(), true).is_refreshing());
        assert!(R::success(1, true).is_refreshing());
        assert!(!R::both("e".into(), 1, false).is_refreshing());
    }

    #[test]
    fn test_is_loading() {
        assert!(R::pending().is_loading());
        assert!(R::success(1, true).is_loading());
        assert!(!R::success(1, false).is_loading());
        assert!(!R::absent().is_loading());
    }

    #[test]
    fn test_accessors() {
        let both = R::both("late".into(), 7, false);
        assert_eq!(both.result(), Some(&7));
        assert_eq!(both.error().map(String::as_str), Some("late"));
        assert_eq!(R::pending().result(), None);
        assert_eq!(R::success(1, false).into_error_option(), None);
    }

    #[test]
    fn test_as_mut_edits_in_place() {
        let mut r = R::both("e".into(), 1, true);
        if let Resource::Both { result, .. } = r.as_mut() {
            *result += 1;
        }
        assert_eq!(r, R::both("e".into(), 2, true));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(StateKind::Both.to_string(), "both");
        assert_eq!(R::pending().kind(), StateKind::Pending);
    }
}
