//! Boundary conversions from and to plain result shapes.
//!
//! Everything built from an external result is settled and not refreshing:
//! a freshly observed outcome is never mid-refresh.

use itertools::EitherOrBoth;

use crate::remote::RemoteData;
use crate::resource::Resource;
use crate::ResourceError;

impl<E, A> Resource<E, A> {
    /// Build from a two-sided result holding an error, a value, or both.
    pub fn from_these(these: EitherOrBoth<E, A>) -> Self {
        match these {
            EitherOrBoth::Left(error) => Resource::failure(error, false),
            EitherOrBoth::Right(result) => Resource::success(result, false),
            EitherOrBoth::Both(error, result) => Resource::both(error, result, false),
        }
    }

    /// `Success` if the value is present, otherwise `Failure(on_none())`.
    pub fn from_option(value: Option<A>, on_none: impl FnOnce() -> E) -> Self {
        match value {
            Some(result) => Resource::success(result, false),
            None => Resource::failure(on_none(), false),
        }
    }

    pub fn from_result(value: Result<A, E>) -> Self {
        match value {
            Ok(result) => Resource::success(result, false),
            Err(error) => Resource::failure(error, false),
        }
    }

    /// `Success(value)` if `predicate` holds, otherwise `Failure(on_false(&value))`.
    pub fn from_predicate(
        value: A,
        predicate: impl FnOnce(&A) -> bool,
        on_false: impl FnOnce(&A) -> E,
    ) -> Self {
        if predicate(&value) {
            Resource::success(value, false)
        } else {
            Resource::failure(on_false(&value), false)
        }
    }

    /// Demote a held value that fails `predicate` to a `Failure`.
    ///
    /// The new error replaces any error held by `Both`. `refreshing` is kept.
    pub fn filter_or_else(
        self,
        predicate: impl FnOnce(&A) -> bool,
        on_false: impl FnOnce(&A) -> E,
    ) -> Self {
        match self {
            Resource::Success { result, refreshing } => {
                if predicate(&result) {
                    Resource::success(result, refreshing)
                } else {
                    Resource::failure(on_false(&result), refreshing)
                }
            }
            Resource::Both {
                error,
                result,
                refreshing,
            } => {
                if predicate(&result) {
                    Resource::both(error, result, refreshing)
                } else {
                    Resource::failure(on_false(&result), refreshing)
                }
            }
            other => other,
        }
    }

    /// The settled outcome, or the unsettled shape as an error.
    pub fn settled(self) -> Result<EitherOrBoth<E, A>, ResourceError> {
        let kind = self.kind();
        self.split()
            .map(|(these, _)| these)
            .ok_or(ResourceError::NotSettled(kind))
    }

    /// Collapse into the four-state model.
    ///
    /// A refresh in the four-state model overwrites the previous outcome, so
    /// any refreshing state becomes `Pending`. `Both` keeps only its error.
    pub fn into_remote(self) -> RemoteData<E, A> {
        match self {
            Resource::Absent => RemoteData::Absent,
            Resource::Pending => RemoteData::Pending,
            Resource::Failure { refreshing: true, .. }
            | Resource::Success { refreshing: true, .. }
            | Resource::Both { refreshing: true, .. } => RemoteData::Pending,
            Resource::Failure { error, .. } | Resource::Both { error, .. } => {
                RemoteData::failure(error)
            }
            Resource::Success { result, .. } => RemoteData::success(result),
        }
    }
}

impl<E, A> From<EitherOrBoth<E, A>> for Resource<E, A> {
    fn from(these: EitherOrBoth<E, A>) -> Self {
        Resource::from_these(these)
    }
}

impl<E, A> From<Result<A, E>> for Resource<E, A> {
    fn from(value: Result<A, E>) -> Self {
        Resource::from_result(value)
    }
}

impl<E, A> From<RemoteData<E, A>> for Resource<E, A> {
    fn from(remote: RemoteData<E, A>) -> Self {
        match remote {
            RemoteData::Absent => Resource::Absent,
            RemoteData::Pending => Resource::Pending,
            RemoteData::Failure { error } => Resource::failure(error, false),
            RemoteData::Success { result } => Resource::success(result, false),
        }
    }
}

impl<E, A> TryFrom<Resource<E, A>> for EitherOrBoth<E, A> {
    type Error = ResourceError;

    fn try_from(resource: Resource<E, A>) -> Result<Self, Self::Error> {
        resource.settled()
    }
}
