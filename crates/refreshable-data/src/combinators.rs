//! Structure-preserving transformations, sequencing and combination.
//!
//! Laws upheld (for all states `m`):
//! - `m.map(id) == m` and `m.map(g).map(f) == m.map(|x| f(g(x)))`
//! - `m.bimap(g, f) == m.map(f).map_error(g) == m.map_error(g).map(f)`
//! - `Resource::success(a, r).chain(f) == f(a)`
//! - `m.chain(f).chain(g) == m.chain(|x| f(x).chain(g))`
//! - `m.chain(Resource::of) == m` when `m` is not refreshing and not `Both`,
//!   because `chain` commits to the continuation's flag and drops the
//!   retained error of `Both`
//!
//! `map`, `map_error` and `bimap` never change the shape or `refreshing`.
//! `apply` ORs the two `refreshing` flags.

use itertools::EitherOrBoth;

use crate::resource::Resource;

impl<E, A> Resource<E, A> {
    /// Transform the held value of `Success` and `Both`.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Resource<E, B> {
        match self {
            Resource::Absent => Resource::Absent,
            Resource::Pending => Resource::Pending,
            Resource::Failure { error, refreshing } => Resource::failure(error, refreshing),
            Resource::Success { result, refreshing } => Resource::success(f(result), refreshing),
            Resource::Both {
                error,
                result,
                refreshing,
            } => Resource::both(error, f(result), refreshing),
        }
    }

    /// Transform the held error of `Failure` and `Both`.
    pub fn map_error<F>(self, g: impl FnOnce(E) -> F) -> Resource<F, A> {
        match self {
            Resource::Absent => Resource::Absent,
            Resource::Pending => Resource::Pending,
            Resource::Failure { error, refreshing } => Resource::failure(g(error), refreshing),
            Resource::Success { result, refreshing } => Resource::success(result, refreshing),
            Resource::Both {
                error,
                result,
                refreshing,
            } => Resource::both(g(error), result, refreshing),
        }
    }

    /// Transform error and value independently.
    pub fn bimap<F, B>(self, g: impl FnOnce(E) -> F, f: impl FnOnce(A) -> B) -> Resource<F, B> {
        match self {
            Resource::Absent => Resource::Absent,
            Resource::Pending => Resource::Pending,
            Resource::Failure { error, refreshing } => Resource::failure(g(error), refreshing),
            Resource::Success { result, refreshing } => Resource::success(f(result), refreshing),
            Resource::Both {
                error,
                result,
                refreshing,
            } => Resource::both(g(error), f(result), refreshing),
        }
    }

    /// Sequence a dependent computation on the held value.
    ///
    /// `Success` and `Both` are replaced wholesale by `f(result)`: the
    /// continuation's shape and `refreshing` flag win, and the error held by
    /// `Both` is dropped. `Absent`, `Pending` and `Failure` pass through.
    pub fn chain<B>(self, f: impl FnOnce(A) -> Resource<E, B>) -> Resource<E, B> {
        match self {
            Resource::Absent => Resource::Absent,
            Resource::Pending => Resource::Pending,
            Resource::Failure { error, refreshing } => Resource::failure(error, refreshing),
            Resource::Success { result, .. } | Resource::Both { result, .. } => f(result),
        }
    }

    /// Run `f` for its shape but keep the original value when it yields one.
    pub fn chain_first<B>(self, f: impl FnOnce(&A) -> Resource<E, B>) -> Resource<E, A> {
        self.chain(|a| f(&a).map(move |_| a))
    }

    /// Combine with an independent resource, keeping this side's value.
    pub fn ap_first<B>(self, other: Resource<E, B>) -> Resource<E, A> {
        self.map(|a| move |_: B| a).ap(other)
    }

    /// Combine with an independent resource, keeping the other side's value.
    pub fn ap_second<B>(self, other: Resource<E, B>) -> Resource<E, B> {
        self.map(|_| |b: B| b).ap(other)
    }

    /// Pair the values of two independent resources.
    pub fn zip<B>(self, other: Resource<E, B>) -> Resource<E, (A, B)> {
        self.map(|a| move |b: B| (a, b)).ap(other)
    }

    /// Split a settled state into its outcome sides and `refreshing` flag.
    ///
    /// `None` for `Absent` and `Pending`.
    pub(crate) fn split(self) -> Option<(EitherOrBoth<E, A>, bool)> {
        match self {
            Resource::Absent | Resource::Pending => None,
            Resource::Failure { error, refreshing } => Some((EitherOrBoth::Left(error), refreshing)),
            Resource::Success { result, refreshing } => {
                Some((EitherOrBoth::Right(result), refreshing))
            }
            Resource::Both {
                error,
                result,
                refreshing,
            } => Some((EitherOrBoth::Both(error, result), refreshing)),
        }
    }
}

impl<E, A> Resource<E, Resource<E, A>> {
    pub fn flatten(self) -> Resource<E, A> {
        self.chain(|inner| inner)
    }
}

impl<E, F> Resource<E, F> {
    /// Apply a held function to an independently held argument.
    ///
    /// `Pending` on either side wins, then `Absent`. When both sides are
    /// settled, a value is produced only if both sides hold one, and an
    /// error is kept if either side holds one (the function side's error
    /// first). A held error next to a computed value yields `Both`. The
    /// result is refreshing if either side is.
    pub fn ap<A, B>(self, arg: Resource<E, A>) -> Resource<E, B>
    where
        F: FnOnce(A) -> B,
    {
        if self.is_pending() || arg.is_pending() {
            return Resource::Pending;
        }
        let (Some((fs, rf)), Some((xs, rx))) = (self.split(), arg.split()) else {
            return Resource::Absent;
        };
        let refreshing = rf || rx;

        match (fs, xs) {
            (EitherOrBoth::Left(error), _) => Resource::failure(error, refreshing),
            (EitherOrBoth::Right(_), EitherOrBoth::Left(error)) => {
                Resource::failure(error, refreshing)
            }
            (EitherOrBoth::Both(error, _), EitherOrBoth::Left(_)) => {
                Resource::failure(error, refreshing)
            }
            (EitherOrBoth::Right(f), EitherOrBoth::Right(a)) => Resource::success(f(a), refreshing),
            (EitherOrBoth::Right(f), EitherOrBoth::Both(error, a))
            | (EitherOrBoth::Both(error, f), EitherOrBoth::Right(a))
            | (EitherOrBoth::Both(error, f), EitherOrBoth::Both(_, a)) => {
                Resource::both(error, f(a), refreshing)
            }
        }
    }
}

/// Free-function form of [`Resource::ap`].
pub fn apply<E, A, B, F>(rf: Resource<E, F>, ra: Resource<E, A>) -> Resource<E, B>
where
    F: FnOnce(A) -> B,
{
    rf.ap(ra)
}

/// Lift a plain function to one over resources.
pub fn lift<E, A, B>(f: impl Fn(A) -> B) -> impl Fn(Resource<E, A>) -> Resource<E, B> {
    move |ra| ra.map(&f)
}

/// Lift a binary function to one over two independent resources.
pub fn lift2<E, A, B, C>(
    f: impl Fn(A, B) -> C,
) -> impl Fn(Resource<E, A>, Resource<E, B>) -> Resource<E, C> {
    move |ra, rb| {
        let f = &f;
        ra.map(move |a| move |b| f(a, b)).ap(rb)
    }
}
