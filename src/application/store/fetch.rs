//! Phases of an asynchronous fetch action.

use crate::domain::errors::ShopError;

/// Identifies one invocation of a fetch action. Ids increase in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable phase of a fetch.
#[derive(Debug, Clone)]
pub enum Phase<T> {
    /// Request issued, response outstanding.
    Pending,
    /// Response arrived with a payload.
    Fulfilled(T),
    /// Request failed or the response carried no data.
    Rejected(ShopError),
    /// The issuing view went away before the response arrived. Settles the
    /// loading flag without touching the slice's data.
    Cancelled,
}

impl<T> Phase<T> {
    /// Suffix used in action type names.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fulfilled(_) => "fulfilled",
            Self::Rejected(_) => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the request has finished one way or another.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A phase tagged with the request it belongs to.
#[derive(Debug, Clone)]
pub struct Fetch<T> {
    /// Id allocated when the fetch was issued.
    pub request_id: RequestId,
    /// Where the request stands.
    pub phase: Phase<T>,
}

impl<T> Fetch<T> {
    /// Request issued, no response yet.
    #[must_use]
    pub const fn pending(request_id: RequestId) -> Self {
        Self {
            request_id,
            phase: Phase::Pending,
        }
    }

    /// Request resolved with `payload`.
    #[must_use]
    pub const fn fulfilled(request_id: RequestId, payload: T) -> Self {
        Self {
            request_id,
            phase: Phase::Fulfilled(payload),
        }
    }

    /// Request failed.
    #[must_use]
    pub const fn rejected(request_id: RequestId, error: ShopError) -> Self {
        Self {
            request_id,
            phase: Phase::Rejected(error),
        }
    }

    /// Issuing view went away before the response arrived.
    #[must_use]
    pub const fn cancelled(request_id: RequestId) -> Self {
        Self {
            request_id,
            phase: Phase::Cancelled,
        }
    }
}

/// How a slice treats responses that arrive out of issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Whichever response resolves last overwrites the slice.
    #[default]
    LastResolved,
    /// Responses to requests older than the newest issued one are dropped.
    LatestIssued,
}

impl ResponseOrdering {
    /// Ordering selected by the `discard_stale_responses` setting.
    #[must_use]
    pub const fn from_discard_stale(discard_stale: bool) -> Self {
        if discard_stale {
            Self::LatestIssued
        } else {
            Self::LastResolved
        }
    }
}

/// Loading flag plus the bookkeeping needed for [`ResponseOrdering`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStatus {
    is_loading: bool,
    newest_issued: Option<RequestId>,
}

/// What a reducer should do with a phase after [`FetchStatus::observe`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Nothing to apply to the data (pending, cancelled or a stale response).
    Ignore,
    /// Replace the result with the payload.
    Replace(T),
    /// Clear the result.
    Clear,
}

impl FetchStatus {
    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Updates the loading flag for `fetch` and returns what the slice should
    /// do with its data.
    pub fn observe<T>(&mut self, fetch: Fetch<T>, ordering: ResponseOrdering) -> Outcome<T> {
        let Fetch { request_id, phase } = fetch;

        if let Phase::Pending = phase {
            self.is_loading = true;
            self.newest_issued = Some(self.newest_issued.map_or(request_id, |n| n.max(request_id)));
            return Outcome::Ignore;
        }

        let stale = self.newest_issued.is_some_and(|newest| request_id < newest);
        if ordering == ResponseOrdering::LatestIssued && stale {
            return Outcome::Ignore;
        }

        self.is_loading = false;
        match phase {
            Phase::Fulfilled(payload) => Outcome::Replace(payload),
            Phase::Rejected(_) => Outcome::Clear,
            Phase::Pending | Phase::Cancelled => Outcome::Ignore,
        }
    }
}
