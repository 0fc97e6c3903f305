//! Request lifecycle tracking for async operations.
//!
//! Each named operation owns one [`RequestState`]. Its transitions are
//! driven by [`AsyncPhase`] values carried in actions:
//!
//! ```text
//! Idle ──pending──▶ Pending ──fulfilled──▶ Succeeded
//!                      │
//!                      └────rejected────▶ Failed
//! ```
//!
//! Nothing here fences duplicate or overlapping requests. A second
//! `pending` while one is in flight simply overwrites, and settlements are
//! applied in the order they arrive. Callers that care gate on
//! [`RequestState::can_start`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of one async operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Status plus the last failure message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestState {
    pub status: RequestStatus,
    pub error: Option<String>,
}

impl RequestState {
    /// The request was issued. Clears any previous error.
    pub fn on_pending(&mut self) {
        self.status = RequestStatus::Pending;
        self.error = None;
    }

    /// The request succeeded. Merging the payload is the owning store's job.
    pub fn on_fulfilled(&mut self) {
        self.status = RequestStatus::Succeeded;
    }

    /// The request failed with `message`.
    pub fn on_rejected(&mut self, message: impl Into<String>) {
        self.status = RequestStatus::Failed;
        self.error = Some(message.into());
    }

    /// Applies one phase, ignoring its payload.
    pub fn apply<P>(&mut self, phase: &AsyncPhase<P>) {
        match phase {
            AsyncPhase::Pending => self.on_pending(),
            AsyncPhase::Fulfilled(_) => self.on_fulfilled(),
            AsyncPhase::Rejected(message) => self.on_rejected(message.clone()),
        }
    }

    /// True when no request is in flight and the last one did not succeed,
    /// i.e. starting (or retrying) the operation makes sense.
    #[must_use]
    pub fn can_start(&self) -> bool {
        matches!(self.status, RequestStatus::Idle | RequestStatus::Failed)
    }

    /// True while a request is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// One step of an async operation, as carried by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncPhase<P> {
    Pending,
    Fulfilled(P),
    Rejected(String),
}

impl<P> AsyncPhase<P> {
    /// Suffix used in action type strings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            AsyncPhase::Pending => "pending",
            AsyncPhase::Fulfilled(_) => "fulfilled",
            AsyncPhase::Rejected(_) => "rejected",
        }
    }
}

/// The async operations the store can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchPosts,
    AddNewPost,
    FetchUsers,
    FetchNotifications,
}

impl Operation {
    /// Stable type prefix, e.g. `posts/fetchPosts`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::FetchPosts => "posts/fetchPosts",
            Operation::AddNewPost => "posts/addNewPost",
            Operation::FetchUsers => "users/fetchUsers",
            Operation::FetchNotifications => "notifications/fetchNotifications",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
