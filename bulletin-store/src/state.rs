//! The root state tree and the actions that drive it.

use crate::error::StoreResult;
use crate::notifications::{self, NotificationsAction, NotificationsState};
use crate::posts::{self, PostsAction, PostsState};
use crate::users::{self, UsersAction, UsersState};
use std::sync::Arc;

/// One immutable snapshot of every slice.
///
/// Each slice sits behind its own `Arc`. A transition replaces exactly the
/// slice it targets; the other two keep their allocation, so
/// `Arc::ptr_eq` tells a reader whether a slice changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootState {
    pub posts: Arc<PostsState>,
    pub users: Arc<UsersState>,
    pub notifications: Arc<NotificationsState>,
}

/// Every intent the store understands, routed to exactly one slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Posts(PostsAction),
    Users(UsersAction),
    Notifications(NotificationsAction),
}

impl Action {
    /// Stable action type string, for logging.
    #[must_use]
    pub fn action_type(&self) -> String {
        match self {
            Action::Posts(action) => action.action_type(),
            Action::Users(action) => action.action_type(),
            Action::Notifications(action) => action.action_type(),
        }
    }
}

impl From<PostsAction> for Action {
    fn from(action: PostsAction) -> Self {
        Action::Posts(action)
    }
}

impl From<UsersAction> for Action {
    fn from(action: UsersAction) -> Self {
        Action::Users(action)
    }
}

impl From<NotificationsAction> for Action {
    fn from(action: NotificationsAction) -> Self {
        Action::Notifications(action)
    }
}

impl RootState {
    /// Computes the snapshot that follows `action`. `self` is untouched.
    pub fn reduce(&self, action: Action) -> StoreResult<RootState> {
        Ok(match action {
            Action::Posts(action) => RootState {
                posts: posts::reduce(&self.posts, action)?,
                ..self.clone()
            },
            Action::Users(action) => RootState {
                users: users::reduce(&self.users, action)?,
                ..self.clone()
            },
            Action::Notifications(action) => RootState {
                notifications: notifications::reduce(&self.notifications, action)?,
                ..self.clone()
            },
        })
    }
}
