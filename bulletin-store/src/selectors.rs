//! Derived views over a [`RootState`] snapshot.
//!
//! Plain selectors read the snapshot directly on every call. Selectors that
//! build a new collection from a filter are memoized (see [`PostsByUser`])
//! so that an unrelated transition hands back the same `Arc`, and a
//! consumer comparing by pointer can skip its own work.

use crate::memo::Memoized;
use crate::notifications::NOTIFICATIONS_ADAPTER;
use crate::posts::POSTS_ADAPTER;
use crate::request::RequestStatus;
use crate::state::RootState;
use crate::users::USERS_ADAPTER;
use bulletin_entity::{EntitySelectors, EntityTable};
use bulletin_model::{Notification, Post, User};
use bulletin_types::{NotificationId, PostId, UserId};
use std::sync::Arc;

/// Shown when a post's author is not in the users table.
pub const UNKNOWN_AUTHOR: &str = "Unknown author";
/// Shown when a notification's user is not in the users table.
pub const UNKNOWN_USER: &str = "Unknown User";

fn posts_table(state: &RootState) -> &EntityTable<Post> {
    &state.posts.table
}

fn users_table(state: &RootState) -> &EntityTable<User> {
    &state.users.table
}

fn notifications_table(state: &RootState) -> &EntityTable<Notification> {
    &state.notifications.table
}

/// Generated accessors for the posts table.
pub fn post_selectors() -> EntitySelectors<RootState, Post> {
    POSTS_ADAPTER.get_selectors(posts_table)
}

/// Generated accessors for the users table.
pub fn user_selectors() -> EntitySelectors<RootState, User> {
    USERS_ADAPTER.get_selectors(users_table)
}

/// Generated accessors for the notifications table.
pub fn notification_selectors() -> EntitySelectors<RootState, Notification> {
    NOTIFICATIONS_ADAPTER.get_selectors(notifications_table)
}

// ── Posts ────────────────────────────────────────────────────────

/// Every post, newest first.
pub fn select_all_posts(state: &RootState) -> Vec<Arc<Post>> {
    post_selectors().select_all(state)
}

/// The post with `id`, if held.
pub fn select_post_by_id(state: &RootState, id: &PostId) -> Option<Arc<Post>> {
    post_selectors().select_by_id(state, id)
}

/// Post ids in table order.
pub fn select_post_ids(state: &RootState) -> &[PostId] {
    post_selectors().select_ids(state)
}

/// Status of the last `fetch_posts`.
pub fn select_posts_status(state: &RootState) -> RequestStatus {
    state.posts.request.status
}

/// Failure message of the last `fetch_posts`, if it failed.
pub fn select_posts_error(state: &RootState) -> Option<&str> {
    state.posts.request.error.as_deref()
}

/// Status of the last `add_new_post`.
pub fn select_create_post_status(state: &RootState) -> RequestStatus {
    state.posts.create_request.status
}

/// Display name of a post's author.
pub fn select_post_author_name(state: &RootState, post_id: &PostId) -> String {
    select_post_by_id(state, post_id)
        .and_then(|post| select_user_by_id(state, &post.author))
        .map_or_else(|| UNKNOWN_AUTHOR.to_string(), |user| user.name.clone())
}

/// Memoized "posts written by a user".
///
/// The cache holds one `(posts table, user id)` pair, the table compared by
/// pointer. Asking again with the same user while the posts table is
/// unchanged returns the previous `Arc`, whatever happened to the users or
/// notifications slices, or to the posts request trackers.
pub struct PostsByUser {
    memo: Memoized<EntityTable<Post>, UserId, Vec<Arc<Post>>>,
}

impl Default for PostsByUser {
    fn default() -> Self {
        Self::new()
    }
}

impl PostsByUser {
    /// A selector with an empty cache.
    pub fn new() -> Self {
        Self {
            memo: Memoized::new(),
        }
    }

    /// Posts authored by `user_id`, newest first.
    pub fn select(&self, state: &RootState, user_id: &UserId) -> Arc<Vec<Arc<Post>>> {
        self.memo.get(&state.posts.table, user_id, |table, user_id| {
            table
                .iter()
                .filter(|post| post.author == *user_id)
                .cloned()
                .collect()
        })
    }

    /// How many times the filter actually ran.
    pub fn recomputations(&self) -> usize {
        self.memo.recomputations()
    }

    /// Drops the cached result and zeroes the counter.
    pub fn reset(&self) {
        self.memo.reset();
    }
}

// ── Users ────────────────────────────────────────────────────────

/// Every user, in server order.
pub fn select_all_users(state: &RootState) -> Vec<Arc<User>> {
    user_selectors().select_all(state)
}

/// The user with `id`, if held.
pub fn select_user_by_id(state: &RootState, id: &UserId) -> Option<Arc<User>> {
    user_selectors().select_by_id(state, id)
}

/// Status of the last `fetch_users`.
pub fn select_users_status(state: &RootState) -> RequestStatus {
    state.users.request.status
}

// ── Notifications ────────────────────────────────────────────────

/// Every notification, newest first.
pub fn select_all_notifications(state: &RootState) -> Vec<Arc<Notification>> {
    notification_selectors().select_all(state)
}

/// The notification with `id`, if held.
pub fn select_notification_by_id(
    state: &RootState,
    id: &NotificationId,
) -> Option<Arc<Notification>> {
    notification_selectors().select_by_id(state, id)
}

/// Notifications not yet marked read.
pub fn select_unread_notifications_count(state: &RootState) -> usize {
    state.notifications.table.iter().filter(|n| !n.read).count()
}

/// Notifications flagged new as of the last fetch.
pub fn select_new_notifications_count(state: &RootState) -> usize {
    state.notifications.table.iter().filter(|n| n.is_new).count()
}

/// Display name of a notification's user.
pub fn select_notification_user_name(state: &RootState, id: &NotificationId) -> String {
    select_notification_by_id(state, id)
        .and_then(|n| select_user_by_id(state, &n.user_id))
        .map_or_else(|| UNKNOWN_USER.to_string(), |user| user.name.clone())
}
