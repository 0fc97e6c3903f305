//! Notifications store.
//!
//! Fetches are incremental: only notifications newer than the newest one
//! already held are requested. On every successful fetch, each held
//! notification's `is_new` flag is recomputed as `!read` before the new
//! batch is merged, so "new" means "not yet read as of the last sync".

use crate::error::StoreResult;
use crate::request::{AsyncPhase, Operation, RequestState};
use bulletin_entity::{EntityAdapter, EntityTable};
use bulletin_model::{Notification, NotificationPatch};
use bulletin_types::Timestamp;
use std::cmp::Ordering;
use std::sync::Arc;

/// Notifications are kept newest first.
pub const NOTIFICATIONS_ADAPTER: EntityAdapter<Notification> = EntityAdapter::sorted(newest_first);

fn newest_first(a: &Notification, b: &Notification) -> Ordering {
    b.date.cmp(&a.date)
}

/// State of the notifications slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsState {
    pub table: Arc<EntityTable<Notification>>,
    pub request: RequestState,
}

impl NotificationsState {
    /// Date of the newest held notification; the `since` cursor of the next
    /// fetch.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<&Timestamp> {
        self.table.iter().next().map(|n| &n.date)
    }
}

/// Transitions of the notifications slice.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationsAction {
    FetchNotifications(AsyncPhase<Vec<Notification>>),
    AllNotificationsRead,
}

impl NotificationsAction {
    /// Stable action type string, e.g. `notifications/allNotificationsRead`.
    #[must_use]
    pub fn action_type(&self) -> String {
        match self {
            NotificationsAction::FetchNotifications(phase) => {
                format!("{}/{}", Operation::FetchNotifications, phase.name())
            }
            NotificationsAction::AllNotificationsRead => {
                "notifications/allNotificationsRead".to_string()
            }
        }
    }
}

/// Applies `action`, returning the next state. Marking all read when
/// nothing is unread returns the same `Arc`.
pub fn reduce(
    state: &Arc<NotificationsState>,
    action: NotificationsAction,
) -> StoreResult<Arc<NotificationsState>> {
    match action {
        NotificationsAction::FetchNotifications(phase) => {
            let mut next = NotificationsState::clone(state);
            next.request.apply(&phase);
            if let AsyncPhase::Fulfilled(batch) = phase {
                let table = Arc::make_mut(&mut next.table);
                NOTIFICATIONS_ADAPTER.update_all(table, |n| {
                    (n.is_new == n.read).then(|| NotificationPatch::is_new(!n.read))
                });
                NOTIFICATIONS_ADAPTER.upsert_many(table, batch);
            }
            Ok(Arc::new(next))
        }
        NotificationsAction::AllNotificationsRead => {
            if state.table.iter().all(|n| n.read) {
                return Ok(Arc::clone(state));
            }
            let mut next = NotificationsState::clone(state);
            NOTIFICATIONS_ADAPTER.update_all(Arc::make_mut(&mut next.table), |n| {
                (!n.read).then(NotificationPatch::read)
            });
            Ok(Arc::new(next))
        }
    }
}
