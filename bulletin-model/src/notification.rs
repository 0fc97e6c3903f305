use bulletin_entity::Entity;
use bulletin_types::{NotificationId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// An activity notification.
///
/// `read` is set locally when the user has seen the list. `is_new` is a
/// transient flag recomputed on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub date: Timestamp,
    pub message: String,
    /// The user the notification is about. Sent as `user` on the wire.
    #[serde(rename = "user")]
    pub user_id: UserId,
    #[serde(default)]
    pub read: bool,
    #[serde(default = "default_is_new")]
    pub is_new: bool,
}

fn default_is_new() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPatch {
    pub date: Option<Timestamp>,
    pub message: Option<String>,
    pub user_id: Option<UserId>,
    pub read: Option<bool>,
    pub is_new: Option<bool>,
}

impl NotificationPatch {
    /// Marks the notification read.
    #[must_use]
    pub fn read() -> Self {
        Self {
            read: Some(true),
            ..Default::default()
        }
    }

    /// Sets the `is_new` flag.
    #[must_use]
    pub fn is_new(is_new: bool) -> Self {
        Self {
            is_new: Some(is_new),
            ..Default::default()
        }
    }
}

impl Entity for Notification {
    type Id = NotificationId;
    type Patch = NotificationPatch;

    fn id(&self) -> &NotificationId {
        &self.id
    }

    fn apply(&mut self, patch: &NotificationPatch) {
        if let Some(date) = &patch.date {
            self.date.clone_from(date);
        }
        if let Some(message) = &patch.message {
            self.message.clone_from(message);
        }
        if let Some(user_id) = &patch.user_id {
            self.user_id.clone_from(user_id);
        }
        if let Some(read) = patch.read {
            self.read = read;
        }
        if let Some(is_new) = patch.is_new {
            self.is_new = is_new;
        }
    }

    fn to_patch(&self) -> NotificationPatch {
        NotificationPatch {
            date: Some(self.date.clone()),
            message: Some(self.message.clone()),
            user_id: Some(self.user_id.clone()),
            read: Some(self.read),
            is_new: Some(self.is_new),
        }
    }

    fn from_patch(id: NotificationId, patch: NotificationPatch) -> Option<Self> {
        Some(Self {
            id,
            date: patch.date?,
            message: patch.message?,
            user_id: patch.user_id?,
            read: patch.read.unwrap_or(false),
            is_new: patch.is_new.unwrap_or(true),
        })
    }
}
