use serde::{Deserialize, Serialize};

/// Endpoints the store's async operations call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// List (`GET`) and create (`POST`) posts.
    pub posts_path: String,
    /// List users.
    pub users_path: String,
    /// List notifications; a `since` query parameter is appended.
    pub notifications_path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            posts_path: "/fakeApi/posts".to_string(),
            users_path: "/fakeApi/users".to_string(),
            notifications_path: "/fakeApi/notifications".to_string(),
        }
    }
}
