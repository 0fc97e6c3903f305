use bulletin_entity::Entity;
use bulletin_types::UserId;
use serde::{Deserialize, Serialize};

/// A user account. Users are owned by the server and never edited locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Entity for User {
    type Id = UserId;
    type Patch = UserPatch;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn apply(&mut self, patch: &UserPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(username) = &patch.username {
            self.username.clone_from(username);
        }
        if let Some(first_name) = &patch.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &patch.last_name {
            self.last_name.clone_from(last_name);
        }
    }

    fn to_patch(&self) -> UserPatch {
        UserPatch {
            name: Some(self.name.clone()),
            username: Some(self.username.clone()),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
        }
    }

    fn from_patch(id: UserId, patch: UserPatch) -> Option<Self> {
        Some(Self {
            id,
            name: patch.name?,
            username: patch.username?,
            first_name: patch.first_name?,
            last_name: patch.last_name?,
        })
    }
}
