use bulletin_entity::Entity;
use bulletin_types::{PostId, Reactions, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// Characters of content shown in a post excerpt.
pub const EXCERPT_LEN: usize = 100;

/// A post as stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    /// Author of the post. Sent as `user` on the wire.
    #[serde(rename = "user")]
    pub author: UserId,
    pub date: Timestamp,
    #[serde(default)]
    pub reactions: Reactions,
}

impl Post {
    /// The first [`EXCERPT_LEN`] characters of the content.
    #[must_use]
    pub fn excerpt(&self) -> &str {
        match self.content.char_indices().nth(EXCERPT_LEN) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}

/// Partial update of a [`Post`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "user", skip_serializing_if = "Option::is_none")]
    pub author: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<Reactions>,
}

impl Entity for Post {
    type Id = PostId;
    type Patch = PostPatch;

    fn id(&self) -> &PostId {
        &self.id
    }

    fn apply(&mut self, patch: &PostPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        if let Some(author) = &patch.author {
            self.author.clone_from(author);
        }
        if let Some(date) = &patch.date {
            self.date.clone_from(date);
        }
        if let Some(reactions) = patch.reactions {
            self.reactions = reactions;
        }
    }

    fn to_patch(&self) -> PostPatch {
        PostPatch {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            author: Some(self.author.clone()),
            date: Some(self.date.clone()),
            reactions: Some(self.reactions),
        }
    }

    fn from_patch(id: PostId, patch: PostPatch) -> Option<Self> {
        Some(Self {
            id,
            title: patch.title?,
            content: patch.content?,
            author: patch.author?,
            date: patch.date?,
            reactions: patch.reactions.unwrap_or_default(),
        })
    }
}

/// The body sent to the server to create a post. The server assigns the id,
/// the date, and zeroed reactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(rename = "user")]
    pub author: UserId,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: UserId) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author,
        }
    }

    /// A draft can be saved only when title, content and author are all
    /// non-blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is required".to_string());
        }
        if self.content.trim().is_empty() {
            return Err("content is required".to_string());
        }
        if self.author.as_str().trim().is_empty() {
            return Err("author is required".to_string());
        }
        Ok(())
    }
}
