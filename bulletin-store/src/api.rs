//! Requests and response decoding for the store's async operations.
//!
//! Every response is decoded into a closed envelope type; a body that does
//! not match, including one with fields the envelope does not know, is a
//! [`TransportError::Decode`]. Entities inside an envelope tolerate extra
//! fields so the server can grow them without breaking older clients.

use bulletin_client::{ApiClient, TransportError, TransportResult};
use bulletin_model::{Notification, Post, PostDraft, User};
use bulletin_types::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PostList {
    posts: Vec<Post>,
}

#[derive(Serialize)]
struct NewPost<'a> {
    post: &'a PostDraft,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CreatedPost {
    post: Post,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct UserList {
    users: Vec<User>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NotificationList {
    notifications: Vec<Notification>,
}

fn decode<T: DeserializeOwned>(body: Value) -> TransportResult<T> {
    serde_json::from_value(body).map_err(|e| TransportError::Decode(e.to_string()))
}

pub(crate) async fn fetch_posts(client: &dyn ApiClient, path: &str) -> TransportResult<Vec<Post>> {
    let list: PostList = decode(client.get(path).await?)?;
    Ok(list.posts)
}

pub(crate) async fn create_post(
    client: &dyn ApiClient,
    path: &str,
    draft: &PostDraft,
) -> TransportResult<Post> {
    let body = serde_json::to_value(NewPost { post: draft })?;
    let created: CreatedPost = decode(client.post(path, body).await?)?;
    Ok(created.post)
}

pub(crate) async fn fetch_users(client: &dyn ApiClient, path: &str) -> TransportResult<Vec<User>> {
    let list: UserList = decode(client.get(path).await?)?;
    Ok(list.users)
}

pub(crate) async fn fetch_notifications(
    client: &dyn ApiClient,
    path: &str,
) -> TransportResult<Vec<Notification>> {
    let list: NotificationList = decode(client.get(path).await?)?;
    Ok(list.notifications)
}

/// `{path}?since={timestamp}`, with an empty cursor when nothing is held yet.
pub fn notifications_since_path(path: &str, since: Option<&Timestamp>) -> String {
    let since = since.map(Timestamp::as_str).unwrap_or_default();
    format!("{path}?since={}", urlencoding::encode(since))
}
