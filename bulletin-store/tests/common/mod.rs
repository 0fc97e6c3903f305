#![allow(dead_code)]

use bulletin_client::mock::MockClient;
use bulletin_model::{Notification, Post, User};
use bulletin_store::{Store, StoreConfig};
use bulletin_types::{NotificationId, PostId, Reactions, Timestamp, UserId};
use serde_json::{Value, json};
use std::sync::{Arc, Once};
use std::time::Duration;

static TRACING: Once = Once::new();

/// Routes store logs through the test harness. `RUST_LOG` narrows them.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

/// A post dated `2024-01-{day}`.
pub fn post(id: &str, author: &str, day: u32) -> Post {
    Post {
        id: PostId::new(id),
        title: format!("Post {id}"),
        content: format!("Content of post {id}"),
        author: UserId::new(author),
        date: ts(&format!("2024-01-{day:02}T00:00:00.000Z")),
        reactions: Reactions::default(),
    }
}

pub fn user(id: &str, name: &str) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        username: name.to_lowercase(),
        first_name: name.to_string(),
        last_name: String::new(),
    }
}

/// A notification dated `2024-02-{day}`.
pub fn notification(id: &str, user_id: &str, day: u32, read: bool, is_new: bool) -> Notification {
    Notification {
        id: NotificationId::new(id),
        date: ts(&format!("2024-02-{day:02}T00:00:00.000Z")),
        message: format!("notification {id}"),
        user_id: UserId::new(user_id),
        read,
        is_new,
    }
}

pub fn posts_body(posts: &[Post]) -> Value {
    json!({ "posts": posts })
}

pub fn users_body(users: &[User]) -> Value {
    json!({ "users": users })
}

pub fn notifications_body(notifications: &[Notification]) -> Value {
    json!({ "notifications": notifications })
}

/// A store over a fresh mock client with default endpoints.
pub fn mock_store() -> (Store, Arc<MockClient>) {
    init_tracing();
    let client = Arc::new(MockClient::new());
    let store = Store::new(client.clone(), StoreConfig::default());
    (store, client)
}

/// Yields to the runtime until `done` holds, so spawned operations can run.
pub async fn wait_until(done: impl Fn() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !done() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}
