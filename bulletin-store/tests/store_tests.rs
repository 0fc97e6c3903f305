mod common;

use bulletin_client::mock::RecordedRequest;
use bulletin_client::{Method, TransportError};
use bulletin_model::PostDraft;
use bulletin_store::notifications::NOTIFICATIONS_ADAPTER;
use bulletin_store::posts::POSTS_ADAPTER;
use bulletin_store::selectors::{
    select_all_posts, select_create_post_status, select_post_by_id, select_posts_error,
    select_posts_status, select_users_status,
};
use bulletin_store::{
    Operation, RequestStatus, RootState, Store, StoreConfig, StoreError,
};
use bulletin_types::{PostId, UserId};
use common::{
    mock_store, notification, notifications_body, post, posts_body, user, users_body, wait_until,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_test::{assert_pending, task};

const POSTS: &str = "/fakeApi/posts";
const USERS: &str = "/fakeApi/users";

fn store_with(client: Arc<bulletin_client::mock::MockClient>, state: RootState) -> Store {
    common::init_tracing();
    Store::with_state(client, StoreConfig::default(), state)
}

fn state_with_posts(posts: Vec<bulletin_model::Post>) -> RootState {
    let mut slice = bulletin_store::posts::PostsState::default();
    POSTS_ADAPTER.set_all(Arc::make_mut(&mut slice.table), posts);
    RootState {
        posts: Arc::new(slice),
        ..RootState::default()
    }
}

// ── Async lifecycle ──────────────────────────────────────────────

#[tokio::test]
async fn fetch_is_pending_before_the_transport_settles() {
    let (store, client) = mock_store();
    let responder = client.defer_get(POSTS);
    assert_eq!(select_posts_status(&store.get_state()), RequestStatus::Idle);

    let mut handle = store.fetch_posts();
    assert_eq!(select_posts_status(&store.get_state()), RequestStatus::Pending);
    assert_pending!(task::spawn(&mut handle).poll());
    wait_until(|| client.request_count() == 1).await;
    assert_eq!(select_posts_status(&store.get_state()), RequestStatus::Pending);

    responder.resolve(posts_body(&[post("1", "2", 1)]));
    let fetched = handle.await.unwrap();
    assert_eq!(fetched, vec![post("1", "2", 1)]);

    let state = store.get_state();
    assert_eq!(select_posts_status(&state), RequestStatus::Succeeded);
    assert_eq!(
        select_post_by_id(&state, &PostId::new("1")).as_deref(),
        Some(&post("1", "2", 1))
    );
}

#[tokio::test]
async fn transport_failure_is_recorded_and_returned() {
    let (store, client) = mock_store();
    client.fail_get(POSTS, "network down");

    let err = store.fetch_posts().await.unwrap_err();
    assert_eq!(
        err,
        StoreError::Rejected {
            operation: Operation::FetchPosts,
            message: "network down".into()
        }
    );
    assert_eq!(err.to_string(), "network down");

    let state = store.get_state();
    assert_eq!(select_posts_status(&state), RequestStatus::Failed);
    assert_eq!(select_posts_error(&state), Some("network down"));
}

#[tokio::test]
async fn dropped_handle_still_applies_the_result() {
    let (store, client) = mock_store();
    client.on_get(POSTS, posts_body(&[post("1", "2", 1)]));

    drop(store.fetch_posts());
    wait_until(|| select_posts_status(&store.get_state()) != RequestStatus::Pending).await;

    let state = store.get_state();
    assert_eq!(select_posts_status(&state), RequestStatus::Succeeded);
    assert_eq!(select_all_posts(&state).len(), 1);
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn dropped_handle_still_records_a_failure() {
    let (store, client) = mock_store();
    client.fail_get(USERS, "offline");

    drop(store.fetch_users());
    wait_until(|| select_users_status(&store.get_state()) == RequestStatus::Failed).await;

    assert_eq!(
        store.get_state().users.request.error.as_deref(),
        Some("offline")
    );
    // A failed operation may be retried.
    assert!(store.get_state().users.request.can_start());
}

#[test]
fn operations_outside_a_runtime_change_nothing() {
    let (store, client) = mock_store();
    let before = store.get_state();

    let handle = store.fetch_posts();
    let err = tokio_test::block_on(handle).unwrap_err();

    assert_eq!(err, StoreError::NoRuntime(Operation::FetchPosts));
    assert!(Arc::ptr_eq(&before, &store.get_state()));
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn malformed_response_is_a_rejection() {
    let (store, client) = mock_store();
    client.on_get(POSTS, json!({ "items": [] }));

    let err = store.fetch_posts().await.unwrap_err();
    assert!(err.to_string().starts_with("invalid response"));
    assert_eq!(select_posts_status(&store.get_state()), RequestStatus::Failed);
}

#[tokio::test]
async fn unknown_envelope_fields_are_a_rejection() {
    let (store, client) = mock_store();
    client.on_get(POSTS, json!({ "posts": [], "nextPage": 2 }));

    let err = store.fetch_posts().await.unwrap_err();
    assert!(err.to_string().starts_with("invalid response"));
    assert_eq!(select_posts_status(&store.get_state()), RequestStatus::Failed);
}

#[tokio::test]
async fn extra_entity_fields_are_tolerated() {
    let (store, client) = mock_store();
    let mut body = serde_json::to_value(post("1", "2", 1)).unwrap();
    body["pinned"] = json!(true);
    client.on_get(POSTS, json!({ "posts": [body] }));

    store.fetch_posts().await.unwrap();
    assert_eq!(select_all_posts(&store.get_state()).len(), 1);
}

#[tokio::test]
async fn status_errors_carry_the_server_message() {
    let (store, client) = mock_store();
    let responder = client.defer_get(USERS);
    let handle = store.fetch_users();
    responder.fail(TransportError::Status {
        status: 500,
        message: "server exploded".into(),
    });

    assert_eq!(handle.await.unwrap_err().to_string(), "server exploded");
    assert_eq!(
        store.get_state().users.request.error.as_deref(),
        Some("server exploded")
    );
}

#[tokio::test]
async fn overlapping_fetches_apply_in_settlement_order() {
    let (store, client) = mock_store();
    let first = client.defer_get(POSTS);
    let second = client.defer_get(POSTS);

    let early = store.fetch_posts();
    wait_until(|| client.request_count() == 1).await;
    let late = store.fetch_posts();
    wait_until(|| client.request_count() == 2).await;

    second.resolve(posts_body(&[post("b", "1", 2)]));
    late.await.unwrap();
    assert_eq!(select_posts_status(&store.get_state()), RequestStatus::Succeeded);

    first.reject("stale failure");
    assert!(early.await.is_err());

    // Nothing fences the older request: its failure lands last.
    let state = store.get_state();
    assert_eq!(select_posts_status(&state), RequestStatus::Failed);
    assert_eq!(select_posts_error(&state), Some("stale failure"));
    assert_eq!(select_all_posts(&state).len(), 1);
}

// ── Create ───────────────────────────────────────────────────────

#[tokio::test]
async fn add_new_post_sends_draft_and_inserts_result() {
    let (store, client) = mock_store();
    client.on_post(POSTS, json!({ "post": post("9", "1", 9) }));

    let draft = PostDraft::new("Hello", "World", UserId::new("1"));
    let created = store.add_new_post(draft).await.unwrap();
    assert_eq!(created.id.as_str(), "9");

    assert_eq!(
        client.requests(),
        vec![RecordedRequest {
            method: Method::Post,
            path: POSTS.into(),
            body: Some(json!({ "post": { "title": "Hello", "content": "World", "user": "1" } })),
        }]
    );
    let state = store.get_state();
    assert_eq!(select_create_post_status(&state), RequestStatus::Succeeded);
    assert_eq!(select_posts_status(&state), RequestStatus::Idle);
    assert!(select_post_by_id(&state, &PostId::new("9")).is_some());
}

#[tokio::test]
async fn invalid_draft_never_reaches_transport() {
    let (store, client) = mock_store();
    let before = store.get_state();

    let err = store
        .add_new_post(PostDraft::new("  ", "body", UserId::new("1")))
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::InvalidDraft("title is required".into()));
    assert_eq!(client.request_count(), 0);
    assert!(Arc::ptr_eq(&before, &store.get_state()));
}

#[tokio::test]
async fn created_post_with_taken_id_fails_the_create() {
    let client = Arc::new(bulletin_client::mock::MockClient::new());
    let store = store_with(client.clone(), state_with_posts(vec![post("1", "1", 1)]));
    client.on_post(POSTS, json!({ "post": post("1", "2", 5) }));

    let err = store
        .add_new_post(PostDraft::new("t", "c", UserId::new("2")))
        .await
        .unwrap_err();
    assert!(err.is_duplicate_id());

    let state = store.get_state();
    assert_eq!(select_create_post_status(&state), RequestStatus::Failed);
    assert_eq!(
        state.posts.create_request.error.as_deref(),
        Some("duplicate entity id: 1")
    );
    assert_eq!(state.posts.table.get(&PostId::new("1")).unwrap().author.as_str(), "1");
}

// ── Users and notifications ──────────────────────────────────────

#[tokio::test]
async fn fetch_users_touches_only_the_users_slice() {
    let (store, client) = mock_store();
    client.on_get(USERS, users_body(&[user("1", "Ann")]));
    let before = store.get_state();

    store.fetch_users().await.unwrap();

    let after = store.get_state();
    assert_eq!(select_users_status(&after), RequestStatus::Succeeded);
    assert!(Arc::ptr_eq(&before.posts, &after.posts));
    assert!(Arc::ptr_eq(&before.notifications, &after.notifications));
    assert!(!Arc::ptr_eq(&before.users, &after.users));
}

#[tokio::test]
async fn fetch_notifications_asks_for_newer_than_latest() {
    let mut slice = bulletin_store::notifications::NotificationsState::default();
    NOTIFICATIONS_ADAPTER.set_all(
        Arc::make_mut(&mut slice.table),
        vec![
            notification("1", "u", 1, true, true),
            notification("2", "u", 3, false, false),
        ],
    );
    let client = Arc::new(bulletin_client::mock::MockClient::new());
    let store = store_with(
        client.clone(),
        RootState {
            notifications: Arc::new(slice),
            ..RootState::default()
        },
    );
    let path = "/fakeApi/notifications?since=2024-02-03T00%3A00%3A00.000Z";
    client.on_get(path, notifications_body(&[notification("3", "u", 4, false, true)]));

    store.fetch_notifications().await.unwrap();

    assert_eq!(client.requests()[0].path, path);
    let state = store.get_state();
    assert_eq!(state.notifications.table.len(), 3);
    let first = state.notifications.table.get(&"1".into()).unwrap();
    assert!(!first.is_new);
    let second = state.notifications.table.get(&"2".into()).unwrap();
    assert!(second.is_new);
}

#[tokio::test]
async fn first_notification_fetch_has_empty_cursor() {
    let (store, client) = mock_store();
    client.on_get("/fakeApi/notifications?since=", notifications_body(&[]));
    store.fetch_notifications().await.unwrap();
    assert_eq!(client.request_count(), 1);
}

// ── Synchronous intents ──────────────────────────────────────────

#[test]
fn reaction_by_name() {
    let client = Arc::new(bulletin_client::mock::MockClient::new());
    let store = store_with(client, state_with_posts(vec![post("1", "1", 1)]));
    let id = PostId::new("1");

    for _ in 0..3 {
        store.reaction_added(&id, "thumbsUp").unwrap();
    }
    let post = select_post_by_id(&store.get_state(), &id).unwrap();
    assert_eq!(post.reactions.thumbs_up, 3);
}

#[test]
fn unknown_reaction_is_rejected_without_transition() {
    let client = Arc::new(bulletin_client::mock::MockClient::new());
    let store = store_with(client, state_with_posts(vec![post("1", "1", 1)]));
    let before = store.get_state();

    let err = store.reaction_added(&PostId::new("1"), "laugh").unwrap_err();
    assert_eq!(err, StoreError::InvalidReactionKind("laugh".into()));
    assert!(Arc::ptr_eq(&before, &store.get_state()));
}

#[test]
fn post_updated_and_all_read() {
    let client = Arc::new(bulletin_client::mock::MockClient::new());
    let store = store_with(client, state_with_posts(vec![post("1", "1", 1)]));
    store.post_updated(&PostId::new("1"), "T", "C").unwrap();
    let post = select_post_by_id(&store.get_state(), &PostId::new("1")).unwrap();
    assert_eq!((post.title.as_str(), post.content.as_str()), ("T", "C"));

    store.all_notifications_read().unwrap();
}

// ── Subscriptions ────────────────────────────────────────────────

#[test]
fn listeners_see_every_commit_until_unsubscribed() {
    let client = Arc::new(bulletin_client::mock::MockClient::new());
    let store = store_with(client, state_with_posts(vec![post("1", "1", 1)]));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let subscription = store.subscribe(move |state: &RootState| {
        let post = state.posts.table.get(&PostId::new("1")).unwrap();
        sink.lock().unwrap().push(post.reactions.eyes);
    });
    assert_eq!(store.listener_count(), 1);

    store.reaction_added(&PostId::new("1"), "eyes").unwrap();
    store.reaction_added(&PostId::new("1"), "eyes").unwrap();
    subscription.unsubscribe();
    store.reaction_added(&PostId::new("1"), "eyes").unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn listener_may_dispatch() {
    let (store, _client) = mock_store();
    let calls = Arc::new(AtomicUsize::new(0));
    let fired = Arc::new(AtomicBool::new(false));

    let inner = store.clone();
    let counter = Arc::clone(&calls);
    let _subscription = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        if !fired.swap(true, Ordering::SeqCst) {
            inner.all_notifications_read().unwrap();
        }
    });

    store.all_notifications_read().unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn failed_dispatch_does_not_notify() {
    let client = Arc::new(bulletin_client::mock::MockClient::new());
    let store = store_with(client, state_with_posts(vec![post("1", "1", 1)]));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let _subscription = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let err = store
        .dispatch(bulletin_store::posts::PostsAction::AddNewPost(
            bulletin_store::AsyncPhase::Fulfilled(post("1", "1", 1)),
        ))
        .unwrap_err();
    assert!(err.is_duplicate_id());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
