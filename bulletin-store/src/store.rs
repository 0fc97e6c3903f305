//! The root store: one explicitly constructed context object holding the
//! current snapshot, the subscriber list and the transport.
//!
//! Writes are serialized: each dispatch reduces the current snapshot under
//! a lock, publishes the result by swapping the snapshot pointer, then
//! notifies listeners. Readers clone the snapshot `Arc` and always see a
//! complete state.

use crate::api;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::notifications::NotificationsAction;
use crate::posts::PostsAction;
use crate::request::{AsyncPhase, Operation};
use crate::state::{Action, RootState};
use crate::users::UsersAction;
use bulletin_client::{ApiClient, TransportResult};
use bulletin_model::{Notification, Post, PostDraft, User};
use bulletin_types::{PostId, ReactionKind};
use futures::future::{self, BoxFuture, FutureExt};
use std::future::Future;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use tokio::runtime::Handle;
use tracing::{debug, error, info, warn};

/// Resolves once an async operation settles: the fulfilled payload, or
/// [`StoreError::Rejected`] carrying the message recorded in state.
///
/// The operation runs as its own task. Dropping the handle detaches it; the
/// result is still applied to the store.
pub type OperationHandle<T> = BoxFuture<'static, StoreResult<T>>;

type Listener = Arc<dyn Fn(&RootState) + Send + Sync>;

struct Inner {
    state: RwLock<Arc<RootState>>,
    dispatch_lock: Mutex<()>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    client: Arc<dyn ApiClient>,
    config: StoreConfig,
}

/// Handle to the application's state. Cloning shares the same store.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

/// Registration returned by [`Store::subscribe`].
///
/// Dropping it leaves the listener registered; call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it.
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Subscription {
    /// Removes the listener. Later transitions no longer reach it.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.store.upgrade() {
            lock(&inner.listeners).retain(|(id, _)| *id != self.id);
        }
    }
}

impl Store {
    /// Creates a store with empty slices.
    pub fn new(client: Arc<dyn ApiClient>, config: StoreConfig) -> Self {
        Self::with_state(client, config, RootState::default())
    }

    /// Creates a store seeded with `state`.
    pub fn with_state(client: Arc<dyn ApiClient>, config: StoreConfig, state: RootState) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(Arc::new(state)),
                dispatch_lock: Mutex::new(()),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
                client,
                config,
            }),
        }
    }

    /// The current snapshot.
    pub fn get_state(&self) -> Arc<RootState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Endpoints used by the async operations.
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Registers `listener`, called with the new snapshot after every
    /// committed transition.
    pub fn subscribe(&self, listener: impl Fn(&RootState) + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.inner.listeners).push((id, Arc::new(listener)));
        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        lock(&self.inner.listeners).len()
    }

    /// Applies one action and notifies listeners.
    ///
    /// Structural errors (duplicate id) are returned to the caller and leave
    /// the snapshot unchanged.
    pub fn dispatch(&self, action: impl Into<Action>) -> StoreResult<()> {
        let action = action.into();
        let action_type = action.action_type();

        let next = {
            let _serial = lock(&self.inner.dispatch_lock);
            let current = self.get_state();
            let next = match current.reduce(action) {
                Ok(next) => Arc::new(next),
                Err(e) => {
                    error!(action = %action_type, error = %e, "Action rejected by reducer");
                    return Err(e);
                }
            };
            *self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner) = Arc::clone(&next);
            next
        };

        debug!(action = %action_type, "Committed action");
        self.notify(&next);
        Ok(())
    }

    fn notify(&self, state: &RootState) {
        let listeners: Vec<Listener> = lock(&self.inner.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(state);
        }
    }

    // ── Synchronous intents ──────────────────────────────────────

    /// Adds one reaction of kind `reaction` (a wire name such as `"heart"`)
    /// to a post. Unknown kinds are rejected; absent posts are a no-op.
    pub fn reaction_added(&self, post_id: &PostId, reaction: &str) -> StoreResult<()> {
        let reaction = ReactionKind::from_str(reaction)
            .map_err(|_| StoreError::InvalidReactionKind(reaction.to_string()))?;
        self.dispatch(PostsAction::ReactionAdded {
            post_id: post_id.clone(),
            reaction,
        })
    }

    /// Overwrites a post's title and content. Absent posts are a no-op.
    pub fn post_updated(
        &self,
        post_id: &PostId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> StoreResult<()> {
        self.dispatch(PostsAction::PostUpdated {
            post_id: post_id.clone(),
            title: title.into(),
            content: content.into(),
        })
    }

    /// Marks every held notification read.
    pub fn all_notifications_read(&self) -> StoreResult<()> {
        self.dispatch(NotificationsAction::AllNotificationsRead)
    }

    // ── Async operations ─────────────────────────────────────────

    /// Fetches every post and merges the result into the table.
    ///
    /// The `Pending` transition is applied before this returns. Must be
    /// called from within a tokio runtime, like every async operation.
    pub fn fetch_posts(&self) -> OperationHandle<Vec<Post>> {
        let path = self.inner.config.posts_path.clone();
        self.run_operation(
            Operation::FetchPosts,
            |phase| PostsAction::FetchPosts(phase).into(),
            move |client| async move { api::fetch_posts(client.as_ref(), &path).await },
        )
    }

    /// Sends `draft` to the server and inserts the returned post.
    ///
    /// An incomplete draft is rejected before any request is made.
    pub fn add_new_post(&self, draft: PostDraft) -> OperationHandle<Post> {
        if let Err(reason) = draft.validate() {
            return future::ready(Err(StoreError::InvalidDraft(reason))).boxed();
        }
        let path = self.inner.config.posts_path.clone();
        self.run_operation(
            Operation::AddNewPost,
            |phase| PostsAction::AddNewPost(phase).into(),
            move |client| async move { api::create_post(client.as_ref(), &path, &draft).await },
        )
    }

    /// Fetches every user and replaces the users table.
    pub fn fetch_users(&self) -> OperationHandle<Vec<User>> {
        let path = self.inner.config.users_path.clone();
        self.run_operation(
            Operation::FetchUsers,
            |phase| UsersAction::FetchUsers(phase).into(),
            move |client| async move { api::fetch_users(client.as_ref(), &path).await },
        )
    }

    /// Fetches notifications newer than the newest one held.
    pub fn fetch_notifications(&self) -> OperationHandle<Vec<Notification>> {
        let state = self.get_state();
        let path = api::notifications_since_path(
            &self.inner.config.notifications_path,
            state.notifications.latest_timestamp(),
        );
        self.run_operation(
            Operation::FetchNotifications,
            |phase| NotificationsAction::FetchNotifications(phase).into(),
            move |client| async move { api::fetch_notifications(client.as_ref(), &path).await },
        )
    }

    /// Dispatches `Pending` now, then spawns a task that performs the
    /// request and dispatches `Fulfilled` or `Rejected` when it settles.
    fn run_operation<T, Map, Req, Fut>(
        &self,
        operation: Operation,
        to_action: Map,
        request: Req,
    ) -> OperationHandle<T>
    where
        T: Clone + Send + 'static,
        Map: Fn(AsyncPhase<T>) -> Action + Send + 'static,
        Req: FnOnce(Arc<dyn ApiClient>) -> Fut,
        Fut: Future<Output = TransportResult<T>> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            error!(%operation, "Operation started outside a tokio runtime");
            return future::ready(Err(StoreError::NoRuntime(operation))).boxed();
        };
        if let Err(e) = self.dispatch(to_action(AsyncPhase::Pending)) {
            return future::ready(Err(e)).boxed();
        }
        info!(%operation, "Operation started");

        let response = request(Arc::clone(&self.inner.client));
        let task = runtime.spawn(settle(self.clone(), operation, to_action, response));

        task.map(move |joined| {
            joined.unwrap_or_else(|e| {
                error!(%operation, error = %e, "Operation task failed");
                Err(StoreError::Interrupted {
                    operation,
                    message: e.to_string(),
                })
            })
        })
        .boxed()
    }
}

/// Awaits the transport call and dispatches its outcome.
async fn settle<T, Map, Fut>(
    store: Store,
    operation: Operation,
    to_action: Map,
    response: Fut,
) -> StoreResult<T>
where
    T: Clone,
    Map: Fn(AsyncPhase<T>) -> Action,
    Fut: Future<Output = TransportResult<T>>,
{
    match response.await {
        Ok(payload) => {
            if let Err(e) = store.dispatch(to_action(AsyncPhase::Fulfilled(payload.clone()))) {
                // The payload could not be merged; settle the tracker anyway.
                store.dispatch(to_action(AsyncPhase::Rejected(e.to_string())))?;
                return Err(e);
            }
            info!(%operation, "Operation fulfilled");
            Ok(payload)
        }
        Err(e) => {
            let message = e.to_string();
            warn!(%operation, error = %message, "Operation rejected");
            store.dispatch(to_action(AsyncPhase::Rejected(message.clone())))?;
            Err(StoreError::Rejected { operation, message })
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
