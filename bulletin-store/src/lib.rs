//! Client-side normalized store for bulletin.
//!
//! A [`Store`] holds one immutable [`RootState`] snapshot made of three
//! slices: posts, users and notifications. Callers change it only by
//! dispatching actions, either directly (reactions, edits, mark-all-read) or
//! through async operations (`fetch_posts`, `add_new_post`, `fetch_users`,
//! `fetch_notifications`) that dispatch `Pending`, then `Fulfilled` or
//! `Rejected`, around one transport call.
//!
//! - [`posts`], [`users`], [`notifications`]: slice state and reducers
//! - [`request`]: the per-operation lifecycle tracker
//! - [`selectors`]: derived views, memoized where they allocate
//! - [`Store`]: dispatch, subscribe and the async operations

mod api;
mod config;
mod error;
mod memo;
pub mod notifications;
pub mod posts;
pub mod request;
pub mod selectors;
mod state;
mod store;
pub mod users;

pub use api::notifications_since_path;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memo::Memoized;
pub use request::{AsyncPhase, Operation, RequestState, RequestStatus};
pub use state::{Action, RootState};
pub use store::{OperationHandle, Store, Subscription};
