//! Domain entities held by the bulletin cache.
//!
//! Every payload the remote API can send is a closed `serde` type here:
//! - [`Post`] / [`PostPatch`] / [`PostDraft`]: posts, partial post updates, and
//!   the body sent when creating a post
//! - [`User`] / [`UserPatch`]: user accounts
//! - [`Notification`] / [`NotificationPatch`]: activity notifications
//!
//! Each entity implements [`bulletin_entity::Entity`] so it can live in an
//! `EntityTable`. Unknown or malformed shapes fail at deserialization.

mod notification;
mod post;
mod user;

pub use notification::{Notification, NotificationPatch};
pub use post::{Post, PostDraft, PostPatch, EXCERPT_LEN};
pub use user::{User, UserPatch};
