//! Core type definitions for the bulletin entity cache.
//!
//! This crate defines the small, domain-agnostic value types every other
//! bulletin crate depends on:
//! - Identifier newtypes for posts, users and notifications
//! - ISO-8601 timestamps whose string order is their chronological order
//! - The closed set of post reaction kinds and their counters
//!
//! Entity shapes (posts, users, notifications) live in `bulletin-model`.

mod ids;
mod reaction;
mod timestamp;

pub use ids::{NotificationId, PostId, UserId};
pub use reaction::{ReactionKind, Reactions};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing core values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("invalid reaction kind: {0}")]
    InvalidReactionKind(String),
}
