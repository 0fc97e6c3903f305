//! Error types for the store layer.

use crate::request::Operation;
use bulletin_entity::EntityError;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced to the caller of a dispatch or an async operation.
///
/// Transport failures never appear here directly: they are recorded in the
/// operation's request state and come back as [`StoreError::Rejected`] from
/// the operation handle, with the same message as the state's `error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Structural table error (duplicate id on insert).
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// A reaction kind outside the closed set.
    #[error("invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    /// A post draft that cannot be saved.
    #[error("invalid post draft: {0}")]
    InvalidDraft(String),

    /// An async operation settled with a failure.
    #[error("{message}")]
    Rejected { operation: Operation, message: String },

    /// An async operation was started with no tokio runtime to run it on.
    /// No transition was applied.
    #[error("no tokio runtime to run {0}")]
    NoRuntime(Operation),

    /// The task running an async operation panicked or was cancelled by a
    /// runtime shutdown before it settled.
    #[error("{operation} interrupted: {message}")]
    Interrupted { operation: Operation, message: String },
}

impl StoreError {
    /// Returns true for a duplicate-id insert.
    #[must_use]
    pub fn is_duplicate_id(&self) -> bool {
        matches!(self, Self::Entity(EntityError::DuplicateId { .. }))
    }
}
