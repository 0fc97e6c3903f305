//! Error types for entity table operations.

use thiserror::Error;

/// Result type for entity table operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Structural errors raised by adapter operations.
///
/// These indicate a logic defect in the caller, not a transient condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// `add` was called with an id that is already present.
    #[error("duplicate entity id: {id}")]
    DuplicateId { id: String },

    /// A partial upsert targeted an absent id without carrying every
    /// required field.
    #[error("cannot insert entity {id}: patch is missing required fields")]
    Incomplete { id: String },
}
