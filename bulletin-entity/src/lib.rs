//! Normalized entity storage for bulletin.
//!
//! Entities of one kind are kept in an [`EntityTable`]: an ordered id
//! sequence plus an id → entity map. The table never changes shape on its
//! own; every mutation goes through an [`EntityAdapter`], which also owns the
//! optional sort comparator and re-sorts the whole id sequence after each
//! write.
//!
//! - [`Entity`]: what a type must provide to live in a table
//! - [`EntityTable`]: the normalized container
//! - [`EntityAdapter`]: add/upsert/set-all/update/remove operations
//! - [`EntitySelectors`]: read accessors bound to a projection of a larger state

mod adapter;
mod entity;
mod error;
mod selectors;
mod table;

pub use adapter::{EntityAdapter, SortComparer};
pub use entity::Entity;
pub use error::{EntityError, EntityResult};
pub use selectors::EntitySelectors;
pub use table::EntityTable;
