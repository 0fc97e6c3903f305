//! The normalized container.

use crate::Entity;
use std::collections::HashMap;
use std::sync::Arc;

/// Entities of one kind, keyed by id, with an explicit ordering.
///
/// Invariant: `ids` holds no duplicates and is exactly the key set of
/// `entities`. Entities are held behind `Arc` so cloning a table to derive
/// the next snapshot shares every entity that is not touched.
#[derive(Debug)]
pub struct EntityTable<T: Entity> {
    pub(crate) ids: Vec<T::Id>,
    pub(crate) entities: HashMap<T::Id, Arc<T>>,
}

impl<T: Entity> EntityTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            entities: HashMap::new(),
        }
    }

    /// The id sequence in iteration order.
    #[must_use]
    pub fn ids(&self) -> &[T::Id] {
        &self.ids
    }

    /// Looks up one entity.
    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<&Arc<T>> {
        self.entities.get(id)
    }

    /// Returns whether `id` is present.
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.entities.contains_key(id)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates entities in `ids` order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> + '_ {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Returns true if both tables share every entity allocation and the
    /// same ordering. Used to detect that an operation changed nothing.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        self.ids == other.ids
            && self.entities.len() == other.entities.len()
            && self.entities.iter().all(|(id, e)| {
                other
                    .entities
                    .get(id)
                    .is_some_and(|o| Arc::ptr_eq(e, o))
            })
    }
}

impl<T: Entity> Default for EntityTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Clone for EntityTable<T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            entities: self.entities.clone(),
        }
    }
}

impl<T: Entity + PartialEq> PartialEq for EntityTable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids && self.entities == other.entities
    }
}
