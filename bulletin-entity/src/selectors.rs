//! Read accessors generated from an adapter.

use crate::{Entity, EntityTable};
use std::marker::PhantomData;
use std::sync::Arc;

/// Accessors for a table that lives somewhere inside a larger state `S`.
///
/// None of these cache; each call reads the table as it is.
pub struct EntitySelectors<S, T: Entity> {
    project: fn(&S) -> &EntityTable<T>,
    _state: PhantomData<fn(&S)>,
}

impl<S, T: Entity> Clone for EntitySelectors<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T: Entity> Copy for EntitySelectors<S, T> {}

impl<S, T: Entity> EntitySelectors<S, T> {
    pub(crate) const fn new(project: fn(&S) -> &EntityTable<T>) -> Self {
        Self {
            project,
            _state: PhantomData,
        }
    }

    /// The table this selector set reads.
    #[must_use]
    pub fn table<'a>(&self, state: &'a S) -> &'a EntityTable<T> {
        (self.project)(state)
    }

    /// Every entity, in table order.
    #[must_use]
    pub fn select_all(&self, state: &S) -> Vec<Arc<T>> {
        self.table(state).iter().cloned().collect()
    }

    /// The entity with `id`, if present.
    #[must_use]
    pub fn select_by_id(&self, state: &S, id: &T::Id) -> Option<Arc<T>> {
        self.table(state).get(id).cloned()
    }

    /// The id sequence.
    #[must_use]
    pub fn select_ids<'a>(&self, state: &'a S) -> &'a [T::Id] {
        self.table(state).ids()
    }

    /// Number of entities.
    #[must_use]
    pub fn select_total(&self, state: &S) -> usize {
        self.table(state).len()
    }
}
