//! CRUD operations over an [`EntityTable`].
//!
//! Every operation takes the table by `&mut`. Callers that publish
//! immutable snapshots clone the table first (entities are shared through
//! `Arc`, so the clone is shallow) and mutate the clone.

use crate::selectors::EntitySelectors;
use crate::{Entity, EntityError, EntityResult, EntityTable};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

/// Orders two entities. Applied to the whole id set after every write.
pub type SortComparer<T> = fn(&T, &T) -> Ordering;

/// Stateless set of operations for one entity kind.
#[derive(Debug)]
pub struct EntityAdapter<T: Entity> {
    sort_comparer: Option<SortComparer<T>>,
}

impl<T: Entity> Clone for EntityAdapter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Entity> Copy for EntityAdapter<T> {}

impl<T: Entity> Default for EntityAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> EntityAdapter<T> {
    /// An adapter that keeps insertion order.
    #[must_use]
    pub const fn new() -> Self {
        Self { sort_comparer: None }
    }

    /// An adapter that keeps `ids` sorted by `comparer`.
    #[must_use]
    pub const fn sorted(comparer: SortComparer<T>) -> Self {
        Self {
            sort_comparer: Some(comparer),
        }
    }

    /// Returns whether a comparator is configured.
    #[must_use]
    pub const fn is_sorted(&self) -> bool {
        self.sort_comparer.is_some()
    }

    /// An empty table.
    #[must_use]
    pub fn initial_state(&self) -> EntityTable<T> {
        EntityTable::new()
    }

    /// Binds the read accessors to a projection of a larger state.
    #[must_use]
    pub fn get_selectors<S>(&self, project: fn(&S) -> &EntityTable<T>) -> EntitySelectors<S, T> {
        EntitySelectors::new(project)
    }

    // ── Inserts ──────────────────────────────────────────────────

    /// Inserts a new entity. Fails if its id is already present.
    pub fn add_one(&self, table: &mut EntityTable<T>, entity: T) -> EntityResult<()> {
        if table.contains(entity.id()) {
            return Err(EntityError::DuplicateId {
                id: entity.id().to_string(),
            });
        }
        insert(table, entity);
        self.sort(table);
        Ok(())
    }

    /// Inserts several new entities. Fails without touching the table if any
    /// id is already present or repeated within the batch.
    pub fn add_many(
        &self,
        table: &mut EntityTable<T>,
        entities: impl IntoIterator<Item = T>,
    ) -> EntityResult<()> {
        let entities: Vec<T> = entities.into_iter().collect();
        let mut seen = HashSet::with_capacity(entities.len());
        for entity in &entities {
            if table.contains(entity.id()) || !seen.insert(entity.id()) {
                return Err(EntityError::DuplicateId {
                    id: entity.id().to_string(),
                });
            }
        }
        for entity in entities {
            insert(table, entity);
        }
        self.sort(table);
        Ok(())
    }

    /// Inserts the entity, or merges all of its fields into the existing one.
    pub fn upsert_one(&self, table: &mut EntityTable<T>, entity: T) {
        upsert(table, entity);
        self.sort(table);
    }

    /// [`upsert_one`](Self::upsert_one) for a batch; sorts once at the end.
    pub fn upsert_many(&self, table: &mut EntityTable<T>, entities: impl IntoIterator<Item = T>) {
        for entity in entities {
            upsert(table, entity);
        }
        self.sort(table);
    }

    /// Merges only the fields carried by `patch`. If `id` is absent the
    /// patch must be complete enough to build a new entity.
    pub fn upsert_partial(
        &self,
        table: &mut EntityTable<T>,
        id: T::Id,
        patch: T::Patch,
    ) -> EntityResult<()> {
        if let Some(existing) = table.entities.get_mut(&id) {
            Arc::make_mut(existing).apply(&patch);
        } else {
            let display = id.to_string();
            let entity =
                T::from_patch(id, patch).ok_or(EntityError::Incomplete { id: display })?;
            insert(table, entity);
        }
        self.sort(table);
        Ok(())
    }

    /// Replaces the whole table with `entities`.
    pub fn set_all(&self, table: &mut EntityTable<T>, entities: impl IntoIterator<Item = T>) {
        table.ids.clear();
        table.entities.clear();
        for entity in entities {
            upsert(table, entity);
        }
        self.sort(table);
    }

    // ── Updates ──────────────────────────────────────────────────

    /// Merges `changes` into the entity with `id`. Absent ids are a no-op.
    /// Returns whether an entity was updated.
    pub fn update_one(&self, table: &mut EntityTable<T>, id: &T::Id, changes: &T::Patch) -> bool {
        self.update_with(table, id, |entity| entity.apply(changes))
    }

    /// Runs `f` on the entity with `id` if it exists.
    /// Returns whether an entity was updated.
    pub fn update_with(
        &self,
        table: &mut EntityTable<T>,
        id: &T::Id,
        f: impl FnOnce(&mut T),
    ) -> bool {
        let Some(existing) = table.entities.get_mut(id) else {
            trace!(%id, "update skipped: id not present");
            return false;
        };
        f(Arc::make_mut(existing));
        self.sort(table);
        true
    }

    /// Offers every entity to `f`; entities for which it returns a patch are
    /// updated, the rest stay shared. Returns how many were updated.
    pub fn update_all(
        &self,
        table: &mut EntityTable<T>,
        mut f: impl FnMut(&T) -> Option<T::Patch>,
    ) -> usize {
        let mut updated = 0;
        for entity in table.entities.values_mut() {
            if let Some(patch) = f(entity) {
                Arc::make_mut(entity).apply(&patch);
                updated += 1;
            }
        }
        if updated > 0 {
            self.sort(table);
        }
        updated
    }

    // ── Removal ──────────────────────────────────────────────────

    /// Removes one entity. Absent ids are a no-op.
    pub fn remove_one(&self, table: &mut EntityTable<T>, id: &T::Id) -> bool {
        if table.entities.remove(id).is_none() {
            return false;
        }
        table.ids.retain(|existing| existing != id);
        true
    }

    /// Removes several entities. Returns how many were present.
    pub fn remove_many<'a>(
        &self,
        table: &mut EntityTable<T>,
        ids: impl IntoIterator<Item = &'a T::Id>,
    ) -> usize {
        let removed: HashSet<&T::Id> = ids
            .into_iter()
            .filter(|id| table.entities.contains_key(*id))
            .collect();
        for id in &removed {
            table.entities.remove(*id);
        }
        table.ids.retain(|id| !removed.contains(id));
        removed.len()
    }

    /// Empties the table.
    pub fn remove_all(&self, table: &mut EntityTable<T>) {
        table.ids.clear();
        table.entities.clear();
    }

    // ── Reads ────────────────────────────────────────────────────

    /// Entities in `ids` order.
    #[must_use]
    pub fn select_all(&self, table: &EntityTable<T>) -> Vec<Arc<T>> {
        table.iter().cloned().collect()
    }

    /// One entity, if present.
    #[must_use]
    pub fn select_by_id(&self, table: &EntityTable<T>, id: &T::Id) -> Option<Arc<T>> {
        table.get(id).cloned()
    }

    fn sort(&self, table: &mut EntityTable<T>) {
        let Some(compare) = self.sort_comparer else {
            return;
        };
        let entities = &table.entities;
        table.ids.sort_by(|a, b| match (entities.get(a), entities.get(b)) {
            (Some(a), Some(b)) => compare(a, b),
            _ => Ordering::Equal,
        });
    }
}

fn insert<T: Entity>(table: &mut EntityTable<T>, entity: T) {
    let id = entity.id().clone();
    table.ids.push(id.clone());
    table.entities.insert(id, Arc::new(entity));
}

fn upsert<T: Entity>(table: &mut EntityTable<T>, entity: T) {
    match table.entities.get_mut(entity.id()) {
        Some(existing) => Arc::make_mut(existing).apply(&entity.to_patch()),
        None => insert(table, entity),
    }
}
