use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A value with a stable identity that can be stored in an [`EntityTable`].
///
/// `Patch` is the partial shape of the entity: every field optional, the id
/// excluded. Applying a patch overwrites exactly the fields it carries.
///
/// [`EntityTable`]: crate::EntityTable
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    /// Identity type. Unique within a table.
    type Id: Clone + Debug + Display + Eq + Hash + Ord + Send + Sync + 'static;

    /// Partial update of this entity.
    type Patch: Clone + Debug + Default + Send + Sync;

    /// Returns the entity's identity.
    fn id(&self) -> &Self::Id;

    /// Shallow-merges `patch` into `self`.
    fn apply(&mut self, patch: &Self::Patch);

    /// Expresses the whole entity (minus its id) as a patch.
    fn to_patch(&self) -> Self::Patch;

    /// Builds a new entity from an id and a patch.
    /// Returns `None` when the patch is missing a required field.
    fn from_patch(id: Self::Id, patch: Self::Patch) -> Option<Self>;
}
