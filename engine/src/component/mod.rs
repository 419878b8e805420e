//! Component identity, registration, and per-type storage.
//!
//! ## Architecture
//!
//! - [`Component`]: the marker trait every attachable data type implements,
//!   carrying the three optional lifecycle hooks the core invokes.
//! - [`Id`]: a stable small integer a [`Registry`] assigns to a Rust type,
//!   used everywhere a component type needs to be named in storage keys,
//!   trie paths, and index type-lists.
//! - [`Registry`]: process-wide, thread-safe `TypeId -> Id` table.
//! - [`Storage`]: the sparse-set-backed `entity -> Rc<dyn Any>` table for one
//!   component type ([`crate::world::World`] owns one per registered `Id`).
//!
//! ## Thread safety
//!
//! [`Registry`] is the one piece of genuinely concurrent-safe state in this
//! crate - worlds themselves are single-threaded (see [`crate::world::World`]),
//! but component *registration* must agree across however many worlds a
//! process happens to create, so it is backed by a lock-free-read `DashMap`.

mod registry;
mod storage;

pub use registry::Registry;
pub use storage::Storage;

use crate::entity::Entity;

/// A component identifier: the stable integer a [`Registry`] assigns to a
/// Rust type on first registration. Replaces the reference design's use of
/// the type's string name as a storage key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The index this id would use into a dense `Vec`-backed table.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// A trait representing an attachable data type in the ECS.
///
/// Implementors gain the three lifecycle hooks the core invokes at defined
/// points: `added` right after the component is stored, `removed` right
/// after it is taken out of storage (by an explicit `remove` or as part of
/// `destroy`), and `free` once an entity's full destruction has completed -
/// late enough that a `free` hook may safely call back into `destroy`.
///
/// All three hooks default to doing nothing, so `#[derive(Component)]`
/// (provided by `sparse_ecs_macros`) is sufficient for the common case of a
/// plain data component with no lifecycle behaviour.
pub trait Component: 'static + Send + Sync {
    /// Called once, immediately after this component is written into storage
    /// (by `create`, `insert`, or `emplace`).
    fn added(&self, _entity: Entity) {}

    /// Called once, immediately after this component is taken out of storage
    /// (by an explicit `remove`, or as part of `destroy`).
    fn removed(&self, _entity: Entity) {}

    /// Called once, after `entity` has been fully destroyed: removed from the
    /// live-entity set, every per-type storage, and every index. Safe to call
    /// `World::destroy` again from here (on a *different* entity).
    fn free(&self, _world: &mut crate::world::World, _entity: Entity) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_index_round_trips_through_u32() {
        let id = Id::from(7u32);
        assert_eq!(id.index(), 7);
    }
}
