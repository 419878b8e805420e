use std::any::Any;
use std::rc::Rc;

use crate::component::Component;
use crate::entity::Entity;
use crate::error::Error;
use crate::sparse_set::SparseSet;
use crate::world::World;

/// A per-type vtable of free functions dispatching to a component's lifecycle
/// hooks through a type-erased `&dyn Any`.
///
/// One `Hooks` value is built (via [`Hooks::of`]) exactly once, when a
/// component type's [`Storage`] is first created - not once per value - since
/// every value of a given type shares the same hook implementations.
#[derive(Clone, Copy)]
pub(crate) struct Hooks {
    pub added: fn(&dyn Any, Entity),
    pub removed: fn(&dyn Any, Entity),
    pub free: fn(&dyn Any, &mut World, Entity),
}

impl Hooks {
    pub fn of<C: Component>() -> Self {
        Self { added: added::<C>, removed: removed::<C>, free: free::<C> }
    }
}

fn added<C: Component>(any: &dyn Any, entity: Entity) {
    any.downcast_ref::<C>().expect("Hooks::of::<C> type mismatch").added(entity);
}

fn removed<C: Component>(any: &dyn Any, entity: Entity) {
    any.downcast_ref::<C>().expect("Hooks::of::<C> type mismatch").removed(entity);
}

fn free<C: Component>(any: &dyn Any, world: &mut World, entity: Entity) {
    any.downcast_ref::<C>().expect("Hooks::of::<C> type mismatch").free(world, entity);
}

/// Sparse-set-backed storage of one component type's values, keyed by entity.
///
/// Holds components behind `Rc<dyn Any>` rather than owning them outright, so
/// that [`crate::index::IndexBase`] can keep a non-owning alias to the exact
/// same allocation for fast iteration without requiring components to be
/// `Clone`. Downcasting back to the concrete type happens at every read.
#[derive(Default)]
pub struct Storage {
    set: SparseSet,
    entities: Vec<Entity>,
    values: Vec<Rc<dyn Any>>,
    hooks: Option<Hooks>,
}

impl Storage {
    pub fn new() -> Self {
        Self { set: SparseSet::new(), entities: Vec::new(), values: Vec::new(), hooks: None }
    }

    /// An empty storage already bound to `C`'s lifecycle hooks.
    pub fn new_for<C: Component>() -> Self {
        Self { hooks: Some(Hooks::of::<C>()), ..Self::new() }
    }

    /// `true` once [`new_for`](Self::new_for) has bound this storage to a type.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.hooks.is_some()
    }

    pub(crate) fn hooks(&self) -> Option<&Hooks> {
        self.hooks.as_ref()
    }

    #[inline]
    pub fn has(&self, entity: Entity) -> bool {
        self.set.has(entity.index())
    }

    /// Write `value` for `entity`, overwriting any existing component of this
    /// type. Returns [`Error::SparseSetOverflow`] if the entity's index
    /// exceeds the storage's hard capacity.
    pub fn insert(&mut self, entity: Entity, value: Rc<dyn Any>) -> Result<(), Error> {
        let v = entity.index();
        if let Some(dense_index) = self.set.get(v) {
            self.values[dense_index] = value;
            return Ok(());
        }
        let dense_index = self.set.add(v)?;
        debug_assert_eq!(dense_index, self.values.len());
        self.entities.push(entity);
        self.values.push(value);
        Ok(())
    }

    /// Fetch the type-erased component alias for `entity`.
    pub fn get_erased(&self, entity: Entity) -> Option<&Rc<dyn Any>> {
        let dense_index = self.set.get(entity.index())?;
        Some(&self.values[dense_index])
    }

    /// Fetch and downcast the component for `entity`, cloning the `Rc`.
    pub fn get<C: Component>(&self, entity: Entity) -> Option<Rc<C>> {
        self.get_erased(entity)?.clone().downcast::<C>().ok()
    }

    /// Remove and return `entity`'s component, if present. Swaps the last
    /// dense element into the vacated slot, mirroring the underlying
    /// `SparseSet`'s own swap-remove so both stay in lockstep.
    pub fn remove(&mut self, entity: Entity) -> Option<Rc<dyn Any>> {
        let v = entity.index();
        let dense_index = self.set.get(v)?;
        let last_index = self.values.len() - 1;
        self.entities.swap(dense_index, last_index);
        self.values.swap(dense_index, last_index);
        let _ = self.entities.pop();
        let removed = self.values.pop();
        self.set.remove(v);
        removed
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(entity, component)` pairs in current dense order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &Rc<dyn Any>)> {
        self.entities.iter().copied().zip(self.values.iter())
    }
}
