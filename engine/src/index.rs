//! Multi-component indexes: a linearised record store over every entity
//! whose component set is a superset of the index's type-set.
//!
//! An [`IndexBase`] is owned by [`crate::world::World`] and kept coherent
//! with world state by the world's own `create`/`emplace`/`remove`/`destroy`
//! machinery, routed through the component-id trie (see [`crate::trie`]). An
//! [`IndexIterator`] is a cheap, reusable cursor over one `IndexBase`.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::component::{Component, Id};
use crate::entity::Entity;

/// Whether an alias in an [`crate::world::IndexSpec`] exposes its component on
/// the resulting iterator, or merely requires the entity to carry it.
///
/// Models the reference design's `_`-prefixed alias convention as an explicit
/// field rather than a string-sniffed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    Bound,
    Witness,
}

struct Record {
    entity: Entity,
    components: Vec<Rc<dyn Any>>,
}

/// One precomputed record store for a fixed, sorted set of component types.
///
/// Tombstones vacated slots rather than swap-removing them, so that any
/// `IndexIterator` mid-walk never has a live record shift out from under its
/// cursor - see the concurrency note on [`IndexIterator`].
pub struct IndexBase {
    types: Vec<Id>,
    storage: Vec<Option<Record>>,
    entity_slot: HashMap<Entity, usize>,
    free_slots: Vec<usize>,
    add_ver: u32,
    rem_ver: u32,
    add_ver_observed: bool,
    rem_ver_observed: bool,
}

impl IndexBase {
    pub fn new(types: Vec<Id>) -> Self {
        Self {
            types,
            storage: Vec::new(),
            entity_slot: HashMap::new(),
            free_slots: Vec::new(),
            add_ver: 0,
            rem_ver: 0,
            add_ver_observed: true,
            rem_ver_observed: true,
        }
    }

    pub fn types(&self) -> &[Id] {
        &self.types
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_slot.contains_key(&entity)
    }

    /// Record `entity`'s current components, in `self.types()` order.
    ///
    /// Reuses an existing slot if `entity` is already indexed (this is also
    /// how `emplace`'s "entity not yet in the index" fallback promotes an
    /// entity: the caller gathers all required components first, then calls
    /// `add`), otherwise pops from the free list or appends.
    pub fn add(&mut self, entity: Entity, components: Vec<Rc<dyn Any>>) {
        debug_assert_eq!(components.len(), self.types.len());
        if let Some(&slot) = self.entity_slot.get(&entity) {
            self.storage[slot] = Some(Record { entity, components });
            self.mark_added();
            return;
        }
        let slot = if let Some(slot) = self.free_slots.pop() {
            self.storage[slot] = Some(Record { entity, components });
            slot
        } else {
            self.storage.push(Some(Record { entity, components }));
            self.storage.len() - 1
        };
        self.entity_slot.insert(entity, slot);
        self.mark_added();
    }

    /// Overwrite the slot for component type `ty` on an already-indexed
    /// `entity`. Returns `Ok(false)` if `entity` is not yet in this index
    /// (the caller should fall back to [`add`](Self::add) once it has
    /// gathered every required type). Returns `Err(())` if `ty` is not one
    /// of this index's types at all - a programmer error the caller (the
    /// `World`) turns into [`crate::error::Error::TypeNotInIndex`].
    pub fn emplace(&mut self, entity: Entity, ty: Id, value: Rc<dyn Any>) -> Result<bool, ()> {
        let Some(pos) = self.types.iter().position(|&t| t == ty) else {
            return Err(());
        };
        let Some(&slot) = self.entity_slot.get(&entity) else {
            return Ok(false);
        };
        if let Some(record) = self.storage[slot].as_mut() {
            record.components[pos] = value;
        }
        Ok(true)
    }

    /// Tombstone `entity`'s record. Returns `false` if it was not present.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(slot) = self.entity_slot.remove(&entity) else {
            return false;
        };
        self.storage[slot] = None;
        self.free_slots.push(slot);
        self.mark_removed();
        true
    }

    /// Read the add-version counter and arm it so the next successful `add`
    /// bumps it again.
    pub fn observe_add_ver(&mut self) -> u32 {
        self.add_ver_observed = true;
        self.add_ver
    }

    /// Read the remove-version counter and arm it so the next successful
    /// `remove` bumps it again.
    pub fn observe_rem_ver(&mut self) -> u32 {
        self.rem_ver_observed = true;
        self.rem_ver
    }

    fn mark_added(&mut self) {
        if self.add_ver_observed {
            self.add_ver = self.add_ver.wrapping_add(1);
            self.add_ver_observed = false;
        }
    }

    fn mark_removed(&mut self) {
        if self.rem_ver_observed {
            self.rem_ver = self.rem_ver.wrapping_add(1);
            self.rem_ver_observed = false;
        }
    }
}

/// A reusable cursor over one [`IndexBase`], bound to a fixed subset of its
/// types to expose (the index's "witness" types, if any, are required for
/// membership but never readable here).
///
/// Because every component type appears at most once on a given entity (and
/// therefore at most once in any one index), a type is its own sufficient
/// "alias" for exposure - `get::<C>()` replaces the reference design's
/// string-keyed alias field access.
pub struct IndexIterator {
    base: Rc<RefCell<IndexBase>>,
    bound: Vec<(TypeId, usize)>,
    cur: Option<usize>,
    entity: Option<Entity>,
    add_ver_seen: u32,
    rem_ver_seen: u32,
}

impl IndexIterator {
    pub(crate) fn new(base: Rc<RefCell<IndexBase>>, bound: Vec<(TypeId, usize)>) -> Self {
        let (add_ver_seen, rem_ver_seen) = {
            let b = base.borrow();
            (b.add_ver, b.rem_ver)
        };
        Self { base, bound, cur: None, entity: None, add_ver_seen, rem_ver_seen }
    }

    /// Reset the cursor to just before the first record. Returns `self` for
    /// the `for (it.start(); it.next(); )` idiom.
    pub fn start(&mut self) -> &mut Self {
        self.cur = None;
        self.entity = None;
        self
    }

    /// Advance to the next live record. `false` once exhausted.
    pub fn next(&mut self) -> bool {
        let base = self.base.borrow();
        let mut idx = match self.cur {
            None => 0,
            Some(i) => i + 1,
        };
        while idx < base.storage.len() {
            if let Some(record) = &base.storage[idx] {
                drop(base);
                self.cur = Some(idx);
                self.entity = Some(record.entity);
                return true;
            }
            idx += 1;
        }
        self.cur = Some(idx);
        self.entity = None;
        false
    }

    /// `start()` then `next()`; `true` iff a first record was found.
    pub fn first(&mut self) -> bool {
        self.start();
        self.next()
    }

    /// The entity at the current cursor position, if any.
    pub fn entity(&self) -> Option<Entity> {
        self.entity
    }

    /// Fetch the current record's `C` component, if `C` is a bound (non-witness)
    /// type of this index and the cursor is on a live record.
    pub fn get<C: Component>(&self) -> Option<Rc<C>> {
        let slot = self.cur?;
        let (_, pos) = self.bound.iter().find(|(t, _)| *t == TypeId::of::<C>())?;
        let base = self.base.borrow();
        let record = base.storage[slot].as_ref()?;
        record.components[*pos].clone().downcast::<C>().ok()
    }

    /// Has at least one successful `add` happened since the last call? The
    /// first call after construction always returns `false`.
    pub fn was_added_to(&mut self) -> bool {
        let current = self.base.borrow().add_ver;
        let changed = current != self.add_ver_seen;
        self.add_ver_seen = current;
        changed
    }

    /// Has at least one successful `remove` happened since the last call?
    /// The first call after construction always returns `false`.
    pub fn was_removed_from(&mut self) -> bool {
        let current = self.base.borrow().rem_ver;
        let changed = current != self.rem_ver_seen;
        self.rem_ver_seen = current;
        changed
    }

    /// `was_added_to() || was_removed_from()` - evaluates both (no short-circuit),
    /// so both snapshots always advance together.
    pub fn was_changed(&mut self) -> bool {
        let added = self.was_added_to();
        let removed = self.was_removed_from();
        added || removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rc(v: i32) -> Rc<dyn Any> {
        Rc::new(v)
    }

    #[test]
    fn add_then_contains() {
        let mut base = IndexBase::new(vec![Id::new(0), Id::new(1)]);
        let e = Entity::from_raw(1);
        base.add(e, vec![rc(1), rc(2)]);
        assert!(base.contains(e));
    }

    #[test]
    fn remove_tombstones_and_frees_the_slot() {
        // Given
        let mut base = IndexBase::new(vec![Id::new(0)]);
        let e = Entity::from_raw(1);
        base.add(e, vec![rc(1)]);

        // When
        let removed = base.remove(e);

        // Then
        assert!(removed);
        assert!(!base.contains(e));
        assert!(!base.remove(e));
    }

    #[test]
    fn free_slots_are_reused_before_appending() {
        // Given two entities, the first then removed
        let mut base = IndexBase::new(vec![Id::new(0)]);
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        base.add(a, vec![rc(1)]);
        base.remove(a);

        // When a third entity is added
        let c = Entity::from_raw(3);
        base.add(b, vec![rc(2)]);
        base.add(c, vec![rc(3)]);

        // Then storage never grew past 2 slots (the freed one was reused)
        assert_eq!(base.storage.len(), 2);
    }

    #[test]
    fn emplace_rejects_types_outside_the_index() {
        let mut base = IndexBase::new(vec![Id::new(0)]);
        let e = Entity::from_raw(1);
        base.add(e, vec![rc(1)]);
        assert!(base.emplace(e, Id::new(99), rc(5)).is_err());
    }

    #[test]
    fn emplace_on_absent_entity_returns_false() {
        let mut base = IndexBase::new(vec![Id::new(0)]);
        let e = Entity::from_raw(1);
        assert_eq!(base.emplace(e, Id::new(0), rc(5)), Ok(false));
    }

    #[test]
    fn add_version_coalesces_between_observes() {
        // Given
        let mut base = IndexBase::new(vec![Id::new(0)]);
        let first_ver = base.observe_add_ver();

        // When two adds happen before the next observe
        base.add(Entity::from_raw(1), vec![rc(1)]);
        base.add(Entity::from_raw(2), vec![rc(2)]);

        // Then the counter only moved once
        let second_ver = base.observe_add_ver();
        assert_eq!(second_ver, first_ver + 1);

        // And a third add after the observe bumps it again
        base.add(Entity::from_raw(3), vec![rc(3)]);
        assert_eq!(base.observe_add_ver(), second_ver + 1);
    }

    #[test]
    fn iterator_walks_live_records_and_skips_tombstones() {
        // Given
        let mut base = IndexBase::new(vec![Id::new(0)]);
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        base.add(a, vec![rc(10)]);
        base.add(b, vec![rc(20)]);
        base.remove(a);

        let base = Rc::new(RefCell::new(base));
        let mut it = IndexIterator::new(base, vec![]);

        // When / Then
        it.start();
        assert!(it.next());
        assert_eq!(it.entity(), Some(b));
        assert!(!it.next());
    }

    #[test]
    fn was_added_to_is_false_on_first_call_then_reports_changes() {
        let base = Rc::new(RefCell::new(IndexBase::new(vec![Id::new(0)])));
        let mut it = IndexIterator::new(Rc::clone(&base), vec![]);

        assert!(!it.was_added_to());

        base.borrow_mut().add(Entity::from_raw(1), vec![rc(1)]);
        assert!(it.was_added_to());
        assert!(!it.was_added_to());
    }

    #[test]
    fn was_removed_from_reports_once_per_change() {
        let base = Rc::new(RefCell::new(IndexBase::new(vec![Id::new(0)])));
        let e = Entity::from_raw(1);
        base.borrow_mut().add(e, vec![rc(1)]);
        let mut it = IndexIterator::new(Rc::clone(&base), vec![]);
        assert!(!it.was_removed_from());

        base.borrow_mut().remove(e);
        assert!(it.was_removed_from());
        assert!(!it.was_removed_from());
    }
}
