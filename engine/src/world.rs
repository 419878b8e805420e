//! The `World`: owner of every entity, every per-type component storage, and
//! every installed index. Every other module in this crate exists to be
//! assembled here.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::marker::PhantomData;
use std::rc::Rc;

use log::trace;

use crate::bundle::Bundle;
use crate::component::{Component, Id, Registry, Storage};
use crate::entity::{Entity, IdPool};
use crate::error::Error;
use crate::index::{Exposure, IndexBase, IndexIterator};
use crate::trie::Trie;
use crate::view::{View, ViewTuple};

/// One alias in an [`IndexSpec`]: a user-facing name bound to a component
/// type and whether that type is exposed on the resulting iterator.
struct IndexSpecEntry {
    #[allow(dead_code)]
    alias: &'static str,
    type_id: TypeId,
    exposure: Exposure,
    register: fn(&World) -> Id,
}

fn register_type<C: Component>(world: &World) -> Id {
    world.register::<C>()
}

/// An ordered `{alias: (type, exposure)}` shape describing an index, built
/// with [`IndexSpecBuilder`] rather than a raw map literal - Rust has no
/// object literal with heterogeneous typed values the way the source's
/// dynamic-language spec does.
pub struct IndexSpec {
    entries: Vec<IndexSpecEntry>,
}

/// Builds an [`IndexSpec`] one alias at a time.
#[derive(Default)]
pub struct IndexSpecBuilder {
    entries: Vec<IndexSpecEntry>,
}

impl IndexSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `C` under `alias`, exposed on the resulting iterator.
    pub fn bind<C: Component>(mut self, alias: &'static str) -> Self {
        self.entries.push(IndexSpecEntry {
            alias,
            type_id: TypeId::of::<C>(),
            exposure: Exposure::Bound,
            register: register_type::<C>,
        });
        self
    }

    /// Require `C` for membership under `alias`, but never expose it.
    pub fn witness<C: Component>(mut self, alias: &'static str) -> Self {
        self.entries.push(IndexSpecEntry {
            alias,
            type_id: TypeId::of::<C>(),
            exposure: Exposure::Witness,
            register: register_type::<C>,
        });
        self
    }

    pub fn build(self) -> IndexSpec {
        IndexSpec { entries: self.entries }
    }
}

fn first_duplicate(ids: &[Id]) -> Option<Id> {
    let mut sorted = ids.to_vec();
    sorted.sort();
    sorted.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
}

/// The entity-component-system core.
///
/// Single-threaded by design: the `PhantomData<*mut ()>` marker makes `World`
/// `!Sync` and `!Send`, enforcing at compile time that one world is only ever
/// mutated from the thread that owns it. [`Registry`] is the one exception -
/// it is shared across however many independent worlds a process runs.
pub struct World {
    entities: HashSet<Entity>,
    id_pool: IdPool,
    registry: Registry,
    components: Vec<Storage>,
    index_by_components: Trie<Id, Rc<RefCell<IndexBase>>>,
    indexes_by_component: Vec<Vec<Rc<RefCell<IndexBase>>>>,
    _not_send: PhantomData<*mut ()>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: HashSet::new(),
            id_pool: IdPool::new(),
            registry: Registry::new(),
            components: Vec::new(),
            index_by_components: Trie::new(),
            indexes_by_component: Vec::new(),
            _not_send: PhantomData,
        }
    }

    /// Register `C` (idempotent) and return its id. Requires only `&self`:
    /// the registry is the one piece of interior-mutable shared state.
    pub fn register<C: Component>(&self) -> Id {
        self.registry.register::<C>()
    }

    fn ensure_storage<C: Component>(&mut self, id: Id) {
        if id.index() >= self.components.len() {
            self.components.resize_with(id.index() + 1, Storage::new);
        }
        if !self.components[id.index()].is_initialized() {
            self.components[id.index()] = Storage::new_for::<C>();
        }
    }

    fn ensure_indexes_slot(&mut self, id: Id) -> &mut Vec<Rc<RefCell<IndexBase>>> {
        if id.index() >= self.indexes_by_component.len() {
            self.indexes_by_component.resize_with(id.index() + 1, Vec::new);
        }
        &mut self.indexes_by_component[id.index()]
    }

    fn indexes_for(&self, id: Id) -> Vec<Rc<RefCell<IndexBase>>> {
        self.indexes_by_component.get(id.index()).cloned().unwrap_or_default()
    }

    fn storage_has(&self, id: Id, entity: Entity) -> bool {
        self.components.get(id.index()).is_some_and(|s| s.has(entity))
    }

    fn storage_get_erased(&self, id: Id, entity: Entity) -> Option<Rc<dyn Any>> {
        self.components.get(id.index())?.get_erased(entity).cloned()
    }

    fn sorted_type_set(&self, entity: Entity) -> Vec<Id> {
        let mut types: Vec<Id> = self
            .components
            .iter()
            .enumerate()
            .filter(|(_, storage)| storage.has(entity))
            .map(|(idx, _)| Id::new(idx as u32))
            .collect();
        types.sort();
        types
    }

    /// Write `value` into `C`'s storage and call its `added` hook. Does not
    /// touch any index - used by [`Bundle::store`] so that `create`/`insert`
    /// can seed indexes once, over the entity's full final type-set, rather
    /// than once per component.
    pub(crate) fn write_component<C: Component>(
        &mut self,
        entity: Entity,
        value: C,
    ) -> Result<Id, Error> {
        let id = self.registry.register::<C>();
        self.ensure_storage::<C>(id);
        let erased: Rc<dyn Any> = Rc::new(value);
        self.components[id.index()].insert(entity, Rc::clone(&erased))?;
        if let Some(hooks) = self.components[id.index()].hooks().copied() {
            (hooks.added)(&*erased, entity);
        }
        Ok(id)
    }

    /// Find every installed index whose type-set is a subset of `types`, and
    /// add `entity` to each (provided it still holds every one of that
    /// index's types by the time this runs - always true right after
    /// `create`/`insert` finish writing, but kept as a check for safety).
    fn seed_indexes_for_type_set(&mut self, entity: Entity, types: &[Id]) {
        let matches: Vec<Rc<RefCell<IndexBase>>> = {
            let mut it = self.index_by_components.subsequences(types);
            let mut found = Vec::new();
            while let Some(base) = it.next() {
                found.push(Rc::clone(base));
            }
            found
        };
        for base in matches {
            let index_types = base.borrow().types().to_vec();
            let mut comps = Vec::with_capacity(index_types.len());
            let mut all_present = true;
            for ty in &index_types {
                match self.storage_get_erased(*ty, entity) {
                    Some(c) => comps.push(c),
                    None => {
                        all_present = false;
                        break;
                    }
                }
            }
            if all_present {
                base.borrow_mut().add(entity, comps);
            }
        }
    }

    /// Try to promote `entity` into every index that tracks `id`, after a
    /// single-component `emplace`. Overwrites the slot if `entity` is already
    /// indexed; otherwise gathers the index's other required types and adds
    /// it fresh if every one of them is now present.
    fn promote_into_indexes(&mut self, id: Id, entity: Entity, value: &Rc<dyn Any>) {
        for base in self.indexes_for(id) {
            let promoted = base
                .borrow_mut()
                .emplace(entity, id, Rc::clone(value))
                .expect("indexes_by_component invariant: id is one of this index's types");
            if promoted {
                continue;
            }
            let index_types = base.borrow().types().to_vec();
            let mut comps = Vec::with_capacity(index_types.len());
            let mut all_present = true;
            for ty in &index_types {
                if *ty == id {
                    comps.push(Rc::clone(value));
                } else if let Some(c) = self.storage_get_erased(*ty, entity) {
                    comps.push(c);
                } else {
                    all_present = false;
                    break;
                }
            }
            if all_present {
                base.borrow_mut().add(entity, comps);
            }
        }
    }

    /// Allocate a fresh entity and attach every component in `bundle`.
    /// Rejects a bundle naming the same component type twice without
    /// allocating an id or writing anything.
    pub fn create<B: Bundle>(&mut self, bundle: B) -> Result<Entity, Error> {
        let ids = B::ids(self);
        if let Some(dup) = first_duplicate(&ids) {
            return Err(Error::DuplicateComponentType {
                component: self.registry.name_of(dup),
                context: "create",
            });
        }
        let raw = self.id_pool.reserve();
        if raw == 0 {
            return Err(Error::SparseSetOverflow { value: 0, max: IdPool::DEFAULT_MAX as usize });
        }
        let entity = Entity::from_raw(raw);
        self.entities.insert(entity);
        bundle.store(self, entity)?;
        let types = self.sorted_type_set(entity);
        self.seed_indexes_for_type_set(entity, &types);
        Ok(entity)
    }

    /// Like [`create`](Self::create) but with a caller-supplied entity id.
    /// Preserves any components the entity already held of types not named
    /// in `bundle`. If `entity`'s raw id has never been reserved by this
    /// world's [`IdPool`], it is marked occupied so a later `create` never
    /// reissues it.
    pub fn insert<B: Bundle>(&mut self, entity: Entity, bundle: B) -> Result<(), Error> {
        let ids = B::ids(self);
        if let Some(dup) = first_duplicate(&ids) {
            return Err(Error::DuplicateComponentType {
                component: self.registry.name_of(dup),
                context: "insert",
            });
        }
        if !entity.is_reserved() {
            self.id_pool.occupy(entity.raw());
        }
        self.entities.insert(entity);
        bundle.store(self, entity)?;
        let types = self.sorted_type_set(entity);
        self.seed_indexes_for_type_set(entity, &types);
        Ok(())
    }

    /// Attach a single component to an already-live entity, promoting it into
    /// any index whose required types are now all present.
    pub fn emplace<C: Component>(&mut self, entity: Entity, value: C) -> Result<Id, Error> {
        if !self.entities.contains(&entity) {
            return Err(Error::DeadEntity { component: std::any::type_name::<C>(), entity });
        }
        let id = self.write_component(entity, value)?;
        let erased = self.storage_get_erased(id, entity).expect("just written above");
        self.promote_into_indexes(id, entity, &erased);
        Ok(id)
    }

    /// Remove `entity`'s `C` component, if present, demoting it out of any
    /// index that required it. Ownership of the removed value passes to the
    /// caller, who may downcast and invoke `free` themselves - `remove` never
    /// calls `free` on the caller's behalf.
    pub fn remove<C: Component>(&mut self, entity: Entity) -> Option<Rc<C>> {
        let id = self.registry.get::<C>()?;
        let storage = self.components.get_mut(id.index())?;
        let erased = storage.remove(entity)?;
        if let Some(hooks) = storage.hooks().copied() {
            (hooks.removed)(&*erased, entity);
        }
        for base in self.indexes_for(id) {
            base.borrow_mut().remove(entity);
        }
        erased.downcast::<C>().ok()
    }

    /// Fetch `entity`'s `C` component, if any.
    pub fn get<C: Component>(&self, entity: Entity) -> Option<Rc<C>> {
        let id = self.registry.get::<C>()?;
        self.components.get(id.index())?.get::<C>(entity)
    }

    /// Whether `entity` currently holds a `C` component.
    pub fn has<C: Component>(&self, entity: Entity) -> bool {
        match self.registry.get::<C>() {
            Some(id) => self.storage_has(id, entity),
            None => false,
        }
    }

    /// Whether `entity` is currently live.
    pub fn exists(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    fn destroy_internal(&mut self, entity: Entity, release_id: bool) -> bool {
        if !self.entities.remove(&entity) {
            return false;
        }
        let mut types: Vec<Id> = Vec::new();
        let mut values: Vec<Rc<dyn Any>> = Vec::new();
        for (idx, storage) in self.components.iter_mut().enumerate() {
            if let Some(value) = storage.remove(entity) {
                let id = Id::new(idx as u32);
                if let Some(hooks) = storage.hooks().copied() {
                    (hooks.removed)(&*value, entity);
                }
                types.push(id);
                values.push(value);
            }
        }
        let matches: Vec<Rc<RefCell<IndexBase>>> = {
            let mut it = self.index_by_components.subsequences(&types);
            let mut found = Vec::new();
            while let Some(base) = it.next() {
                found.push(Rc::clone(base));
            }
            found
        };
        for base in matches {
            base.borrow_mut().remove(entity);
        }
        if release_id && !entity.is_reserved() {
            self.id_pool.release(entity.raw());
        }
        for (id, value) in types.into_iter().zip(values.into_iter()) {
            let hooks = self.components.get(id.index()).and_then(|s| s.hooks()).copied();
            if let Some(hooks) = hooks {
                trace!("invoking free hook for {entity} (component id {id:?})");
                (hooks.free)(&*value, self, entity);
            }
        }
        true
    }

    /// Destroy `entity`: remove it from the live set, every per-type
    /// storage, and every index, then invoke each removed component's `free`
    /// hook - late enough that a `free` hook may itself call `destroy` on a
    /// different entity. Returns `false` if `entity` was not live.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        self.destroy_internal(entity, true)
    }

    /// Destroy every live entity. Unlike a sequence of individual `destroy`
    /// calls, the ids freed by `clear` are **not** returned to the `IdPool` -
    /// entities that existed before a `clear` are permanently retired, never
    /// reissued by a later `create`.
    pub fn clear(&mut self) {
        let all: Vec<Entity> = self.entities.iter().copied().collect();
        for entity in all {
            self.destroy_internal(entity, false);
        }
    }

    /// Every currently live entity.
    pub fn all(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    pub(crate) fn entities_with_component(&self, id: Id) -> impl Iterator<Item = Entity> + '_ {
        self.components.get(id.index()).into_iter().flat_map(|s| s.iter().map(|(e, _)| e))
    }

    /// A reusable callback-style query over every entity holding all of `Ts`.
    pub fn view<Ts: ViewTuple>(&self) -> View<Ts> {
        View::new(self)
    }

    /// Build (or reuse) an [`IndexBase`] matching `spec`'s type-set, seeding
    /// it from every currently live entity that already qualifies, and
    /// return a fresh [`IndexIterator`] over it. Rejects a spec naming the
    /// same component type under two different aliases.
    pub fn index(&mut self, spec: IndexSpec) -> Result<IndexIterator, Error> {
        let mut entries: Vec<(Id, TypeId, Exposure)> = Vec::with_capacity(spec.entries.len());
        for entry in &spec.entries {
            let id = (entry.register)(self);
            entries.push((id, entry.type_id, entry.exposure));
        }
        entries.sort_by_key(|(id, ..)| *id);
        if let Some(w) = entries.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::DuplicateComponentType {
                component: self.registry.name_of(w[0].0),
                context: "index",
            });
        }

        let types: Vec<Id> = entries.iter().map(|(id, ..)| *id).collect();
        let bound: Vec<(TypeId, usize)> = entries
            .iter()
            .enumerate()
            .filter(|(_, (_, _, exposure))| *exposure == Exposure::Bound)
            .map(|(pos, (_, type_id, _))| (*type_id, pos))
            .collect();

        let base = if let Some(existing) = self.index_by_components.get(&types) {
            Rc::clone(existing)
        } else {
            let fresh = Rc::new(RefCell::new(IndexBase::new(types.clone())));
            self.index_by_components.set(&types, Rc::clone(&fresh));
            for &id in &types {
                self.ensure_indexes_slot(id).push(Rc::clone(&fresh));
            }
            let live: Vec<Entity> = self.entities.iter().copied().collect();
            for entity in live {
                if types.iter().all(|&t| self.storage_has(t, entity)) {
                    let comps: Vec<Rc<dyn Any>> = types
                        .iter()
                        .map(|&t| self.storage_get_erased(t, entity).expect("checked has above"))
                        .collect();
                    fresh.borrow_mut().add(entity, comps);
                }
            }
            log::debug!("seeded new index over {} type(s)", types.len());
            fresh
        };

        Ok(IndexIterator::new(base, bound))
    }

    /// Attach `value` to the singleton entity. Added to the live set on
    /// first use.
    pub fn register_singleton<C: Component>(&mut self, value: C) -> Result<Id, Error> {
        self.entities.insert(Entity::SINGLETON);
        self.emplace(Entity::SINGLETON, value)
    }

    pub fn get_singleton<C: Component>(&self) -> Option<Rc<C>> {
        self.get::<C>(Entity::SINGLETON)
    }

    pub fn remove_singleton<C: Component>(&mut self) -> Option<Rc<C>> {
        self.remove::<C>(Entity::SINGLETON)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
