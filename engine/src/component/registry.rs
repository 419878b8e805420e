use std::any::TypeId;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use log::debug;

use crate::component::{Component, Id};

/// A thread-safe component registry.
///
/// Assigns every distinct Rust type that implements [`Component`] a stable
/// [`Id`] on first registration. Reads (the common path - looking up the id
/// of an already-registered type) go through `DashMap`'s lock-free hash
/// table; only the very first `register::<C>()` call for a given `C` touches
/// a lock, to append the type's display name to the reverse-lookup table.
///
/// Why thread-safe at all, when [`crate::world::World`] itself is `!Sync`?
/// Because a process may run several independent worlds, each on its own
/// thread, and they must still agree on which integer id means "Position".
#[derive(Default)]
pub struct Registry {
    type_map: DashMap<TypeId, Id>,
    names: RwLock<Vec<&'static str>>,
    next_id: AtomicU32,
}

impl Registry {
    #[inline]
    pub fn new() -> Self {
        Self { type_map: DashMap::new(), names: RwLock::new(Vec::new()), next_id: AtomicU32::new(0) }
    }

    /// Register `C`, returning its [`Id`]. Idempotent: calling this again for
    /// the same type returns the id it was first assigned.
    pub fn register<C: Component>(&self) -> Id {
        let type_id = TypeId::of::<C>();

        if let Some(id) = self.type_map.get(&type_id) {
            return *id;
        }

        *self
            .type_map
            .entry(type_id)
            .or_insert_with(|| {
                let raw = self.next_id.fetch_add(1, Ordering::Relaxed);
                let id = Id::new(raw);
                let name = std::any::type_name::<C>();
                debug!("registered component type {name} as {id:?}");

                let mut names = self.names.write().unwrap();
                let index = id.index();
                if index >= names.len() {
                    names.resize(index + 1, "<unknown>");
                }
                names[index] = name;

                id
            })
            .value()
    }

    /// The [`Id`] assigned to `C`, if it has ever been registered.
    #[inline]
    pub fn get<C: Component>(&self) -> Option<Id> {
        self.type_map.get(&TypeId::of::<C>()).map(|entry| *entry.value())
    }

    /// Display name of the type registered under `id`, for error messages and
    /// logging. Returns `"<unknown>"` for an id this registry never issued.
    pub fn name_of(&self, id: Id) -> &'static str {
        self.names.read().unwrap().get(id.index()).copied().unwrap_or("<unknown>")
    }

    /// Total number of distinct component types registered so far.
    pub fn len(&self) -> usize {
        self.names.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Position;
    impl Component for Position {}

    struct Velocity;
    impl Component for Velocity {}

    #[test]
    fn registering_distinct_types_yields_distinct_ids() {
        // Given
        let registry = Registry::new();

        // When
        let pos_id = registry.register::<Position>();
        let vel_id = registry.register::<Velocity>();

        // Then
        assert_ne!(pos_id, vel_id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn registering_the_same_type_twice_is_idempotent() {
        let registry = Registry::new();
        let first = registry.register::<Position>();
        let second = registry.register::<Position>();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn get_on_unregistered_type_is_none() {
        let registry = Registry::new();
        assert_eq!(registry.get::<Position>(), None);
    }

    #[test]
    fn name_of_reports_the_registered_type_name() {
        let registry = Registry::new();
        let id = registry.register::<Position>();
        assert!(registry.name_of(id).ends_with("Position"));
    }

    #[test]
    fn name_of_unknown_id_is_a_placeholder() {
        let registry = Registry::new();
        assert_eq!(registry.name_of(Id::new(999)), "<unknown>");
    }

    #[test]
    fn concurrent_registration_agrees_on_one_id_per_type() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(Registry::new());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.register::<Position>())
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|&id| id == results[0]));
    }
}
