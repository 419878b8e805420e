//! Tuples of components accepted by [`crate::world::World::create`] and
//! [`crate::world::World::insert`], generated for every arity via the same
//! recursive tuple macros [`View`](crate::view::View) uses.

use crate::component::{Component, Id};
use crate::entity::Entity;
use crate::error::Error;
use crate::world::World;
use crate::{all_tuples, for_every_tuple};

/// A fixed-size collection of distinct component values to attach to one
/// entity in a single call. Implemented for the empty tuple (no components)
/// and for every non-empty tuple up to arity sixteen.
pub trait Bundle: Sized {
    /// Register (if needed) and return this bundle's component ids, in tuple
    /// order, without writing anything - used to detect duplicate types
    /// before any storage is touched.
    fn ids(world: &World) -> Vec<Id>;

    /// Write every component into its per-type storage and call each one's
    /// `added` hook. Does not touch any index - `World::create`/`insert` seed
    /// indexes afterward, in one pass over the entity's full type-set, rather
    /// than per component.
    fn store(self, world: &mut World, entity: Entity) -> Result<(), Error>;
}

impl Bundle for () {
    fn ids(_world: &World) -> Vec<Id> {
        Vec::new()
    }

    fn store(self, _world: &mut World, _entity: Entity) -> Result<(), Error> {
        Ok(())
    }
}

macro_rules! impl_bundle_tuple {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head: Component, $($tail: Component),*> Bundle for ($head, $($tail,)*) {
            fn ids(world: &World) -> Vec<Id> {
                vec![world.register::<$head>(), $(world.register::<$tail>()),*]
            }

            #[allow(non_snake_case)]
            fn store(self, world: &mut World, entity: Entity) -> Result<(), Error> {
                let ($head, $($tail,)*) = self;
                world.write_component(entity, $head)?;
                $( world.write_component(entity, $tail)?; )*
                Ok(())
            }
        }
    };
}

all_tuples!(impl_bundle_tuple);

#[cfg(test)]
mod tests {
    use super::*;

    struct Position(f32);
    impl Component for Position {}

    struct Velocity(f32);
    impl Component for Velocity {}

    #[test]
    fn empty_bundle_has_no_ids_or_values() {
        let mut world = World::new();
        assert!(<() as Bundle>::ids(&world).is_empty());
        let e = Entity::from_raw(1);
        assert!(().store(&mut world, e).is_ok());
    }

    #[test]
    fn single_and_pair_bundles_register_distinct_ids_in_order() {
        let world = World::new();
        let single = <(Position,) as Bundle>::ids(&world);
        let pair = <(Position, Velocity) as Bundle>::ids(&world);
        assert_eq!(single.len(), 1);
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0], single[0]);
    }

    #[test]
    fn duplicate_type_bundle_yields_duplicate_ids() {
        let world = World::new();
        let ids = <(Position, Position) as Bundle>::ids(&world);
        assert_eq!(ids[0], ids[1]);
    }
}
