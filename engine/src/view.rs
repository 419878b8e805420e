//! The legacy callback-style query: a thin façade over per-type storage,
//! parameterised at compile time by a tuple of component types rather than
//! by a runtime-synthesised closure.
//!
//! `World::view::<(Fizz, Buzz)>()` drives iteration from `Fizz`'s storage
//! (the tuple's first member, exactly as the reference design's generated
//! loop walks the first type) and looks up the rest per candidate entity.

use std::marker::PhantomData;
use std::rc::Rc;

use crate::component::{Component, Id};
use crate::entity::Entity;
use crate::world::World;
use crate::{all_tuples, for_every_tuple};

/// A tuple of [`Component`] types usable as a [`View`]'s query shape.
///
/// Implemented for every tuple arity from one to sixteen via [`all_tuples!`];
/// never implement this by hand.
pub trait ViewTuple: Sized {
    /// Owned, reference-counted handles to each matched component, in tuple order.
    type Refs;

    /// The component id driving iteration: the tuple's first member.
    fn driver_id(world: &World) -> Id;

    /// Fetch every member of the tuple for `entity`, or `None` if any is absent.
    fn fetch(world: &World, entity: Entity) -> Option<Self::Refs>;
}

macro_rules! impl_view_tuple {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head: Component, $($tail: Component),*> ViewTuple for ($head, $($tail,)*) {
            type Refs = (Rc<$head>, $(Rc<$tail>,)*);

            fn driver_id(world: &World) -> Id {
                world.register::<$head>()
            }

            #[allow(non_snake_case)]
            fn fetch(world: &World, entity: Entity) -> Option<Self::Refs> {
                let $head = world.get::<$head>(entity)?;
                $(let $tail = world.get::<$tail>(entity)?;)*
                Some(($head, $($tail,)*))
            }
        }
    };
}

all_tuples!(impl_view_tuple);

/// A query over entities holding every type in `Ts`, reusable across calls.
pub struct View<Ts: ViewTuple> {
    driver: Id,
    _marker: PhantomData<Ts>,
}

impl<Ts: ViewTuple> View<Ts> {
    pub(crate) fn new(world: &World) -> Self {
        Self { driver: Ts::driver_id(world), _marker: PhantomData }
    }

    /// Visit every entity holding all of `Ts`, in the driving storage's
    /// (unspecified but stable-between-mutations) order. `callback` returning
    /// `false` stops iteration early.
    ///
    /// The driving entity list is snapshotted before the first callback runs,
    /// so entities newly matching `Ts` as a side effect of the callback are
    /// never visited in the same pass - mutating `world` itself from within
    /// `callback` is out of scope for this `&World`-borrowing signature; a
    /// caller that needs to requires interior mutability (e.g. a `RefCell`),
    /// matching the single-writer concurrency model.
    pub fn each<F>(&self, world: &World, mut callback: F)
    where
        F: FnMut(Entity, &Ts::Refs) -> bool,
    {
        let entities: Vec<Entity> = world.entities_with_component(self.driver).collect();
        for entity in entities {
            if let Some(refs) = Ts::fetch(world, entity) {
                if !callback(entity, &refs) {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component as ComponentTrait;

    struct Fizz;
    impl ComponentTrait for Fizz {}

    struct Buzz;
    impl ComponentTrait for Buzz {}

    #[test]
    fn view_visits_only_entities_holding_every_type() {
        // Given
        let mut world = World::new();
        let fizz_only = world.create(()).unwrap();
        world.emplace(fizz_only, Fizz).unwrap();

        let both = world.create(()).unwrap();
        world.emplace(both, Fizz).unwrap();
        world.emplace(both, Buzz).unwrap();

        // When
        let view: View<(Fizz, Buzz)> = world.view();
        let mut hits = Vec::new();
        view.each(&world, |e, _| {
            hits.push(e);
            true
        });

        // Then
        assert_eq!(hits, vec![both]);
    }

    #[test]
    fn callback_returning_false_stops_early() {
        let mut world = World::new();
        for _ in 0..5 {
            let e = world.create(()).unwrap();
            world.emplace(e, Fizz).unwrap();
        }

        let view: View<(Fizz,)> = world.view();
        let mut count = 0;
        view.each(&world, |_, _| {
            count += 1;
            count < 2
        });

        assert_eq!(count, 2);
    }
}
