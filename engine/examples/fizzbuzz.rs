//! Classic FizzBuzz, driven entirely by component presence: no `i % 15`
//! branch anywhere, just a `View<(Fizz, Buzz)>` over whichever entities
//! happen to hold both tag components.

use sparse_ecs::{Component, World};

#[derive(Component)]
struct Number(u32);

#[derive(Component)]
struct Fizz;

#[derive(Component)]
struct Buzz;

fn main() {
    env_logger::init();

    let mut world = World::new();

    for i in 0..100u32 {
        let e = world.create((Number(i),)).unwrap();
        if i % 3 == 0 {
            world.emplace(e, Fizz).unwrap();
        }
        if i % 5 == 0 {
            world.emplace(e, Buzz).unwrap();
        }
    }

    let view: sparse_ecs::View<(Number, Fizz, Buzz)> = world.view();
    let mut count = 0;
    view.each(&world, |_entity, (number, _, _)| {
        println!("fizzbuzz: {}", number.0);
        count += 1;
        true
    });

    assert_eq!(count, 7, "expected i in {{0,15,30,45,60,75,90}}");
}
