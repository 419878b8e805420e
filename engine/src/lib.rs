//! A sparse-set-backed entity-component-system core.
//!
//! Entities are plain integer handles (see [`entity`]). Components are
//! arbitrary Rust types implementing [`component::Component`], stored one
//! sparse set per type (see [`component`]). [`world::World`] ties everything
//! together: it owns every entity, every per-type storage, and every
//! installed [`index::IndexBase`], keeping them coherent through `create`,
//! `insert`, `emplace`, `remove` and `destroy`.
//!
//! Two query styles are available once a [`world::World`] exists:
//! - [`view::View`] - a lightweight callback query over a tuple of types,
//!   walking the first type's storage each call.
//! - [`index::IndexIterator`], built from a [`world::IndexSpec`] via
//!   [`world::World::index`] - a precomputed, incrementally-maintained
//!   record store, cheaper to re-iterate at the cost of upkeep on every
//!   matching mutation.

// Lets `#[derive(Component)]`'s generated `::sparse_ecs::component::Component`
// path resolve from within this crate's own tests and examples, not just from
// downstream crates.
extern crate self as sparse_ecs;

pub mod bundle;
pub mod component;
pub mod entity;
pub mod error;
pub mod index;
pub mod sparse_set;
pub mod trie;
mod util;
pub mod view;
pub mod world;

pub use bundle::Bundle;
pub use component::{Component, Id as ComponentId};
pub use entity::Entity;
pub use error::Error;
pub use index::{Exposure, IndexIterator};
pub use view::View;
pub use world::{IndexSpec, IndexSpecBuilder, World};

pub use sparse_ecs_macros::Component;
