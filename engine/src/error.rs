//! The error type shared by every fallible public operation in this crate.
//!
//! There is no exception hierarchy in Rust, so the programmer-error conditions
//! that the reference design raises synchronously are instead returned as
//! `Result::Err(Error)`. Lookup-shaped operations (`get`, `has`, `remove`,
//! `get_singleton`) never produce one of these - they return `None`/`false`.

use std::fmt;

use crate::entity::Entity;

/// Everything that can go wrong calling into this crate's public API.
///
/// Deliberately not built on `thiserror`: the variants are few, the messages
/// are simple, and a hand-written `Display` keeps the dependency list short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `emplace` targeted an entity that is not currently alive.
    DeadEntity { component: &'static str, entity: Entity },
    /// `create`, `insert` or `index` was given the same component type twice.
    DuplicateComponentType { component: &'static str, context: &'static str },
    /// `IndexBase::emplace` was called with a type outside the index's type-set.
    TypeNotInIndex { component: &'static str, index_types: Vec<&'static str> },
    /// A `SparseSet` was asked to hold a value at or above its hard capacity.
    SparseSetOverflow { value: usize, max: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DeadEntity { component, entity } => {
                write!(f, "cannot emplace {component} on {entity}: entity is not alive")
            }
            Error::DuplicateComponentType { component, context } => {
                write!(f, "duplicate component type {component} in {context}")
            }
            Error::TypeNotInIndex { component, index_types } => {
                write!(
                    f,
                    "component type {component} is not part of this index (index types: {})",
                    index_types.join(", ")
                )
            }
            Error::SparseSetOverflow { value, max } => {
                write!(f, "sparse set value {value} exceeds maximum capacity {max}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_entity_message_mentions_component_and_entity() {
        let err = Error::DeadEntity { component: "Position", entity: Entity::from_raw(7) };
        let msg = err.to_string();
        assert!(msg.contains("Position"));
        assert!(msg.contains("Entity(7)"));
    }

    #[test]
    fn overflow_message_mentions_both_numbers() {
        let err = Error::SparseSetOverflow { value: 560_000, max: 560_000 };
        let msg = err.to_string();
        assert!(msg.contains("560000"));
    }
}
