//! [Archetypes](Archetype) are columnar tables, one per unique combination of
//! [components](crate::components::Component) and [tags](crate::components::Tag).
//!
//! An [entity](crate::entities::Entity) lives in exactly one archetype at a time;
//! adding or removing a component or tag moves it to another one.

mod archetype_macros;
mod archetype_instance;
mod archetype_registry;

pub use archetype_instance::{Archetype, ArchetypeInstance};

pub(crate) use archetype_registry::*;
