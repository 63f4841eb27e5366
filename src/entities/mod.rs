//! [Entities](Entity) represent the individual "things" in your game or simulation.
//!
//! An [Entity] doesn't store any data and has no associated behaviour;
//! instead, it identifies which pieces of data ([Components](crate::components::Component)) belong together.
//! The [EntityStore] maps every entity to its row inside an [archetype](crate::archetypes::Archetype).

mod id_allocator;
mod entity_tree;
mod entity_store;
mod entity_scripts;
mod entity_instance;

pub use entity_store::*;
pub use entity_instance::*;
pub use entity_scripts::Script;
pub use entity_scripts::ScriptAny;

pub(crate) use id_allocator::*;
pub(crate) use entity_tree::*;
pub(crate) use entity_scripts::*;
