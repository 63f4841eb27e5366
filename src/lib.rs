//! An in-memory archetype store for entities and their components, with deferred,
//! multi-producer command buffers that are played back on a single thread.

extern crate self as turbo_store;

pub mod data_structures;
pub mod components;
pub mod archetypes;
pub mod entities;
pub mod commands;
pub mod config;
pub mod error;

pub use lazy_static::lazy_static;

pub mod prelude {
	pub use crate::archetype;
	pub use crate::components::*;
	pub use crate::config::StoreConfig;
	pub use crate::error::{StoreError, StoreResult};
	pub use crate::archetypes::{Archetype, ArchetypeInstance};
	pub use crate::commands::{CommandBuffer, CommandBufferSynced};
	pub use crate::entities::{Entity, EntityNode, EntityStore, Script};
}

#[cfg(test)]
mod tests;
