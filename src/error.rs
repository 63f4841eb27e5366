//! Errors reported by the [entity store](crate::entities::EntityStore) and
//! [command buffers](crate::commands::CommandBuffer).
//!
//! Usage errors leave the affected buffer or store untouched.
//! A failed playback is not rolled back: every phase that completed before the error stays applied.

use crate::components::ComponentIndex;
use crate::entities::Entity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	/// The entity does not exist, or was already deleted.
	#[error("entity not found: {0}")]
	EntityNotFound(Entity),

	/// A value was set for a component the entity does not have.
	#[error("entity {entity} does not contain component {component}")]
	ComponentNotFound { entity: Entity, component: ComponentIndex },

	/// The operation is not valid in the current state, e.g. recording into a returned buffer.
	#[error("invalid operation: {0}")]
	InvalidOperation(&'static str),

	/// An argument is out of its valid range.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
