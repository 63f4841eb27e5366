//! The plain-data commands recorded by a [CommandBuffer](crate::commands::CommandBuffer).
//! None of them reference live storage.

use crate::components::TagIndex;
use crate::entities::{Entity, Script};
use std::any::TypeId;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum EntityAction {
	Create,
	Delete,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct EntityCommand {
	pub entity: Entity,
	pub action: EntityAction,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum TagAction {
	Add,
	Remove,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TagCommand {
	pub entity: Entity,
	pub tag: TagIndex,
	pub action: TagAction,
}

/// `Set` updates the value of a component without changing the entity's component types.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ComponentAction {
	Add,
	Set,
	Remove,
}

pub(crate) struct ComponentCommand<T> {
	pub entity: Entity,
	pub action: ComponentAction,
	pub value: T,
}

pub(crate) enum ScriptAction {
	Add(Box<dyn Script>),
	Remove(TypeId),
}

pub(crate) struct ScriptCommand {
	pub entity: Entity,
	pub action: ScriptAction,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum ChildAction {
	Add,
	Remove,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct ChildCommand {
	pub parent: Entity,
	pub child: Entity,
	pub action: ChildAction,
}
