//! Runtime indices tied to [Component] and [Tag] types.
//!
//! Developers shouldn't rely on the numeric value of an index, as it is not stable between program re-runs:
//! indices are handed out in order of first use.
//! They are used to populate the [bit-sets](crate::data_structures::BitSet) identifying
//! [archetypes](crate::archetypes::Archetype) and to address per-type command logs.

use crate::components::{Component, ComponentType, Tag};
use crate::data_structures::{BitSet, TypedVec};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::fmt::{Display, Formatter};

/// The maximum number of distinct [Component] types per process.
pub const MAX_COMPONENTS: usize = BitSet::CAPACITY;

/// The maximum number of distinct [Tag] types per process.
pub const MAX_TAGS: usize = BitSet::CAPACITY;

lazy_static! {
	static ref COMPONENT_TYPES: RwLock<Vec<ComponentType>> = RwLock::new(Vec::new());
	static ref TAG_NAMES: RwLock<Vec<&'static str>> = RwLock::new(Vec::new());
}

/// A process-wide identifier for a type implementing the [`Component`] trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct ComponentIndex {
	value: u16,
}

/// A process-wide identifier for a type implementing the [`Tag`] trait.
#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug)]
pub struct TagIndex {
	value: u16,
}

impl ComponentIndex {
	/// Get the [ComponentIndex] of the type `T`.
	#[inline(always)]
	pub fn of<T: Component>() -> ComponentIndex {
		T::component_index()
	}

	#[inline(always)]
	pub(crate) const fn from_value(value: usize) -> Self {
		Self { value: value as u16 }
	}

	#[inline(always)]
	pub const fn value(&self) -> usize {
		self.value as usize
	}

	/// The name the type was registered with.
	pub fn name(&self) -> &'static str {
		component_type(*self).name()
	}
}

impl TagIndex {
	/// Get the [TagIndex] of the type `T`.
	#[inline(always)]
	pub fn of<T: Tag>() -> TagIndex {
		T::tag_index()
	}

	#[inline(always)]
	pub(crate) const fn from_value(value: usize) -> Self {
		Self { value: value as u16 }
	}

	#[inline(always)]
	pub const fn value(&self) -> usize {
		self.value as usize
	}

	/// The name the type was registered with.
	pub fn name(&self) -> &'static str {
		TAG_NAMES.read()[self.value()]
	}
}

impl Display for ComponentIndex {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl Display for TagIndex {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Registers `T` and returns its new [ComponentIndex]. **Should not be called from user code.**
///
/// To be called from code generated by #[derive([Component])], exactly once per type.
#[doc(hidden)]
pub fn register_component<T: Component>(name: &'static str) -> ComponentIndex {
	let mut types = COMPONENT_TYPES.write();
	let value = types.len();
	assert!(
		value < MAX_COMPONENTS,
		"This is an insane number of components. Please seek help."
	);

	let index = ComponentIndex::from_value(value);
	types.push(ComponentType::new(index, name, TypedVec::<T>::boxed));
	tracing::debug!(component = name, index = value, "registered component type");
	index
}

/// Registers `T` and returns its new [TagIndex]. **Should not be called from user code.**
///
/// To be called from code generated by #[derive([Tag])], exactly once per type.
#[doc(hidden)]
pub fn register_tag<T: Tag>(name: &'static str) -> TagIndex {
	let mut names = TAG_NAMES.write();
	let value = names.len();
	assert!(value < MAX_TAGS, "This is an insane number of tags. Please seek help.");

	names.push(name);
	tracing::debug!(tag = name, index = value, "registered tag type");
	TagIndex::from_value(value)
}

/// Looks up the registered [ComponentType] for `index`.
pub fn component_type(index: ComponentIndex) -> ComponentType {
	COMPONENT_TYPES.read()[index.value()].clone()
}
