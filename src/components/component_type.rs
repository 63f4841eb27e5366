use crate::components::{ComponentIndex, TagIndex};
use crate::data_structures::AnyVec;
use std::hash::{Hash, Hasher};

/// A piece of data that can be attached to an [entity](crate::entities::Entity).
///
/// Implemented through #\[derive([`Component`])].
/// Values are moved between archetypes and never cloned; newly added
/// columns are filled with [Default::default].
pub trait Component
where
	Self: 'static + Default + Send + Sync,
{
	fn component_index() -> ComponentIndex;
}

/// A data-less marker that can be attached to an [entity](crate::entities::Entity).
///
/// Implemented through #\[derive([`Tag`])].
pub trait Tag
where
	Self: 'static,
{
	fn tag_index() -> TagIndex;
}

/// A runtime representation of a type implementing the [`Component`] trait.
///
/// Resolved once at registration; archetypes use it to create their columns.
#[derive(Clone)]
pub struct ComponentType {
	index: ComponentIndex,
	name: &'static str,
	make_vec: fn() -> Box<dyn AnyVec>,
}

impl ComponentType {
	pub(crate) fn new(index: ComponentIndex, name: &'static str, make_vec: fn() -> Box<dyn AnyVec>) -> Self {
		Self { index, name, make_vec }
	}

	/// Returns the [`ComponentType`] of T.
	pub fn of<T: Component>() -> Self {
		crate::components::component_type(T::component_index())
	}

	pub const fn index(&self) -> ComponentIndex {
		self.index
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}

	pub(crate) fn make_vec(&self) -> Box<dyn AnyVec> {
		(self.make_vec)()
	}
}

impl Eq for ComponentType {}

impl PartialEq<Self> for ComponentType {
	fn eq(&self, other: &Self) -> bool {
		self.index == other.index
	}
}

impl Hash for ComponentType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.index.hash(state)
	}
}
