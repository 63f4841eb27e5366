use crate::components::{component_type, Component, ComponentTypes, Tags};
use crate::data_structures::{set_vec_capacity, AnyVec, TypedVec};
use crate::config::StoreConfig;
use crate::entities::Entity;

/// A handle to an [ArchetypeInstance] inside an [EntityStore](crate::entities::EntityStore).
///
/// The default handle refers to the archetype without components or tags.
#[derive(Default, Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub struct Archetype {
	pub(crate) index: usize,
}

impl Archetype {
	#[inline(always)]
	pub const fn index(&self) -> usize {
		self.index
	}
}

/// A columnar table holding every entity with the same component types and tags.
///
/// Row `i` of every column and of [entities](ArchetypeInstance::entities) describes the same entity,
/// and rows are dense: removing a row moves the last row into its place.
pub struct ArchetypeInstance {
	id: Archetype,
	types: ComponentTypes,
	tags: Tags,
	entities: Vec<Entity>,
	columns: Vec<Box<dyn AnyVec>>,

	capacity: usize,
	min_capacity: usize,
	shrink_divisor: usize,
}

impl ArchetypeInstance {
	pub(crate) fn new(id: Archetype, types: ComponentTypes, tags: Tags, config: &StoreConfig) -> Self {
		let columns = types.iter().map(|index| component_type(index).make_vec()).collect();
		let min_capacity = config.archetype_capacity();

		let mut instance = Self {
			id,
			types,
			tags,
			columns,
			entities: Vec::new(),
			capacity: 0,
			min_capacity,
			shrink_divisor: config.shrink_divisor(),
		};
		instance.set_capacity(min_capacity);
		instance
	}

	pub const fn id(&self) -> Archetype {
		self.id
	}

	pub const fn component_types(&self) -> ComponentTypes {
		self.types
	}

	pub const fn tags(&self) -> Tags {
		self.tags
	}

	/// The number of entities stored.
	#[inline(always)]
	pub fn len(&self) -> usize {
		self.entities.len()
	}

	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.entities.is_empty()
	}

	/// The number of rows the archetype can hold before growing. Always a power of two.
	pub const fn capacity(&self) -> usize {
		self.capacity
	}

	/// The entities stored, in row order.
	#[inline(always)]
	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	/// The values of component `T`, in row order.
	/// Returns `None` if the archetype does not contain `T`.
	pub fn column<T: Component>(&self) -> Option<&[T]> {
		let index = T::component_index();
		if !self.types.contains_index(index) {
			return None;
		}
		let column = self.columns[self.types.rank(index)].as_any();
		column.downcast_ref::<TypedVec<T>>().map(TypedVec::as_slice)
	}

	/// The values of component `T`, in row order.
	/// Returns `None` if the archetype does not contain `T`.
	pub fn column_mut<T: Component>(&mut self) -> Option<&mut [T]> {
		let index = T::component_index();
		if !self.types.contains_index(index) {
			return None;
		}
		let column = self.columns[self.types.rank(index)].as_any_mut();
		column.downcast_mut::<TypedVec<T>>().map(TypedVec::as_mut_slice)
	}

	pub fn get_component<T: Component>(&self, row: usize) -> Option<&T> {
		self.column::<T>()?.get(row)
	}

	pub fn get_component_mut<T: Component>(&mut self, row: usize) -> Option<&mut T> {
		self.column_mut::<T>()?.get_mut(row)
	}

	/// Grow the capacity to at least `capacity` rows, rounded up to a power of two.
	pub fn ensure_capacity(&mut self, capacity: usize) {
		if self.capacity < capacity {
			self.set_capacity(capacity.next_power_of_two());
		}
	}

	/// Append a row for `entity` with every component at its default value.
	pub(crate) fn push_entity(&mut self, entity: Entity) -> usize {
		self.reserve_row();
		let row = self.entities.len();
		self.entities.push(entity);
		for column in self.columns.iter_mut() {
			column.push_default();
		}
		debug_assert!(self.columns.iter().all(|c| c.len() == self.entities.len()));
		row
	}

	/// Swap-remove `row`, dropping its component values.
	/// Returns the entity that was moved into `row`, if any.
	pub(crate) fn remove_row(&mut self, row: usize) -> Option<Entity> {
		for column in self.columns.iter_mut() {
			column.swap_remove(row);
		}
		self.remove_entity_row(row)
	}

	/// Move `row` into `dst`, carrying over the components both archetypes share.
	///
	/// Components only present in `self` are dropped, components only present in `dst`
	/// start at their default value. Returns the row in `dst` and the entity that was
	/// swapped into `row`, if any.
	pub(crate) fn move_row(&mut self, row: usize, dst: &mut ArchetypeInstance) -> (usize, Option<Entity>) {
		dst.reserve_row();
		let dst_row = dst.entities.len();
		dst.entities.push(self.entities[row]);

		for (index, column) in dst.types.iter().zip(dst.columns.iter_mut()) {
			if self.types.contains_index(index) {
				let src = &mut self.columns[self.types.rank(index)];
				src.move_row(row, &mut **column);
			} else {
				column.push_default();
			}
		}

		for (index, column) in self.types.iter().zip(self.columns.iter_mut()) {
			if !dst.types.contains_index(index) {
				column.swap_remove(row);
			}
		}

		(dst_row, self.remove_entity_row(row))
	}

	fn remove_entity_row(&mut self, row: usize) -> Option<Entity> {
		self.entities.swap_remove(row);
		let moved = self.entities.get(row).copied();
		self.shrink_if_sparse();
		moved
	}

	#[inline(always)]
	fn reserve_row(&mut self) {
		if self.entities.len() >= self.capacity {
			self.set_capacity(self.capacity * 2);
		}
	}

	fn shrink_if_sparse(&mut self) {
		let half = self.capacity / 2;
		if half >= self.min_capacity && self.entities.len() <= self.capacity / self.shrink_divisor {
			self.set_capacity(half);
		}
	}

	fn set_capacity(&mut self, capacity: usize) {
		if self.capacity != 0 {
			tracing::debug!(
				archetype = self.id.index,
				from = self.capacity,
				to = capacity,
				len = self.entities.len(),
				"resizing archetype"
			);
		}

		self.capacity = capacity;
		set_vec_capacity(&mut self.entities, capacity);
		for column in self.columns.iter_mut() {
			column.set_capacity(capacity);
		}
	}
}
