use crate::components::{ComponentTypes, Tags};
use crate::entities::{Entity, EntityStore};
use crate::error::StoreResult;
use std::collections::hash_map::Entry;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;

type Hasher = BuildHasherDefault<NoHashHasher<u32>>;

/// The component types and tags an entity will have once playback completes.
#[derive(Copy, Clone, Debug)]
pub(crate) struct EntityChange {
	pub types: ComponentTypes,
	pub tags: Tags,
}

/// Net structural changes per entity, collected during one playback.
///
/// Entities are kept in the order they were first touched so moves happen deterministically.
#[derive(Default)]
pub(crate) struct EntityChanges {
	map: HashMap<u32, EntityChange, Hasher>,
	order: Vec<Entity>,
}

impl EntityChanges {
	/// Get the pending change of `entity`, seeding it from its current archetype on first touch.
	pub fn get_or_insert(&mut self, entity: Entity, store: &EntityStore) -> StoreResult<&mut EntityChange> {
		match self.map.entry(entity.id()) {
			Entry::Occupied(entry) => Ok(entry.into_mut()),
			Entry::Vacant(entry) => {
				let archetype = store.entity_archetype(entity)?;
				self.order.push(entity);
				Ok(entry.insert(EntityChange {
					types: archetype.component_types(),
					tags: archetype.tags(),
				}))
			},
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (Entity, EntityChange)> + '_ {
		self.order.iter().map(|entity| (*entity, self.map[&entity.id()]))
	}

	pub fn len(&self) -> usize {
		self.order.len()
	}

	pub fn clear(&mut self) {
		self.map.clear();
		self.order.clear();
	}
}
