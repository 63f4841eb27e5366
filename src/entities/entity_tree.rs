use crate::error::{StoreError, StoreResult};
use crate::entities::Entity;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;

type Hasher = BuildHasherDefault<NoHashHasher<u32>>;

/// Parent/child links between entities.
///
/// Every entity has at most one parent and the links never form a cycle.
#[derive(Default)]
pub(crate) struct EntityTree {
	parents: HashMap<u32, Entity, Hasher>,
	children: HashMap<u32, Vec<Entity>, Hasher>,
}

impl EntityTree {
	/// Link `child` below `parent`, detaching it from its previous parent.
	/// Returns `false` if the link already existed.
	pub fn add_child(&mut self, parent: Entity, child: Entity) -> StoreResult<bool> {
		if parent == child {
			return Err(StoreError::InvalidOperation("an entity cannot be its own child"));
		}

		let mut ancestor = Some(parent);
		while let Some(entity) = ancestor {
			if entity == child {
				return Err(StoreError::InvalidOperation("adding the child would create a cycle"));
			}
			ancestor = self.parent(entity);
		}

		match self.parent(child) {
			Some(current) if current == parent => return Ok(false),
			Some(current) => self.unlink(current, child),
			None => {},
		}

		self.parents.insert(child.id, parent);
		self.children.entry(parent.id).or_default().push(child);
		Ok(true)
	}

	/// Unlink `child` from `parent`. Returns `false` if `child` was not a child of `parent`.
	pub fn remove_child(&mut self, parent: Entity, child: Entity) -> bool {
		match self.parent(child) {
			Some(current) if current == parent => {
				self.unlink(parent, child);
				true
			},
			_ => false,
		}
	}

	pub fn parent(&self, child: Entity) -> Option<Entity> {
		self.parents.get(&child.id).copied()
	}

	pub fn children(&self, parent: Entity) -> &[Entity] {
		self.children.get(&parent.id).map(Vec::as_slice).unwrap_or_default()
	}

	/// Detach `entity` from its parent and turn its children into roots.
	pub fn remove_entity(&mut self, entity: Entity) {
		if let Some(parent) = self.parent(entity) {
			self.unlink(parent, entity);
		}
		if let Some(children) = self.children.remove(&entity.id) {
			for child in children {
				self.parents.remove(&child.id);
			}
		}
	}

	fn unlink(&mut self, parent: Entity, child: Entity) {
		self.parents.remove(&child.id);
		if let Some(children) = self.children.get_mut(&parent.id) {
			children.retain(|c| *c != child);
			if children.is_empty() {
				self.children.remove(&parent.id);
			}
		}
	}
}
