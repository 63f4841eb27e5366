use crate::archetypes::Archetype;
use std::fmt::{Display, Formatter};

/// A dense, reusable handle to an entity.
///
/// Ids are recycled after deletion. An id stays valid across structural moves
/// of any entity, including its own.
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Entity {
	pub(crate) id: u32,
}

impl Entity {
	/// Wraps a raw id. The id is not checked against any store.
	pub const fn from_id(id: u32) -> Self {
		Self { id }
	}

	#[inline(always)]
	pub const fn id(&self) -> u32 {
		self.id
	}

	#[inline(always)]
	pub(crate) const fn index(&self) -> usize {
		self.id as usize
	}
}

impl Display for Entity {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.id)
	}
}

/// Lifecycle flags of an [EntityNode].
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
pub struct NodeFlags(u8);

impl NodeFlags {
	pub const NONE: NodeFlags = NodeFlags(0);
	pub const CREATED: NodeFlags = NodeFlags(1);

	#[inline(always)]
	pub const fn contains(&self, other: NodeFlags) -> bool {
		(self.0 & other.0) == other.0
	}

	#[inline(always)]
	pub fn insert(&mut self, other: NodeFlags) {
		self.0 |= other.0;
	}

	#[inline(always)]
	pub fn remove(&mut self, other: NodeFlags) {
		self.0 &= !other.0;
	}
}

/// The storage location of one entity id.
///
/// For every created entity `archetype.entities()[row] == entity`.
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
pub struct EntityNode {
	pub(crate) archetype: Archetype,
	pub(crate) row: u32,
	pub(crate) flags: NodeFlags,
}

impl EntityNode {
	pub const fn archetype(&self) -> Archetype {
		self.archetype
	}

	pub const fn row(&self) -> usize {
		self.row as usize
	}

	pub const fn flags(&self) -> NodeFlags {
		self.flags
	}

	#[inline(always)]
	pub const fn is_created(&self) -> bool {
		self.flags.contains(NodeFlags::CREATED)
	}
}

/// One [EntityNode] per possible id, indexed by id.
#[derive(Default)]
pub(crate) struct EntityNodeVec {
	nodes: Vec<EntityNode>,
}

impl EntityNodeVec {
	#[inline(always)]
	pub fn get(&self, entity: Entity) -> Option<&EntityNode> {
		self.nodes.get(entity.index()).filter(|node| node.is_created())
	}

	/// Access a node whether or not it is created, growing the table when needed.
	pub fn slot_mut(&mut self, entity: Entity) -> &mut EntityNode {
		if self.nodes.len() <= entity.index() {
			self.nodes.resize(entity.index() + 1, EntityNode::default());
		}
		&mut self.nodes[entity.index()]
	}

	/// Point a created node at a new row. Used for swap partners.
	#[inline(always)]
	pub fn set_row(&mut self, entity: Entity, row: usize) {
		self.nodes[entity.index()].row = row as u32;
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn capacity(&self) -> usize {
		self.nodes.capacity()
	}

	pub fn reserve(&mut self, count: usize) {
		self.nodes.reserve(count);
	}
}

#[inline(always)]
pub(crate) fn assert_row(archetype: &[Entity], row: usize, entity: Entity) {
	#[cfg(not(feature = "debug_only_assertions"))]
	assert_eq!(
		archetype[row], entity,
		"Entity node does not match its archetype row"
	);

	#[cfg(feature = "debug_only_assertions")]
	debug_assert_eq!(
		archetype[row], entity,
		"Entity node does not match its archetype row"
	);
}
