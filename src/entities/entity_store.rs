use crate::archetypes::{
	Archetype, ArchetypeInstance, ArchetypeStore, ArchetypeTransition, ArchetypeTransitionKind, TransitionTarget,
};
use crate::entities::{assert_row, Entity, EntityNode, EntityNodeVec, EntityScripts, EntityTree, IdAllocator, NodeFlags, Script};
use crate::commands::{CommandBuffer, CommandBufferSynced, CommandLogs};
use crate::components::{Component, ComponentTypes, Tag, Tags};
use crate::error::{StoreError, StoreResult};
use crate::data_structures::Pool;
use crate::config::StoreConfig;
use std::any::TypeId;
use std::sync::Arc;

/// The owner of all [entities](Entity) and the [archetypes](Archetype) storing their components.
///
/// Structural changes made directly on the store apply immediately and must happen on a single thread.
/// Other threads record changes into a [CommandBuffer] which is played back later.
pub struct EntityStore {
	config: StoreConfig,
	ids: Arc<IdAllocator>,
	nodes: EntityNodeVec,
	pub(crate) archetype_store: ArchetypeStore,

	scripts: EntityScripts,
	tree: EntityTree,
	buffer_pool: Pool<CommandLogs>,

	entity_count: usize,
	structural_moves: u64,
}

impl EntityStore {
	pub fn new() -> Self {
		Self::with_config(StoreConfig::default())
	}

	pub fn with_config(config: StoreConfig) -> Self {
		let mut nodes = EntityNodeVec::default();
		nodes.reserve(config.initial_entity_capacity);

		Self {
			ids: Arc::new(IdAllocator::new()),
			nodes,
			archetype_store: ArchetypeStore::new(config.clone()),
			scripts: EntityScripts::default(),
			tree: EntityTree::default(),
			buffer_pool: Pool::new(),
			entity_count: 0,
			structural_moves: 0,
			config,
		}
	}

	pub fn config(&self) -> &StoreConfig {
		&self.config
	}

	/// Reserve a new entity id without creating the entity.
	/// Returns a recycled id if one is available.
	///
	/// # Panics
	/// When the 32-bit id space is exhausted.
	pub fn new_id(&self) -> Entity {
		self.ids.new_id()
	}

	/// Pre-grow the entity table for `count` new entities.
	///
	/// Returns the number of entities that could be created before the call without growing the table.
	pub fn ensure_capacity(&mut self, count: usize) -> usize {
		let sequence = self.ids.sequence() as usize;
		let recycled = self.ids.recycled();
		let available = recycled + self.nodes.capacity().saturating_sub(sequence);

		if available < count {
			let required = sequence + (count - recycled);
			self.nodes.reserve(required - self.nodes.len());
		}
		available
	}

	/// Creates a single [`entity`](Entity) with no [`components`](Component) attached.
	pub fn create_entity(&mut self) -> Entity {
		let entity = self.ids.new_id();
		self.push_entity(entity);
		entity
	}

	/// Creates an [`entity`](Entity) with a caller-chosen id.
	///
	/// The id may be one returned by [new_id](EntityStore::new_id), a recycled id, or an unused
	/// id ahead of the id sequence.
	pub fn create_entity_with_id(&mut self, id: u32) -> StoreResult<Entity> {
		let entity = Entity::from_id(id);
		if self.nodes.get(entity).is_some() {
			return Err(StoreError::InvalidArgument(format!("entity id {id} is already in use")));
		}

		self.ids.claim(id)?;
		self.push_entity(entity);
		Ok(entity)
	}

	/// Creates an entity for an id a command buffer reserved while recording.
	pub(crate) fn create_reserved(&mut self, entity: Entity) -> StoreResult<()> {
		self.ids.confirm(entity.id);
		if self.nodes.get(entity).is_some() {
			return Err(StoreError::InvalidOperation("entity was already created"));
		}
		self.push_entity(entity);
		Ok(())
	}

	/// Gives back an id a command buffer reserved but will never create.
	pub(crate) fn release_reserved(&self, entity: Entity) {
		self.ids.release(entity.id);
	}

	/// The number of ids reserved by command buffers and not yet played back or discarded.
	pub fn pending_ids(&self) -> usize {
		self.ids.pending()
	}

	fn push_entity(&mut self, entity: Entity) {
		let archetype = Archetype::default();
		let row = self.archetype_store.get_mut(archetype).push_entity(entity);

		*self.nodes.slot_mut(entity) = EntityNode {
			archetype,
			row: row as u32,
			flags: NodeFlags::CREATED,
		};
		self.entity_count += 1;
	}

	/// Deletes an [`entity`](Entity) with all its components, scripts and child links.
	/// Its id is recycled.
	pub fn delete_entity(&mut self, entity: Entity) -> StoreResult<()> {
		let node = *self.node(entity)?;
		let moved = self.archetype_store.get_mut(node.archetype).remove_row(node.row());
		if let Some(moved) = moved {
			self.nodes.set_row(moved, node.row());
		}

		*self.nodes.slot_mut(entity) = EntityNode::default();
		self.scripts.remove_entity(entity);
		self.tree.remove_entity(entity);
		self.ids.free(entity.id);
		self.entity_count -= 1;
		Ok(())
	}

	pub fn is_alive(&self, entity: Entity) -> bool {
		self.nodes.get(entity).is_some()
	}

	/// The number of live entities.
	pub fn entity_count(&self) -> usize {
		self.entity_count
	}

	/// The storage location of a live entity.
	pub fn entity_node(&self, entity: Entity) -> Option<&EntityNode> {
		self.nodes.get(entity)
	}

	/// The archetype a live entity currently belongs to.
	pub fn entity_archetype(&self, entity: Entity) -> StoreResult<&ArchetypeInstance> {
		let node = self.node(entity)?;
		Ok(self.archetype_store.get(node.archetype))
	}

	/// Returns the archetype holding exactly `types` and `tags`, creating it on first use.
	pub fn get_archetype(&mut self, types: ComponentTypes, tags: Tags) -> Archetype {
		self.archetype_store.get_or_create(types, tags)
	}

	pub fn archetype(&self, archetype: Archetype) -> &ArchetypeInstance {
		self.archetype_store.get(archetype)
	}

	pub fn archetype_mut(&mut self, archetype: Archetype) -> &mut ArchetypeInstance {
		self.archetype_store.get_mut(archetype)
	}

	/// All registered archetypes, in creation order.
	pub fn archetypes(&self) -> impl Iterator<Item = &ArchetypeInstance> {
		self.archetype_store.iter()
	}

	pub fn archetype_count(&self) -> usize {
		self.archetype_store.len()
	}

	/// The number of entities moved between archetypes since the store was created.
	pub fn structural_moves(&self) -> u64 {
		self.structural_moves
	}

	/// Gets a reference to a [`component`](Component) bound to a specific [`entity`](Entity).
	pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
		let node = self.nodes.get(entity)?;
		self.archetype_store.get(node.archetype).get_component::<T>(node.row())
	}

	/// Gets a mutable reference to a [`component`](Component) bound to a specific [`entity`](Entity).
	pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
		let node = *self.nodes.get(entity)?;
		self.archetype_store.get_mut(node.archetype).get_component_mut::<T>(node.row())
	}

	pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
		self.entity_archetype(entity).map_or(false, |a| a.component_types().contains::<T>())
	}

	pub fn has_tag<T: Tag>(&self, entity: Entity) -> bool {
		self.entity_archetype(entity).map_or(false, |a| a.tags().contains::<T>())
	}

	/// Add a [component](Component) to the specified [entity](Entity), or overwrite its current value.
	/// Returns `true` if the entity moved to a new archetype.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> StoreResult<bool> {
		let node = *self.node(entity)?;
		let index = T::component_index();

		let added = !self.archetype_store.get(node.archetype).component_types().contains_index(index);
		if added {
			let dst = self.archetype_store.transition(ArchetypeTransition {
				archetype: node.archetype,
				target: TransitionTarget::Component(index),
				kind: ArchetypeTransitionKind::Add,
			});
			self.move_entity(entity, dst);
		}

		self.set_component(entity, value)?;
		Ok(added)
	}

	/// Overwrite the value of a [component](Component) the [entity](Entity) already has.
	pub fn set_component<T: Component>(&mut self, entity: Entity, value: T) -> StoreResult<()> {
		self.node(entity)?;
		match self.get_component_mut::<T>(entity) {
			Some(component) => {
				*component = value;
				Ok(())
			},
			None => Err(StoreError::ComponentNotFound {
				entity,
				component: T::component_index(),
			}),
		}
	}

	/// Remove a [component](Component) from the specified [entity](Entity).
	/// Returns `false` if the [component](Component) was not present.
	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> StoreResult<bool> {
		let node = *self.node(entity)?;
		let index = T::component_index();

		if !self.archetype_store.get(node.archetype).component_types().contains_index(index) {
			return Ok(false);
		}

		let dst = self.archetype_store.transition(ArchetypeTransition {
			archetype: node.archetype,
			target: TransitionTarget::Component(index),
			kind: ArchetypeTransitionKind::Remove,
		});
		self.move_entity(entity, dst);
		Ok(true)
	}

	/// Add a [tag](Tag) to the specified [entity](Entity).
	/// Returns `false` if the tag was already present.
	pub fn add_tag<T: Tag>(&mut self, entity: Entity) -> StoreResult<bool> {
		self.apply_tag_transition(entity, T::tag_index(), ArchetypeTransitionKind::Add)
	}

	/// Remove a [tag](Tag) from the specified [entity](Entity).
	/// Returns `false` if the tag was not present.
	pub fn remove_tag<T: Tag>(&mut self, entity: Entity) -> StoreResult<bool> {
		self.apply_tag_transition(entity, T::tag_index(), ArchetypeTransitionKind::Remove)
	}

	/// Add all `tags` to the specified [entity](Entity) with at most one move.
	pub fn add_tags(&mut self, entity: Entity, tags: Tags) -> StoreResult<bool> {
		let archetype = self.entity_archetype(entity)?;
		let types = archetype.component_types();
		let target = archetype.tags().union(&tags);
		self.move_to_signature(entity, types, target)
	}

	/// Remove all `tags` from the specified [entity](Entity) with at most one move.
	pub fn remove_tags(&mut self, entity: Entity, tags: Tags) -> StoreResult<bool> {
		let archetype = self.entity_archetype(entity)?;
		let types = archetype.component_types();
		let target = tags.iter().fold(archetype.tags(), |tags, index| tags.without_index(index));
		self.move_to_signature(entity, types, target)
	}

	/// Attach a [script](Script), replacing a script of the same type.
	/// Returns the replaced script.
	pub fn add_script<S: Script>(&mut self, entity: Entity, script: S) -> StoreResult<Option<Box<dyn Script>>> {
		self.add_script_boxed(entity, Box::new(script))
	}

	pub(crate) fn add_script_boxed(
		&mut self, entity: Entity, script: Box<dyn Script>,
	) -> StoreResult<Option<Box<dyn Script>>> {
		self.node(entity)?;
		Ok(self.scripts.add(entity, script))
	}

	/// Detach the [script](Script) of type `S`. Returns it if it was attached.
	pub fn remove_script<S: Script>(&mut self, entity: Entity) -> StoreResult<Option<Box<dyn Script>>> {
		self.remove_script_by_type(entity, TypeId::of::<S>())
	}

	pub(crate) fn remove_script_by_type(
		&mut self, entity: Entity, type_id: TypeId,
	) -> StoreResult<Option<Box<dyn Script>>> {
		self.node(entity)?;
		Ok(self.scripts.remove(entity, type_id))
	}

	pub fn get_script<S: Script>(&self, entity: Entity) -> Option<&S> {
		self.scripts.get::<S>(entity)
	}

	pub fn get_script_mut<S: Script>(&mut self, entity: Entity) -> Option<&mut S> {
		self.scripts.get_mut::<S>(entity)
	}

	/// All scripts attached to `entity`, in the order they were added.
	pub fn scripts(&self, entity: Entity) -> &[Box<dyn Script>] {
		self.scripts.all(entity)
	}

	/// Link `child` below `parent`, detaching it from its previous parent.
	/// Returns `false` if the link already existed.
	pub fn add_child(&mut self, parent: Entity, child: Entity) -> StoreResult<bool> {
		self.node(parent)?;
		self.node(child)?;
		self.tree.add_child(parent, child)
	}

	/// Unlink `child` from `parent`. Returns `false` if `child` was not a child of `parent`.
	pub fn remove_child(&mut self, parent: Entity, child: Entity) -> StoreResult<bool> {
		self.node(parent)?;
		self.node(child)?;
		Ok(self.tree.remove_child(parent, child))
	}

	pub fn children(&self, parent: Entity) -> &[Entity] {
		self.tree.children(parent)
	}

	pub fn parent(&self, child: Entity) -> Option<Entity> {
		self.tree.parent(child)
	}

	/// Get an empty [CommandBuffer], reusing a pooled one when available.
	pub fn get_command_buffer(&self) -> CommandBuffer {
		let logs = self.buffer_pool.take_or_else(|| {
			tracing::debug!("allocating command buffer");
			CommandLogs::default()
		});
		CommandBuffer::from_parts(logs, self.ids.clone(), self.buffer_pool.clone())
	}

	/// Get an empty [CommandBufferSynced] which may be shared between threads.
	pub fn get_command_buffer_synced(&self) -> CommandBufferSynced {
		CommandBufferSynced::new(self.get_command_buffer())
	}

	/// Return `buffer` to the pool. Returning a buffer twice has no effect.
	pub fn return_command_buffer(&self, buffer: &mut CommandBuffer) {
		buffer.return_buffer();
	}

	/// The number of command buffers waiting in the pool.
	pub fn pooled_command_buffers(&self) -> usize {
		self.buffer_pool.available()
	}

	pub(crate) fn owns_ids(&self, ids: &Arc<IdAllocator>) -> bool {
		Arc::ptr_eq(&self.ids, ids)
	}

	pub(crate) fn node(&self, entity: Entity) -> StoreResult<&EntityNode> {
		self.nodes.get(entity).ok_or(StoreError::EntityNotFound(entity))
	}

	/// Move `entity` to the archetype for `types` and `tags`, if it is not already there.
	pub(crate) fn move_to_signature(&mut self, entity: Entity, types: ComponentTypes, tags: Tags) -> StoreResult<bool> {
		let node = *self.node(entity)?;
		let current = self.archetype_store.get(node.archetype);
		if current.component_types() == types && current.tags() == tags {
			return Ok(false);
		}

		let dst = self.archetype_store.get_or_create(types, tags);
		self.move_entity(entity, dst);
		Ok(true)
	}

	fn apply_tag_transition(
		&mut self, entity: Entity, index: crate::components::TagIndex, kind: ArchetypeTransitionKind,
	) -> StoreResult<bool> {
		let node = *self.node(entity)?;
		let present = self.archetype_store.get(node.archetype).tags().contains_index(index);
		if present == (kind == ArchetypeTransitionKind::Add) {
			return Ok(false);
		}

		let dst = self.archetype_store.transition(ArchetypeTransition {
			archetype: node.archetype,
			target: TransitionTarget::Tag(index),
			kind,
		});
		self.move_entity(entity, dst);
		Ok(true)
	}

	/// The only way rows move between archetypes.
	fn move_entity(&mut self, entity: Entity, dst: Archetype) {
		let node = *self.nodes.get(entity).expect("Moved entity must be alive");
		let (src_instance, dst_instance) = self.archetype_store.get_pair_mut(node.archetype, dst);

		let (dst_row, moved) = src_instance.move_row(node.row(), dst_instance);
		if let Some(moved) = moved {
			self.nodes.set_row(moved, node.row());
			assert_row(src_instance.entities(), node.row(), moved);
		}
		assert_row(dst_instance.entities(), dst_row, entity);

		let slot = self.nodes.slot_mut(entity);
		slot.archetype = dst;
		slot.row = dst_row as u32;
		self.structural_moves += 1;

		tracing::trace!(%entity, from = node.archetype.index(), to = dst.index(), row = dst_row, "moved entity");
	}
}

impl Default for EntityStore {
	fn default() -> Self {
		Self::new()
	}
}
