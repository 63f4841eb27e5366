use crate::commands::{
	AnyComponentLog, ChildAction, ChildCommand, ComponentAction, ComponentLog, EntityAction, EntityChanges,
	EntityCommand, ScriptAction, ScriptCommand, TagAction, TagCommand,
};
use crate::components::{Component, ComponentTypes, Tag, TagIndex, Tags};
use crate::entities::{Entity, IdAllocator, Script};
use crate::error::{StoreError, StoreResult};
use crate::data_structures::Pool;
use std::any::TypeId;
use std::sync::Arc;

/// The growable logs behind a [CommandBuffer]. Pooled and reused across playbacks.
#[derive(Default)]
pub(crate) struct CommandLogs {
	pub(crate) entity_commands: Vec<EntityCommand>,
	pub(crate) tag_commands: Vec<TagCommand>,
	pub(crate) component_logs: Vec<Option<Box<dyn AnyComponentLog>>>,
	pub(crate) changed_component_types: ComponentTypes,
	pub(crate) script_commands: Vec<ScriptCommand>,
	pub(crate) child_commands: Vec<ChildCommand>,
	pub(crate) changes: EntityChanges,
}

impl CommandLogs {
	/// The log for component `T`, created on first use.
	fn component_log_mut<T: Component>(&mut self) -> &mut ComponentLog<T> {
		let index = T::component_index();
		if self.component_logs.len() <= index.value() {
			self.component_logs.resize_with(index.value() + 1, || None);
		}

		self.changed_component_types.set_index(index, true);
		self.component_logs[index.value()]
			.get_or_insert_with(|| Box::new(ComponentLog::<T>::new()))
			.as_any_mut()
			.downcast_mut::<ComponentLog<T>>()
			.expect("Component log does not match its component index")
	}

	fn command_count(&self) -> usize {
		let components: usize = self
			.changed_component_types
			.iter()
			.filter_map(|index| self.component_logs[index.value()].as_ref())
			.map(|log| log.len())
			.sum();

		self.entity_commands.len()
			+ self.tag_commands.len()
			+ components
			+ self.script_commands.len()
			+ self.child_commands.len()
	}

	/// Drop every recorded command without applying it.
	/// Ids reserved for entities that were never created are given back to `ids`.
	fn discard(&mut self, ids: &IdAllocator) {
		for command in self.entity_commands.iter() {
			if command.action == EntityAction::Create {
				ids.release(command.entity.id());
			}
		}
		self.clear();
	}

	/// Drop every recorded command, keeping the allocations.
	pub(crate) fn clear(&mut self) {
		for index in self.changed_component_types.iter() {
			if let Some(log) = self.component_logs[index.value()].as_mut() {
				log.clear();
			}
		}

		self.entity_commands.clear();
		self.tag_commands.clear();
		self.changed_component_types.clear();
		self.script_commands.clear();
		self.child_commands.clear();
		self.changes.clear();
	}
}

/// Records structural and data changes to apply to an [EntityStore](crate::entities::EntityStore) later.
///
/// Recording never touches the store. [Playback](CommandBuffer::playback) applies the
/// commands on the owning thread; afterwards the buffer is returned to its store's pool
/// unless [reuse_buffer](CommandBuffer::set_reuse_buffer) is set.
///
/// Once returned, every recording call fails with [StoreError::InvalidOperation] unless the
/// buffer is set to be reused. Dropping a buffer discards its commands and returns it to the pool.
pub struct CommandBuffer {
	logs: Option<CommandLogs>,
	ids: Arc<IdAllocator>,
	pool: Pool<CommandLogs>,
	reuse_buffer: bool,
}

const RETURNED: StoreError = StoreError::InvalidOperation("command buffer was returned to its pool");

impl CommandBuffer {
	pub(crate) fn from_parts(logs: CommandLogs, ids: Arc<IdAllocator>, pool: Pool<CommandLogs>) -> Self {
		Self {
			logs: Some(logs),
			ids,
			pool,
			reuse_buffer: false,
		}
	}

	/// Whether the buffer stays usable after playback.
	pub fn reuse_buffer(&self) -> bool {
		self.reuse_buffer
	}

	pub fn set_reuse_buffer(&mut self, reuse: bool) {
		self.reuse_buffer = reuse;
	}

	/// Whether the buffer's logs were handed back to its pool.
	pub fn is_returned(&self) -> bool {
		self.logs.is_none()
	}

	/// The number of recorded commands of all kinds.
	pub fn command_count(&self) -> usize {
		self.logs.as_ref().map_or(0, CommandLogs::command_count)
	}

	pub fn is_empty(&self) -> bool {
		self.command_count() == 0
	}

	/// Reserve a new entity id and record its creation.
	/// The returned entity can be referenced by later commands in the same buffer.
	pub fn create_entity(&mut self) -> StoreResult<Entity> {
		self.logs_mut()?;
		let entity = self.ids.new_pending_id();
		self.logs_mut()?.entity_commands.push(EntityCommand {
			entity,
			action: EntityAction::Create,
		});
		Ok(entity)
	}

	pub fn delete_entity(&mut self, entity: Entity) -> StoreResult<()> {
		let logs = self.logs_for(entity)?;
		logs.entity_commands.push(EntityCommand {
			entity,
			action: EntityAction::Delete,
		});
		Ok(())
	}

	/// Record adding component `T` with `value`. Adding a present component overwrites its value.
	pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> StoreResult<()> {
		let logs = self.logs_for(entity)?;
		logs.component_log_mut::<T>().push(entity, ComponentAction::Add, value);
		Ok(())
	}

	/// Record setting the value of a component the entity has at playback time.
	pub fn set_component<T: Component>(&mut self, entity: Entity, value: T) -> StoreResult<()> {
		let logs = self.logs_for(entity)?;
		logs.component_log_mut::<T>().push(entity, ComponentAction::Set, value);
		Ok(())
	}

	pub fn remove_component<T: Component>(&mut self, entity: Entity) -> StoreResult<()> {
		let logs = self.logs_for(entity)?;
		logs.component_log_mut::<T>().push(entity, ComponentAction::Remove, T::default());
		Ok(())
	}

	pub fn add_tag<T: Tag>(&mut self, entity: Entity) -> StoreResult<()> {
		self.push_tag(entity, T::tag_index(), TagAction::Add)
	}

	pub fn remove_tag<T: Tag>(&mut self, entity: Entity) -> StoreResult<()> {
		self.push_tag(entity, T::tag_index(), TagAction::Remove)
	}

	pub fn add_tags(&mut self, entity: Entity, tags: Tags) -> StoreResult<()> {
		for tag in tags.iter() {
			self.push_tag(entity, tag, TagAction::Add)?;
		}
		Ok(())
	}

	pub fn remove_tags(&mut self, entity: Entity, tags: Tags) -> StoreResult<()> {
		for tag in tags.iter() {
			self.push_tag(entity, tag, TagAction::Remove)?;
		}
		Ok(())
	}

	pub fn add_script<S: Script>(&mut self, entity: Entity, script: S) -> StoreResult<()> {
		let logs = self.logs_for(entity)?;
		logs.script_commands.push(ScriptCommand {
			entity,
			action: ScriptAction::Add(Box::new(script)),
		});
		Ok(())
	}

	pub fn remove_script<S: Script>(&mut self, entity: Entity) -> StoreResult<()> {
		let logs = self.logs_for(entity)?;
		logs.script_commands.push(ScriptCommand {
			entity,
			action: ScriptAction::Remove(TypeId::of::<S>()),
		});
		Ok(())
	}

	pub fn add_child(&mut self, parent: Entity, child: Entity) -> StoreResult<()> {
		self.push_child(parent, child, ChildAction::Add)
	}

	pub fn remove_child(&mut self, parent: Entity, child: Entity) -> StoreResult<()> {
		self.push_child(parent, child, ChildAction::Remove)
	}

	/// Discard every recorded command without applying it.
	/// Ids reserved by [create_entity](CommandBuffer::create_entity) become available again.
	pub fn clear(&mut self) -> StoreResult<()> {
		let ids = self.ids.clone();
		self.logs_mut()?.discard(&ids);
		Ok(())
	}

	/// Discard every recorded command and return the buffer to its pool.
	/// Returning a buffer twice has no effect.
	///
	/// A returned buffer rejects further recording unless
	/// [reuse_buffer](CommandBuffer::set_reuse_buffer) is set, in which case the next
	/// recording call takes a fresh set of logs from the pool.
	pub fn return_buffer(&mut self) {
		if let Some(mut logs) = self.logs.take() {
			logs.discard(&self.ids);
			self.pool.give_back(logs);
		}
	}

	pub(crate) fn ids(&self) -> &Arc<IdAllocator> {
		&self.ids
	}

	pub(crate) fn logs_mut(&mut self) -> StoreResult<&mut CommandLogs> {
		if self.logs.is_none() && self.reuse_buffer {
			self.logs = Some(self.pool.take_or_else(CommandLogs::default));
		}
		self.logs.as_mut().ok_or(RETURNED)
	}

	fn logs_for(&mut self, entity: Entity) -> StoreResult<&mut CommandLogs> {
		let logs = self.logs_mut()?;
		check_entity(entity)?;
		Ok(logs)
	}

	fn push_tag(&mut self, entity: Entity, tag: TagIndex, action: TagAction) -> StoreResult<()> {
		let logs = self.logs_for(entity)?;
		logs.tag_commands.push(TagCommand { entity, tag, action });
		Ok(())
	}

	fn push_child(&mut self, parent: Entity, child: Entity, action: ChildAction) -> StoreResult<()> {
		let logs = self.logs_for(parent)?;
		check_entity(child)?;
		if parent == child {
			return Err(StoreError::InvalidArgument(format!("entity {parent} cannot be its own child")));
		}
		logs.child_commands.push(ChildCommand { parent, child, action });
		Ok(())
	}
}

impl Drop for CommandBuffer {
	fn drop(&mut self) {
		self.return_buffer();
	}
}

fn check_entity(entity: Entity) -> StoreResult<()> {
	match entity.id() {
		0 => Err(StoreError::InvalidArgument("entity id 0 is reserved".to_string())),
		_ => Ok(()),
	}
}
