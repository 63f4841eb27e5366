use crate::components::{Component, Tag, Tags};
use crate::entities::{Entity, EntityStore, Script};
use crate::commands::CommandBuffer;
use crate::error::StoreResult;
use parking_lot::Mutex;

/// A [CommandBuffer] that can be recorded into from many threads at once.
///
/// Every call takes the lock for exactly one command, so unrelated recordings only
/// contend for the duration of a single push. [Playback](CommandBufferSynced::playback)
/// must happen on the owning thread once all recordings for the batch are done.
pub struct CommandBufferSynced {
	buffer: Mutex<CommandBuffer>,
}

impl CommandBufferSynced {
	pub fn new(buffer: CommandBuffer) -> Self {
		Self {
			buffer: Mutex::new(buffer),
		}
	}

	pub fn into_inner(self) -> CommandBuffer {
		self.buffer.into_inner()
	}

	pub fn create_entity(&self) -> StoreResult<Entity> {
		self.buffer.lock().create_entity()
	}

	pub fn delete_entity(&self, entity: Entity) -> StoreResult<()> {
		self.buffer.lock().delete_entity(entity)
	}

	pub fn add_component<T: Component>(&self, entity: Entity, value: T) -> StoreResult<()> {
		self.buffer.lock().add_component(entity, value)
	}

	pub fn set_component<T: Component>(&self, entity: Entity, value: T) -> StoreResult<()> {
		self.buffer.lock().set_component(entity, value)
	}

	pub fn remove_component<T: Component>(&self, entity: Entity) -> StoreResult<()> {
		self.buffer.lock().remove_component::<T>(entity)
	}

	pub fn add_tag<T: Tag>(&self, entity: Entity) -> StoreResult<()> {
		self.buffer.lock().add_tag::<T>(entity)
	}

	pub fn remove_tag<T: Tag>(&self, entity: Entity) -> StoreResult<()> {
		self.buffer.lock().remove_tag::<T>(entity)
	}

	pub fn add_tags(&self, entity: Entity, tags: Tags) -> StoreResult<()> {
		self.buffer.lock().add_tags(entity, tags)
	}

	pub fn remove_tags(&self, entity: Entity, tags: Tags) -> StoreResult<()> {
		self.buffer.lock().remove_tags(entity, tags)
	}

	pub fn add_script<S: Script>(&self, entity: Entity, script: S) -> StoreResult<()> {
		self.buffer.lock().add_script(entity, script)
	}

	pub fn remove_script<S: Script>(&self, entity: Entity) -> StoreResult<()> {
		self.buffer.lock().remove_script::<S>(entity)
	}

	pub fn add_child(&self, parent: Entity, child: Entity) -> StoreResult<()> {
		self.buffer.lock().add_child(parent, child)
	}

	pub fn remove_child(&self, parent: Entity, child: Entity) -> StoreResult<()> {
		self.buffer.lock().remove_child(parent, child)
	}

	pub fn command_count(&self) -> usize {
		self.buffer.lock().command_count()
	}

	pub fn reuse_buffer(&self) -> bool {
		self.buffer.lock().reuse_buffer()
	}

	pub fn set_reuse_buffer(&self, reuse: bool) {
		self.buffer.lock().set_reuse_buffer(reuse)
	}

	pub fn is_returned(&self) -> bool {
		self.buffer.lock().is_returned()
	}

	pub fn return_buffer(&self) {
		self.buffer.lock().return_buffer()
	}

	/// Apply the recorded commands to `store`. See [CommandBuffer::playback].
	pub fn playback(&self, store: &mut EntityStore) -> StoreResult<()> {
		self.buffer.lock().playback(store)
	}
}
