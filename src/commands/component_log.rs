use crate::commands::{ComponentAction, ComponentCommand, EntityChanges};
use crate::entities::{Entity, EntityStore};
use crate::components::Component;
use crate::error::StoreResult;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::Any;

type Hasher = BuildHasherDefault<NoHashHasher<u32>>;

/// The type-erased command log of one component type.
///
/// One log exists per component type a buffer has seen; it is created from the typed
/// recording call, so playback never needs to look up the concrete type.
pub(crate) trait AnyComponentLog: Send {
	fn len(&self) -> usize;

	/// Apply every add and remove to the entities' pending component types and
	/// remember the last command per entity.
	fn update_component_types(&mut self, store: &EntityStore, changes: &mut EntityChanges) -> StoreResult<()>;

	/// Write the value of the last add or set per entity into its current row.
	fn write_values(&mut self, store: &mut EntityStore) -> StoreResult<()>;

	fn clear(&mut self);

	fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub(crate) struct ComponentLog<T> {
	commands: Vec<ComponentCommand<T>>,
	last: HashMap<u32, usize, Hasher>,
}

impl<T: Component> ComponentLog<T> {
	pub fn new() -> Self {
		Self {
			commands: Vec::new(),
			last: HashMap::default(),
		}
	}

	pub fn push(&mut self, entity: Entity, action: ComponentAction, value: T) {
		self.commands.push(ComponentCommand { entity, action, value });
	}
}

impl<T: Component> AnyComponentLog for ComponentLog<T> {
	fn len(&self) -> usize {
		self.commands.len()
	}

	fn update_component_types(&mut self, store: &EntityStore, changes: &mut EntityChanges) -> StoreResult<()> {
		let index = T::component_index();
		self.last.clear();

		for (i, command) in self.commands.iter().enumerate() {
			let change = changes.get_or_insert(command.entity, store)?;
			match command.action {
				ComponentAction::Add => change.types.set_index(index, true),
				ComponentAction::Remove => change.types.set_index(index, false),
				ComponentAction::Set => {},
			}
			self.last.insert(command.entity.id(), i);
		}
		Ok(())
	}

	fn write_values(&mut self, store: &mut EntityStore) -> StoreResult<()> {
		for (i, command) in self.commands.iter_mut().enumerate() {
			if command.action == ComponentAction::Remove {
				continue;
			}
			if self.last.get(&command.entity.id()) != Some(&i) {
				continue;
			}

			let value = std::mem::take(&mut command.value);
			store.set_component(command.entity, value)?;
		}
		Ok(())
	}

	fn clear(&mut self) {
		self.commands.clear();
		self.last.clear();
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}
