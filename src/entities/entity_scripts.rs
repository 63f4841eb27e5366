use crate::entities::Entity;
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;
use std::any::{Any, TypeId};

type Hasher = BuildHasherDefault<NoHashHasher<u32>>;

/// Behaviour attached to a single [entity](Entity).
///
/// Scripts are stored per entity rather than in archetype columns;
/// an entity holds at most one script of each type.
pub trait Script: ScriptAny + Send + Sync + 'static {}

/// Gives [scripts](Script) access to their concrete type.
/// Implemented for every `'static` type.
pub trait ScriptAny {
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> ScriptAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// The concrete type of a boxed script.
#[inline(always)]
pub(crate) fn script_type(script: &dyn Script) -> TypeId {
	script.as_any().type_id()
}

#[derive(Default)]
pub(crate) struct EntityScripts {
	scripts: HashMap<u32, Vec<Box<dyn Script>>, Hasher>,
}

impl EntityScripts {
	/// Attach `script`, returning the script of the same type it replaced.
	pub fn add(&mut self, entity: Entity, script: Box<dyn Script>) -> Option<Box<dyn Script>> {
		let scripts = self.scripts.entry(entity.id).or_default();
		let type_id = script_type(script.as_ref());

		match scripts.iter_mut().find(|s| script_type(s.as_ref()) == type_id) {
			Some(slot) => Some(std::mem::replace(slot, script)),
			None => {
				scripts.push(script);
				None
			},
		}
	}

	pub fn remove(&mut self, entity: Entity, type_id: TypeId) -> Option<Box<dyn Script>> {
		let scripts = self.scripts.get_mut(&entity.id)?;
		let position = scripts.iter().position(|s| script_type(s.as_ref()) == type_id)?;
		let script = scripts.remove(position);
		if scripts.is_empty() {
			self.scripts.remove(&entity.id);
		}
		Some(script)
	}

	pub fn get<S: Script>(&self, entity: Entity) -> Option<&S> {
		self.all(entity).iter().find_map(|s| (**s).as_any().downcast_ref::<S>())
	}

	pub fn get_mut<S: Script>(&mut self, entity: Entity) -> Option<&mut S> {
		let scripts = self.scripts.get_mut(&entity.id)?;
		scripts.iter_mut().find_map(|s| (**s).as_any_mut().downcast_mut::<S>())
	}

	pub fn all(&self, entity: Entity) -> &[Box<dyn Script>] {
		self.scripts.get(&entity.id).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn remove_entity(&mut self, entity: Entity) {
		self.scripts.remove(&entity.id);
	}
}
