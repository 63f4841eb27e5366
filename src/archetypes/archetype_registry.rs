use crate::archetypes::{Archetype, ArchetypeInstance};
use crate::components::{ComponentIndex, ComponentTypes, TagIndex, Tags};
use std::hash::{BuildHasherDefault, Hash};
use crate::config::StoreConfig;
use nohash_hasher::NoHashHasher;
use std::collections::HashMap;

type Hasher = BuildHasherDefault<NoHashHasher<usize>>;

/// Identifies an archetype by the exact set of components and tags it holds.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Debug)]
pub(crate) struct ArchetypeKey {
	pub types: ComponentTypes,
	pub tags: Tags,
}

/// The registry of all archetypes of a store.
///
/// The archetype without components or tags always exists at index 0.
pub(crate) struct ArchetypeStore {
	config: StoreConfig,
	vec: Vec<ArchetypeInstance>,
	map: HashMap<ArchetypeKey, Archetype>,
	transitions: HashMap<ArchetypeTransition, Archetype, Hasher>,
}

/// A single component or tag added to or removed from an archetype.
#[derive(Copy, Clone)]
pub(crate) struct ArchetypeTransition {
	pub archetype: Archetype,
	pub target: TransitionTarget,
	pub kind: ArchetypeTransitionKind,
}

#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub(crate) enum TransitionTarget {
	Component(ComponentIndex),
	Tag(TagIndex),
}

#[repr(usize)]
#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub(crate) enum ArchetypeTransitionKind {
	Add = 0,
	Remove = 1,
}

impl ArchetypeStore {
	pub fn new(config: StoreConfig) -> Self {
		let empty = ArchetypeKey {
			types: ComponentTypes::new(),
			tags: Tags::new(),
		};

		Self {
			map: HashMap::from([(empty, Archetype::default())]),
			vec: vec![ArchetypeInstance::new(Archetype::default(), empty.types, empty.tags, &config)],
			transitions: HashMap::default(),
			config,
		}
	}

	/// Returns the archetype for the exact `types` and `tags`, creating it on first use.
	pub fn get_or_create(&mut self, types: ComponentTypes, tags: Tags) -> Archetype {
		let key = ArchetypeKey { types, tags };
		if let Some(archetype) = self.map.get(&key) {
			return *archetype;
		}

		let archetype = Archetype { index: self.vec.len() };
		tracing::debug!(archetype = archetype.index, ?types, ?tags, "creating archetype");

		self.vec.push(ArchetypeInstance::new(archetype, types, tags, &self.config));
		self.map.insert(key, archetype);
		archetype
	}

	/// Resolves the archetype reached by applying `transition`, caching the result.
	pub fn transition(&mut self, transition: ArchetypeTransition) -> Archetype {
		if let Some(archetype) = self.transitions.get(&transition) {
			return *archetype;
		}

		let src = &self.vec[transition.archetype.index];
		let add = transition.kind == ArchetypeTransitionKind::Add;
		let (mut types, mut tags) = (src.component_types(), src.tags());
		match transition.target {
			TransitionTarget::Component(index) => types.set_index(index, add),
			TransitionTarget::Tag(index) => tags.set_index(index, add),
		}

		let archetype = self.get_or_create(types, tags);
		self.transitions.insert(transition, archetype);
		archetype
	}

	#[inline(always)]
	pub fn get(&self, archetype: Archetype) -> &ArchetypeInstance {
		&self.vec[archetype.index]
	}

	#[inline(always)]
	pub fn get_mut(&mut self, archetype: Archetype) -> &mut ArchetypeInstance {
		&mut self.vec[archetype.index]
	}

	/// Borrow two distinct archetypes mutably.
	pub fn get_pair_mut(&mut self, a: Archetype, b: Archetype) -> (&mut ArchetypeInstance, &mut ArchetypeInstance) {
		assert_ne!(a, b, "Cannot borrow the same archetype twice");
		if a.index < b.index {
			let (left, right) = self.vec.split_at_mut(b.index);
			(&mut left[a.index], &mut right[0])
		} else {
			let (left, right) = self.vec.split_at_mut(a.index);
			(&mut right[0], &mut left[b.index])
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = &ArchetypeInstance> {
		self.vec.iter()
	}

	pub fn len(&self) -> usize {
		self.vec.len()
	}
}

impl Eq for ArchetypeTransition {}

impl PartialEq<Self> for ArchetypeTransition {
	fn eq(&self, other: &Self) -> bool {
		(self.target == other.target) & (self.archetype == other.archetype) & (self.kind == other.kind)
	}
}

impl Hash for ArchetypeTransition {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		let kind = self.kind as usize;
		let (target, index) = match self.target {
			TransitionTarget::Component(index) => (0, index.value()),
			TransitionTarget::Tag(index) => (1, index.value()),
		};
		let archetype = self.archetype.index << 11;
		state.write_usize(kind | (target << 1) | (index << 2) | archetype);
	}
}
