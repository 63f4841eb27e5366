use crate::components::{Component, Tag};
use crate::entities::{EntityStore, Script};

mod bit_set_tests;
mod component_set_tests;
mod entity_store_tests;
mod playback_tests;

#[derive(Default, Debug, Copy, Clone, PartialEq, Component)]
pub struct Position {
	pub x: f32,
	pub y: f32,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Component)]
pub struct Rotation {
	pub x: f32,
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Component)]
pub struct Velocity {
	pub x: f32,
}

#[derive(Default, Debug, Clone, PartialEq, Component)]
pub struct Name(pub String);

#[derive(Tag)]
pub struct Enemy;

#[derive(Tag)]
pub struct Frozen;

#[derive(Debug, PartialEq)]
pub struct Health(pub u32);
impl Script for Health {}

#[derive(Debug, PartialEq)]
pub struct Patrol;
impl Script for Patrol {}

/// Every archetype row points back at its entity, and every live entity sits in exactly one row.
pub fn check_store(store: &EntityStore) {
	let mut total = 0;
	for archetype in store.archetypes() {
		assert!(archetype.len() <= archetype.capacity());
		assert!(archetype.capacity().is_power_of_two());

		for (row, entity) in archetype.entities().iter().enumerate() {
			let node = store.entity_node(*entity).expect("Archetype row holds a dead entity");
			assert_eq!(node.archetype(), archetype.id());
			assert_eq!(node.row(), row);
		}
		total += archetype.len();
	}
	assert_eq!(total, store.entity_count());
}
