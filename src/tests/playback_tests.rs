use crate::archetype;
use crate::components::{ComponentTypes, Tags};
use crate::entities::{Entity, EntityStore};
use crate::error::StoreError;
use crate::tests::{check_store, Enemy, Frozen, Health, Name, Patrol, Position, Rotation, Velocity};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn spawn_positions(store: &mut EntityStore, count: usize) -> Vec<Entity> {
	(0..count)
		.map(|i| {
			let entity = store.create_entity();
			store.add_component(entity, Position { x: i as f32, y: 0.0 }).unwrap();
			entity
		})
		.collect()
}

#[test]
pub fn set_and_add_move_once() {
	let mut store = EntityStore::new();
	let entities = spawn_positions(&mut store, 4);
	let source = archetype!(store, [Position]);
	let entity = entities[1];

	let mut buffer = store.get_command_buffer();
	buffer.set_component(entity, Position { x: 10.0, y: 0.0 }).unwrap();
	buffer.add_component(entity, Rotation { x: 5.0 }).unwrap();

	let moves = store.structural_moves();
	buffer.playback(&mut store).unwrap();
	assert_eq!(store.structural_moves(), moves + 1);

	let archetype = store.entity_archetype(entity).unwrap();
	assert_eq!(archetype.component_types(), ComponentTypes::of::<(Position, Rotation)>());
	assert_eq!(store.get_component::<Position>(entity).unwrap().x, 10.0);
	assert_eq!(store.get_component::<Rotation>(entity).unwrap().x, 5.0);

	let source = store.archetype(source);
	assert_eq!(source.len(), 3);
	assert_eq!(source.entities()[1], entities[3]);
	assert_eq!(source.column::<Position>().unwrap()[1].x, 3.0);
	check_store(&store);
}

#[test]
pub fn last_write_wins() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	let mut buffer = store.get_command_buffer();
	buffer.add_component(entity, Velocity { x: 1.0 }).unwrap();
	buffer.remove_component::<Velocity>(entity).unwrap();
	buffer.add_component(entity, Velocity { x: 2.0 }).unwrap();
	buffer.set_component(entity, Velocity { x: 3.0 }).unwrap();

	let moves = store.structural_moves();
	buffer.playback(&mut store).unwrap();
	assert_eq!(store.structural_moves(), moves + 1);
	assert_eq!(store.get_component::<Velocity>(entity), Some(&Velocity { x: 3.0 }));
}

#[test]
pub fn add_then_remove_is_a_no_op() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();
	store.add_component(entity, Position::default()).unwrap();
	let before = store.entity_node(entity).copied().unwrap();

	let mut buffer = store.get_command_buffer();
	buffer.add_component(entity, Rotation { x: 1.0 }).unwrap();
	buffer.remove_component::<Rotation>(entity).unwrap();
	buffer.add_tag::<Enemy>(entity).unwrap();
	buffer.remove_tag::<Enemy>(entity).unwrap();

	let moves = store.structural_moves();
	buffer.playback(&mut store).unwrap();
	assert_eq!(store.structural_moves(), moves);
	assert_eq!(store.entity_node(entity).copied().unwrap(), before);
	assert!(!store.has_component::<Rotation>(entity));
}

#[test]
pub fn remove_then_add_keeps_the_new_value() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();
	store.add_component(entity, Name("old".to_owned())).unwrap();

	let mut buffer = store.get_command_buffer();
	buffer.remove_component::<Name>(entity).unwrap();
	buffer.add_component(entity, Name("new".to_owned())).unwrap();

	let moves = store.structural_moves();
	buffer.playback(&mut store).unwrap();
	assert_eq!(store.structural_moves(), moves);
	assert_eq!(store.get_component::<Name>(entity), Some(&Name("new".to_owned())));
}

#[test]
pub fn tags_and_components_share_one_move() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	let mut buffer = store.get_command_buffer();
	buffer.add_tags(entity, Tags::of::<(Enemy, Frozen)>()).unwrap();
	buffer.add_component(entity, Position { x: 1.0, y: 2.0 }).unwrap();
	buffer.add_component(entity, Velocity { x: 3.0 }).unwrap();
	buffer.remove_tag::<Frozen>(entity).unwrap();

	let moves = store.structural_moves();
	buffer.playback(&mut store).unwrap();
	assert_eq!(store.structural_moves(), moves + 1);

	let expected = archetype!(store, [Position, Velocity], [Enemy]);
	assert_eq!(store.entity_node(entity).unwrap().archetype(), expected);
	assert_eq!(store.get_component::<Position>(entity), Some(&Position { x: 1.0, y: 2.0 }));
}

#[test]
pub fn created_entities_take_components_in_the_same_buffer() {
	let mut store = EntityStore::new();
	let mut buffer = store.get_command_buffer();

	let entities: Vec<Entity> = (0..10)
		.map(|i| {
			let entity = buffer.create_entity().unwrap();
			buffer.add_component(entity, Position { x: i as f32, y: 0.0 }).unwrap();
			entity
		})
		.collect();
	buffer.playback(&mut store).unwrap();

	assert_eq!(store.entity_count(), 10);
	for (i, entity) in entities.iter().enumerate() {
		assert_eq!(store.get_component::<Position>(*entity).unwrap().x, i as f32);
	}
	let positions = archetype!(store, [Position]);
	assert_eq!(store.archetype(positions).len(), 10);
	check_store(&store);
}

#[test]
pub fn deleting_a_missing_entity_fails() {
	let mut store = EntityStore::new();
	let missing = Entity::from_id(999);

	let mut buffer = store.get_command_buffer();
	let created = buffer.create_entity().unwrap();
	buffer.delete_entity(missing).unwrap();

	assert_eq!(buffer.playback(&mut store), Err(StoreError::EntityNotFound(missing)));
	// Earlier commands stay applied; the failed buffer is cleared but not returned.
	assert!(store.is_alive(created));
	assert!(!buffer.is_returned());
	assert!(buffer.is_empty());
	assert_eq!(store.pooled_command_buffers(), 0);
}

#[test]
pub fn deleting_twice_fails() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	let mut buffer = store.get_command_buffer();
	buffer.delete_entity(entity).unwrap();
	buffer.delete_entity(entity).unwrap();
	assert_eq!(buffer.playback(&mut store), Err(StoreError::EntityNotFound(entity)));
	assert!(!store.is_alive(entity));
}

#[test]
pub fn components_of_deleted_entities_fail() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	let mut buffer = store.get_command_buffer();
	buffer.add_component(entity, Position::default()).unwrap();
	buffer.delete_entity(entity).unwrap();
	assert_eq!(buffer.playback(&mut store), Err(StoreError::EntityNotFound(entity)));
}

#[test]
pub fn set_on_a_missing_component_fails() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	let mut buffer = store.get_command_buffer();
	buffer.set_component(entity, Rotation { x: 1.0 }).unwrap();
	assert!(matches!(
		buffer.playback(&mut store),
		Err(StoreError::ComponentNotFound { entity: e, .. }) if e == entity
	));
	assert!(!store.has_component::<Rotation>(entity));
}

#[test]
pub fn deletes_keep_rows_dense() {
	let mut store = EntityStore::new();
	let entities = spawn_positions(&mut store, 100);

	let mut buffer = store.get_command_buffer();
	for entity in entities.iter().step_by(3) {
		buffer.delete_entity(*entity).unwrap();
	}
	for entity in entities.iter().skip(1).step_by(3) {
		buffer.add_component(*entity, Rotation { x: entity.id() as f32 }).unwrap();
	}
	buffer.playback(&mut store).unwrap();

	assert_eq!(store.entity_count(), 66);
	let positions = archetype!(store, [Position]);
	let rotated = archetype!(store, [Position, Rotation]);
	assert_eq!(store.archetype(positions).len(), 33);
	assert_eq!(store.archetype(rotated).len(), 33);
	for entity in entities.iter().skip(1).step_by(3) {
		assert_eq!(store.get_component::<Rotation>(*entity).unwrap().x, entity.id() as f32);
	}
	check_store(&store);
}

#[test]
pub fn scripts_and_children() {
	let mut store = EntityStore::new();
	let parent = store.create_entity();

	let mut buffer = store.get_command_buffer();
	let child = buffer.create_entity().unwrap();
	buffer.add_child(parent, child).unwrap();
	buffer.add_script(child, Health(5)).unwrap();
	buffer.add_script(child, Patrol).unwrap();
	buffer.remove_script::<Patrol>(child).unwrap();
	buffer.playback(&mut store).unwrap();

	assert_eq!(store.children(parent), &[child]);
	assert_eq!(store.parent(child), Some(parent));
	assert_eq!(store.get_script::<Health>(child), Some(&Health(5)));
	assert_eq!(store.get_script::<Patrol>(child), None);

	let mut buffer = store.get_command_buffer();
	buffer.remove_child(parent, child).unwrap();
	buffer.playback(&mut store).unwrap();
	assert!(store.children(parent).is_empty());
}

#[test]
pub fn rows_stay_dense_under_random_buffered_churn() {
	let mut rng = StdRng::seed_from_u64(0xb0ff);
	let mut store = EntityStore::new();
	let mut alive: Vec<Entity> = Vec::new();

	for _ in 0..60 {
		let mut buffer = store.get_command_buffer();
		// Deleting an entity that other commands in the same buffer touch would fail playback.
		let mut touched: HashSet<Entity> = HashSet::new();

		for _ in 0..40 {
			let op = rng.gen_range(0..6);
			if op == 0 || alive.is_empty() {
				let entity = buffer.create_entity().unwrap();
				touched.insert(entity);
				alive.push(entity);
				continue;
			}

			let index = rng.gen_range(0..alive.len());
			let entity = alive[index];
			match op {
				1 => {
					if !touched.contains(&entity) {
						buffer.delete_entity(entity).unwrap();
						alive.swap_remove(index);
					}
					continue;
				},
				2 => buffer.add_component(entity, Position { x: entity.id() as f32, y: 0.0 }).unwrap(),
				3 => buffer.remove_component::<Position>(entity).unwrap(),
				4 => buffer.add_component(entity, Velocity { x: -(entity.id() as f32) }).unwrap(),
				_ => match rng.gen_bool(0.5) {
					true => buffer.add_tag::<Enemy>(entity).unwrap(),
					false => buffer.remove_tag::<Enemy>(entity).unwrap(),
				},
			}
			touched.insert(entity);
		}

		buffer.playback(&mut store).unwrap();
		check_store(&store);
		assert_eq!(store.entity_count(), alive.len());
		assert_eq!(store.pending_ids(), 0);
	}

	for entity in &alive {
		if let Some(position) = store.get_component::<Position>(*entity) {
			assert_eq!(position.x, entity.id() as f32);
		}
		if let Some(velocity) = store.get_component::<Velocity>(*entity) {
			assert_eq!(velocity.x, -(entity.id() as f32));
		}
	}
}
