use crate::components::Tags;
use crate::entities::{Entity, EntityStore};
use crate::error::StoreError;
use crate::tests::{check_store, Enemy, Frozen, Health, Patrol, Position, Rotation};

#[test]
pub fn create_and_delete() {
	let mut store = EntityStore::new();
	let a = store.create_entity();
	let b = store.create_entity();
	assert_ne!(a, b);
	assert_ne!(a.id(), 0);
	assert_eq!(store.entity_count(), 2);
	assert!(store.is_alive(a));

	store.delete_entity(a).unwrap();
	assert!(!store.is_alive(a));
	assert_eq!(store.entity_count(), 1);
	assert_eq!(store.delete_entity(a), Err(StoreError::EntityNotFound(a)));
	check_store(&store);
}

#[test]
pub fn deleted_ids_are_recycled() {
	let mut store = EntityStore::new();
	let a = store.create_entity();
	let b = store.create_entity();
	store.delete_entity(a).unwrap();
	store.delete_entity(b).unwrap();

	assert_eq!(store.create_entity(), b);
	assert_eq!(store.create_entity(), a);
}

#[test]
pub fn create_with_explicit_id() {
	let mut store = EntityStore::new();
	let entity = store.create_entity_with_id(10).unwrap();
	assert_eq!(entity, Entity::from_id(10));
	assert!(store.is_alive(entity));

	assert!(matches!(store.create_entity_with_id(10), Err(StoreError::InvalidArgument(_))));
	assert!(matches!(store.create_entity_with_id(0), Err(StoreError::InvalidArgument(_))));

	// Ids skipped by the claim are handed out before the sequence continues.
	let ids: Vec<u32> = (0..9).map(|_| store.create_entity().id()).collect();
	assert!(ids.iter().all(|id| *id < 10));
	assert_eq!(store.create_entity().id(), 11);
}

#[test]
pub fn reserved_ids_can_be_created_later() {
	let mut store = EntityStore::new();
	let reserved = store.new_id();
	assert!(!store.is_alive(reserved));

	let other = store.create_entity();
	assert_ne!(other, reserved);

	assert_eq!(store.create_entity_with_id(reserved.id()), Ok(reserved));
	assert!(store.is_alive(reserved));
}

#[test]
pub fn ensure_capacity_reports_headroom() {
	let mut store = EntityStore::new();
	assert_eq!(store.ensure_capacity(100), 0);
	assert!(store.ensure_capacity(100) >= 100);

	for _ in 0..10 {
		store.create_entity();
	}
	assert!(store.ensure_capacity(90) >= 90);
}

#[test]
pub fn add_component_reports_moves() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	assert_eq!(store.add_component(entity, Position { x: 1.0, y: 1.0 }), Ok(true));
	assert_eq!(store.add_component(entity, Position { x: 2.0, y: 2.0 }), Ok(false));
	assert_eq!(store.get_component::<Position>(entity), Some(&Position { x: 2.0, y: 2.0 }));
	assert!(store.has_component::<Position>(entity));
	assert!(!store.has_component::<Rotation>(entity));

	store.get_component_mut::<Position>(entity).unwrap().x = 3.0;
	assert_eq!(store.get_component::<Position>(entity).unwrap().x, 3.0);

	assert_eq!(store.remove_component::<Position>(entity), Ok(true));
	assert_eq!(store.remove_component::<Position>(entity), Ok(false));
	check_store(&store);
}

#[test]
pub fn set_requires_the_component() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();
	assert!(matches!(
		store.set_component(entity, Rotation { x: 1.0 }),
		Err(StoreError::ComponentNotFound { .. })
	));

	store.add_component(entity, Rotation::default()).unwrap();
	store.set_component(entity, Rotation { x: 1.0 }).unwrap();
	assert_eq!(store.get_component::<Rotation>(entity), Some(&Rotation { x: 1.0 }));
}

#[test]
pub fn operations_on_dead_entities_fail() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();
	store.delete_entity(entity).unwrap();

	let not_found = Err(StoreError::EntityNotFound(entity));
	assert_eq!(store.add_component(entity, Position::default()), not_found.clone());
	assert_eq!(store.remove_component::<Position>(entity), not_found.clone());
	assert_eq!(store.add_tag::<Enemy>(entity), not_found);
	assert_eq!(store.get_component::<Position>(entity), None);
	assert!(!store.has_tag::<Enemy>(entity));
}

#[test]
pub fn tags() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	assert_eq!(store.add_tag::<Enemy>(entity), Ok(true));
	assert_eq!(store.add_tag::<Enemy>(entity), Ok(false));
	assert!(store.has_tag::<Enemy>(entity));

	let moves = store.structural_moves();
	assert_eq!(store.add_tags(entity, Tags::of::<(Enemy, Frozen)>()), Ok(true));
	assert_eq!(store.structural_moves(), moves + 1);
	assert!(store.has_tag::<Frozen>(entity));

	assert_eq!(store.remove_tags(entity, Tags::of::<(Enemy, Frozen)>()), Ok(true));
	assert!(!store.has_tag::<Enemy>(entity));
	assert_eq!(store.remove_tag::<Frozen>(entity), Ok(false));
	check_store(&store);
}

#[test]
pub fn scripts() {
	let mut store = EntityStore::new();
	let entity = store.create_entity();

	assert!(store.add_script(entity, Health(10)).unwrap().is_none());
	assert!(store.add_script(entity, Patrol).unwrap().is_none());
	assert_eq!(store.scripts(entity).len(), 2);

	let replaced = store.add_script(entity, Health(20)).unwrap().unwrap();
	assert_eq!((*replaced).as_any().downcast_ref::<Health>(), Some(&Health(10)));
	assert_eq!(store.get_script::<Health>(entity), Some(&Health(20)));

	store.get_script_mut::<Health>(entity).unwrap().0 = 30;
	assert_eq!(store.get_script::<Health>(entity), Some(&Health(30)));

	assert!(store.remove_script::<Patrol>(entity).unwrap().is_some());
	assert!(store.remove_script::<Patrol>(entity).unwrap().is_none());
	assert_eq!(store.get_script::<Patrol>(entity), None);

	store.delete_entity(entity).unwrap();
	assert!(store.scripts(entity).is_empty());
	assert!(store.add_script(entity, Patrol).is_err());
}

#[test]
pub fn children() {
	let mut store = EntityStore::new();
	let root = store.create_entity();
	let a = store.create_entity();
	let b = store.create_entity();

	assert_eq!(store.add_child(root, a), Ok(true));
	assert_eq!(store.add_child(root, a), Ok(false));
	assert_eq!(store.add_child(a, b), Ok(true));
	assert_eq!(store.children(root), &[a]);
	assert_eq!(store.parent(b), Some(a));

	assert!(matches!(store.add_child(b, root), Err(StoreError::InvalidOperation(_))));
	assert!(matches!(store.add_child(a, a), Err(StoreError::InvalidOperation(_))));

	// Re-parenting detaches from the previous parent.
	assert_eq!(store.add_child(root, b), Ok(true));
	assert!(store.children(a).is_empty());
	assert_eq!(store.children(root), &[a, b]);

	assert_eq!(store.remove_child(a, b), Ok(false));
	assert_eq!(store.remove_child(root, b), Ok(true));
	assert_eq!(store.parent(b), None);

	store.add_child(a, b).unwrap();
	store.delete_entity(a).unwrap();
	assert_eq!(store.parent(b), None);
	assert!(store.children(root).is_empty());
}
