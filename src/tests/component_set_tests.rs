use crate::components::{Component, ComponentIndex, ComponentTypes, Tag, Tags};
use crate::tests::{Enemy, Frozen, Name, Position, Rotation, Velocity};

#[test]
pub fn component_indices_are_stable() {
	let first = Position::component_index();
	assert_eq!(first, Position::component_index());
	assert_eq!(first, ComponentIndex::of::<Position>());
	assert_ne!(first, Rotation::component_index());
	assert_eq!(first.name(), "Position");
	assert_ne!(Enemy::tag_index(), Frozen::tag_index());
}

#[test]
pub fn sets_ignore_order() {
	let a = ComponentTypes::of::<(Position, Rotation, Velocity)>();
	let b = ComponentTypes::of::<(Velocity, Position, Rotation)>();
	let c = ComponentTypes::new().with::<Rotation>().with::<Velocity>().with::<Position>();
	assert_eq!(a, b);
	assert_eq!(a, c);
	assert_eq!(a.len(), 3);

	assert_eq!(Tags::of::<(Enemy, Frozen)>(), Tags::of::<(Frozen, Enemy)>());
}

#[test]
pub fn membership() {
	let types = ComponentTypes::of::<(Position, Name)>();
	assert!(types.contains::<Position>());
	assert!(types.contains::<Name>());
	assert!(!types.contains::<Rotation>());

	let types = types.without::<Name>();
	assert!(!types.contains::<Name>());
	assert!(ComponentTypes::of::<()>().is_empty());
	assert!(types.is_subset_of(&ComponentTypes::of::<(Position, Rotation)>()));
}

#[test]
pub fn clearing_empties_the_set() {
	let mut types = ComponentTypes::of::<(Position, Rotation)>();
	types.clear();
	assert!(types.is_empty());
	assert_eq!(types, ComponentTypes::new());

	let mut tags = Tags::of::<(Enemy,)>();
	tags.clear();
	assert!(!tags.contains::<Enemy>());
}
