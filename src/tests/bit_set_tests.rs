use crate::data_structures::BitSet;

#[test]
pub fn set_and_get() {
	let mut bits = BitSet::new();
	assert!(bits.is_empty());

	bits.set(0, true);
	bits.set(63, true);
	bits.set(64, true);
	bits.set(BitSet::CAPACITY - 1, true);

	assert!(bits.get(0));
	assert!(bits.get(63));
	assert!(bits.get(64));
	assert!(bits.get(BitSet::CAPACITY - 1));
	assert!(!bits.get(1));
	assert_eq!(bits.count(), 4);

	bits.set(63, false);
	assert!(!bits.get(63));
	assert_eq!(bits.count(), 3);
}

#[test]
pub fn iterates_in_ascending_order() {
	let bits: BitSet = [200, 3, 64, 130, 0].into_iter().collect();
	let values: Vec<usize> = bits.iter().collect();
	assert_eq!(values, vec![0, 3, 64, 130, 200]);
}

#[test]
pub fn rank_counts_lower_bits() {
	let bits = BitSet::new().with(2).with(70).with(71).with(255);
	assert_eq!(bits.rank(2), 0);
	assert_eq!(bits.rank(70), 1);
	assert_eq!(bits.rank(71), 2);
	assert_eq!(bits.rank(255), 3);
}

#[test]
pub fn equality_ignores_insertion_order() {
	let a = BitSet::new().with(5).with(100).with(7);
	let b = BitSet::new().with(7).with(5).with(100);
	assert_eq!(a, b);
	assert_ne!(a, b.without(100));
}

#[test]
pub fn set_operations() {
	let a = BitSet::new().with(1).with(2);
	let b = BitSet::new().with(2).with(3);

	assert_eq!(a.union(&b), BitSet::new().with(1).with(2).with(3));
	assert_eq!(a.intersection(&b), BitSet::new().with(2));
	assert!(BitSet::new().with(2).is_subset_of(&a));
	assert!(!b.is_subset_of(&a));

	let mut c = a;
	c.clear();
	assert!(c.is_empty());
}

#[test]
#[should_panic]
pub fn out_of_range_panics() {
	BitSet::new().with(BitSet::CAPACITY);
}
