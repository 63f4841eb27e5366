use std::fmt::{Debug, Formatter};

const BITS: usize = 64;
const WORDS: usize = 4;

/// A fixed-size, value-typed bit-set.
///
/// Two [BitSets](BitSet) holding the same bits compare and hash identically,
/// no matter in which order the bits were set.
#[derive(Default, Copy, Clone, Hash, Eq, PartialEq)]
pub struct BitSet {
	values: [u64; WORDS],
}

impl BitSet {
	/// The number of addressable bits.
	pub const CAPACITY: usize = BITS * WORDS;

	/// Create an empty [BitSet].
	pub const fn new() -> Self {
		Self { values: [0; WORDS] }
	}

	/// Get the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to retrieve
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		let (position, shift) = Self::pos_shift(i);
		(self.values[position] & (1 << shift)) != 0
	}

	/// Set the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to modify
	/// * `value` - The new value of the bit
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) {
		let (position, shift) = Self::pos_shift(i);
		match value {
			true => self.values[position] |= 1 << shift,
			false => self.values[position] &= !(1 << shift),
		}
	}

	/// Returns a copy of the [BitSet] with bit `i` set.
	#[inline(always)]
	pub fn with(mut self, i: usize) -> Self {
		self.set(i, true);
		self
	}

	/// Returns a copy of the [BitSet] with bit `i` cleared.
	#[inline(always)]
	pub fn without(mut self, i: usize) -> Self {
		self.set(i, false);
		self
	}

	/// Returns the number of set bits.
	pub fn count(&self) -> usize {
		self.values.iter().map(|v| v.count_ones() as usize).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.values.iter().all(|v| *v == 0)
	}

	/// Returns the number of set bits with an index lower than `i`.
	///
	/// Used to map a bit to its position in a densely packed array
	/// containing one element per set bit.
	pub fn rank(&self, i: usize) -> usize {
		let (position, shift) = Self::pos_shift(i);
		let below: usize = self.values[..position].iter().map(|v| v.count_ones() as usize).sum();
		let mask = (1u64 << shift) - 1;
		below + (self.values[position] & mask).count_ones() as usize
	}

	/// Check if the [BitSet] is a subset of another [BitSet].
	///
	/// # Arguments
	/// * `other` - The bit-set to check against
	pub fn is_subset_of(&self, other: &BitSet) -> bool {
		self.values.iter().zip(other.values.iter()).all(|(mask, bits)| (*bits & *mask) == *mask)
	}

	/// Returns the bits set in either [BitSet].
	pub fn union(&self, other: &BitSet) -> BitSet {
		let mut values = self.values;
		for (value, other) in values.iter_mut().zip(other.values.iter()) {
			*value |= *other;
		}
		Self { values }
	}

	/// Returns the bits set in both [BitSets](BitSet).
	pub fn intersection(&self, other: &BitSet) -> BitSet {
		let mut values = self.values;
		for (value, other) in values.iter_mut().zip(other.values.iter()) {
			*value &= *other;
		}
		Self { values }
	}

	/// Set all bits to 0.
	pub fn clear(&mut self) {
		self.values = [0; WORDS];
	}

	/// Iterate over the indices of the set bits in ascending order.
	pub fn iter(&self) -> BitSetIterator {
		BitSetIterator {
			index: 0,
			current: self.values[0],
			values: self.values,
		}
	}

	#[inline(always)]
	fn pos_shift(i: usize) -> (usize, usize) {
		assert!(i < Self::CAPACITY, "Bit index {i} is out of range");
		(i / BITS, i % BITS)
	}
}

impl FromIterator<usize> for BitSet {
	fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
		let mut bits = BitSet::new();
		for i in iter {
			bits.set(i, true);
		}
		bits
	}
}

impl Debug for BitSet {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

/// Iterates over the indices of the set bits of a [BitSet].
pub struct BitSetIterator {
	index: usize,
	current: u64,
	values: [u64; WORDS],
}

impl Iterator for BitSetIterator {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.current == 0 {
			self.index += 1;
			if self.index >= WORDS {
				return None;
			}
			self.current = self.values[self.index];
		}

		let bit = self.current.trailing_zeros() as usize;
		self.current &= self.current - 1;
		Some(self.index * BITS + bit)
	}
}
