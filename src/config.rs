/// Tuning knobs of an [EntityStore](crate::entities::EntityStore).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreConfig {
	/// Row capacity of a freshly created archetype, rounded up to a power of two.
	/// Archetypes never shrink below it.
	pub default_archetype_capacity: usize,

	/// An archetype halves its capacity once its length drops to `capacity / shrink_divisor` or less.
	pub shrink_divisor: usize,

	/// Number of entity slots reserved up front.
	pub initial_entity_capacity: usize,
}

impl StoreConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_default_archetype_capacity(mut self, capacity: usize) -> Self {
		self.default_archetype_capacity = capacity;
		self
	}

	pub fn with_shrink_divisor(mut self, divisor: usize) -> Self {
		self.shrink_divisor = divisor;
		self
	}

	pub fn with_initial_entity_capacity(mut self, capacity: usize) -> Self {
		self.initial_entity_capacity = capacity;
		self
	}

	pub(crate) fn archetype_capacity(&self) -> usize {
		usize::max(1, self.default_archetype_capacity).next_power_of_two()
	}

	pub(crate) fn shrink_divisor(&self) -> usize {
		// Below 2 a shrink could cut into live rows.
		usize::max(2, self.shrink_divisor)
	}
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			default_archetype_capacity: 512,
			shrink_divisor: 4,
			initial_entity_capacity: 0,
		}
	}
}
