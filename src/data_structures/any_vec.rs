use std::any::Any;

/// A type-erased, densely packed column of values.
///
/// All columns of an archetype are kept at the same length and row order,
/// so every operation here is expressed in rows rather than values.
pub(crate) trait AnyVec: Send + Sync {
	fn len(&self) -> usize;

	/// Append the default value of the column's type.
	fn push_default(&mut self);

	/// Remove `row` by moving the last value into its place.
	fn swap_remove(&mut self, row: usize);

	/// Swap-remove `row` and append its value to `dst`.
	///
	/// # Panics
	/// If `dst` does not hold the same element type.
	fn move_row(&mut self, row: usize, dst: &mut dyn AnyVec);

	/// Grow or shrink the allocation to hold exactly `capacity` rows,
	/// never dropping below the current length.
	fn set_capacity(&mut self, capacity: usize);

	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub(crate) struct TypedVec<T> {
	values: Vec<T>,
}

impl<T: 'static + Default + Send + Sync> TypedVec<T> {
	pub fn new() -> Self {
		Self { values: Vec::new() }
	}

	pub fn boxed() -> Box<dyn AnyVec> {
		Box::new(Self::new())
	}

	#[inline(always)]
	pub fn as_slice(&self) -> &[T] {
		&self.values
	}

	#[inline(always)]
	pub fn as_mut_slice(&mut self) -> &mut [T] {
		&mut self.values
	}
}

impl<T: 'static + Default + Send + Sync> AnyVec for TypedVec<T> {
	#[inline(always)]
	fn len(&self) -> usize {
		self.values.len()
	}

	fn push_default(&mut self) {
		self.values.push(T::default());
	}

	fn swap_remove(&mut self, row: usize) {
		self.values.swap_remove(row);
	}

	fn move_row(&mut self, row: usize, dst: &mut dyn AnyVec) {
		let value = self.values.swap_remove(row);
		let dst = dst
			.as_any_mut()
			.downcast_mut::<TypedVec<T>>()
			.expect("Destination column does not contain elements of type T");
		dst.values.push(value);
	}

	fn set_capacity(&mut self, capacity: usize) {
		set_vec_capacity(&mut self.values, capacity);
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Grow or shrink `vec`'s allocation towards `capacity`, never dropping below its length.
pub(crate) fn set_vec_capacity<T>(vec: &mut Vec<T>, capacity: usize) {
	let capacity = usize::max(capacity, vec.len());
	if capacity > vec.capacity() {
		vec.reserve_exact(capacity - vec.len());
	} else {
		vec.shrink_to(capacity);
	}
}
