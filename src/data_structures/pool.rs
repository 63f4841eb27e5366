use parking_lot::Mutex;
use std::sync::Arc;

/// A shared stack of reusable values.
///
/// The most recently returned value is handed out first.
/// The lock is only held for the duration of a single push or pop.
pub struct Pool<T> {
	values: Arc<Mutex<Vec<T>>>,
}

impl<T> Pool<T> {
	pub fn new() -> Self {
		Self {
			values: Arc::new(Mutex::new(Vec::new())),
		}
	}

	/// Take the most recently returned value, if any.
	pub fn try_take(&self) -> Option<T> {
		self.values.lock().pop()
	}

	/// Take the most recently returned value or create a new one.
	pub fn take_or_else(&self, make: impl FnOnce() -> T) -> T {
		self.try_take().unwrap_or_else(make)
	}

	/// Return a value to the pool.
	pub fn give_back(&self, value: T) {
		self.values.lock().push(value);
	}

	/// The number of values currently available.
	pub fn available(&self) -> usize {
		self.values.lock().len()
	}
}

impl<T> Clone for Pool<T> {
	fn clone(&self) -> Self {
		Self {
			values: self.values.clone(),
		}
	}
}

impl<T> Default for Pool<T> {
	fn default() -> Self {
		Self::new()
	}
}
