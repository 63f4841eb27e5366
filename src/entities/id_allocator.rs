use crate::entities::Entity;
use crate::error::{StoreError, StoreResult};
use std::sync::atomic::{AtomicU32, Ordering};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;
use std::collections::HashSet;
use parking_lot::Mutex;

/// The largest forward jump in the id sequence [IdAllocator::claim] accepts.
const MAX_CLAIM_GAP: u32 = 1 << 20;

#[derive(Default)]
struct IdLists {
	free: Vec<u32>,
	/// Ids a command buffer reserved for an entity it has not created yet.
	pending: HashSet<u32, BuildHasherDefault<NoHashHasher<u32>>>,
}

/// Hands out entity ids.
///
/// Shared between a store and every command buffer it creates, so buffers can
/// reserve ids while recording. Recycled ids are reused last-in, first-out.
pub(crate) struct IdAllocator {
	next: AtomicU32,
	lists: Mutex<IdLists>,
}

impl IdAllocator {
	pub fn new() -> Self {
		Self {
			next: AtomicU32::new(1),
			lists: Mutex::new(IdLists::default()),
		}
	}

	/// Returns a recycled id if one is available, else the next id in sequence.
	///
	/// # Panics
	/// When the id space is exhausted.
	pub fn new_id(&self) -> Entity {
		let mut lists = self.lists.lock();
		Entity::from_id(self.take_id(&mut lists))
	}

	/// Like [new_id](IdAllocator::new_id), but the id stays pending until
	/// [confirm](IdAllocator::confirm) or [release](IdAllocator::release) is called for it.
	/// Pending ids cannot be claimed.
	pub fn new_pending_id(&self) -> Entity {
		let mut lists = self.lists.lock();
		let id = self.take_id(&mut lists);
		lists.pending.insert(id);
		Entity::from_id(id)
	}

	/// The pending id now belongs to a created entity.
	pub fn confirm(&self, id: u32) {
		self.lists.lock().pending.remove(&id);
	}

	/// The pending id will never be created and can be reused.
	pub fn release(&self, id: u32) {
		let mut lists = self.lists.lock();
		if lists.pending.remove(&id) {
			lists.free.push(id);
		}
	}

	/// Makes `id` available for reuse.
	pub fn free(&self, id: u32) {
		self.lists.lock().free.push(id);
	}

	/// Takes a specific id out of circulation.
	///
	/// Recycled ids are removed from the free list. Ids ahead of the sequence
	/// move the sequence forward and the skipped ids are recycled. Ids handed
	/// out by [new_id](IdAllocator::new_id) are accepted as reserved; callers check they are not live.
	/// Ids pending in a command buffer are rejected.
	pub fn claim(&self, id: u32) -> StoreResult<()> {
		if id == 0 {
			return Err(StoreError::InvalidArgument("entity id 0 is reserved".to_string()));
		}

		let mut lists = self.lists.lock();
		if lists.pending.contains(&id) {
			return Err(StoreError::InvalidArgument(format!(
				"entity id {id} is reserved by a command buffer"
			)));
		}
		if let Some(position) = lists.free.iter().rposition(|i| *i == id) {
			lists.free.remove(position);
			return Ok(());
		}

		if id == u32::MAX {
			return Err(StoreError::InvalidArgument("entity id space exhausted".to_string()));
		}

		// The list lock keeps claims exclusive, but the sequence is bumped lock-free.
		let mut next = self.next.load(Ordering::Relaxed);
		loop {
			if id < next {
				// Handed out by `new_id` and not yet created.
				return Ok(());
			}
			if id - next > MAX_CLAIM_GAP {
				return Err(StoreError::InvalidArgument(format!(
					"entity id {id} is too far ahead of the id sequence ({next})"
				)));
			}

			match self.next.compare_exchange(next, id + 1, Ordering::Relaxed, Ordering::Relaxed) {
				Ok(_) => break,
				Err(current) => next = current,
			}
		}

		lists.free.extend((next..id).rev());
		Ok(())
	}

	/// The id the sequence will hand out next.
	pub fn sequence(&self) -> u32 {
		self.next.load(Ordering::Relaxed)
	}

	pub fn recycled(&self) -> usize {
		self.lists.lock().free.len()
	}

	pub fn pending(&self) -> usize {
		self.lists.lock().pending.len()
	}

	fn take_id(&self, lists: &mut IdLists) -> u32 {
		if let Some(id) = lists.free.pop() {
			return id;
		}

		match self.next.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |next| next.checked_add(1)) {
			Ok(id) => id,
			Err(_) => panic!("Entity id space exhausted"),
		}
	}
}
