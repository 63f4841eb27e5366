//! Applies a [CommandBuffer] to an [EntityStore] on the owning thread.
//!
//! Commands are applied by kind, in a fixed order:
//! 1. entity creation and deletion
//! 2. tags, folded into one pending change per entity
//! 3. component additions and removals, folded into the same pending changes
//! 4. one structural move per entity whose component types or tags changed
//! 5. component values, written into the post-move rows
//! 6. scripts
//! 7. child links
//!
//! Folding before moving means an entity moves at most once no matter how often its
//! components were touched, and values are never written into a row that is about to move.
//! Playback is not transactional: on error, the phases that already ran stay applied.
//! Entities whose creation was never reached give their reserved ids back.

use crate::commands::{ChildAction, CommandBuffer, CommandLogs, EntityAction, ScriptAction, TagAction};
use crate::entities::EntityStore;
use crate::error::{StoreError, StoreResult};

#[derive(Default, Debug)]
struct PlaybackSummary {
	created: usize,
	deleted: usize,
	changed: usize,
	moved: u64,
}

impl CommandBuffer {
	/// Apply every recorded command to `store` and clear the buffer.
	///
	/// Unless [reuse_buffer](CommandBuffer::set_reuse_buffer) is set, the buffer is returned to
	/// the pool afterwards. On error the commands are discarded, the store keeps every phase
	/// applied before the failure, and the buffer is not returned.
	pub fn playback(&mut self, store: &mut EntityStore) -> StoreResult<()> {
		if !store.owns_ids(self.ids()) {
			return Err(StoreError::InvalidOperation("command buffer belongs to a different store"));
		}

		let logs = self.logs_mut()?;
		let result = execute(logs, store);
		logs.clear();

		let summary = result?;
		tracing::debug!(
			created = summary.created,
			deleted = summary.deleted,
			changed = summary.changed,
			moved = summary.moved,
			"played back command buffer"
		);

		if !self.reuse_buffer() {
			self.return_buffer();
		}
		Ok(())
	}
}

fn execute(logs: &mut CommandLogs, store: &mut EntityStore) -> StoreResult<PlaybackSummary> {
	let CommandLogs {
		entity_commands,
		tag_commands,
		component_logs,
		changed_component_types,
		script_commands,
		child_commands,
		changes,
	} = logs;

	let mut summary = PlaybackSummary::default();
	let moves_before = store.structural_moves();

	for (i, command) in entity_commands.iter().enumerate() {
		let result = match command.action {
			EntityAction::Create => store.create_reserved(command.entity).map(|_| summary.created += 1),
			EntityAction::Delete => store.delete_entity(command.entity).map(|_| summary.deleted += 1),
		};

		if let Err(error) = result {
			for skipped in entity_commands[i + 1..].iter() {
				if skipped.action == EntityAction::Create {
					store.release_reserved(skipped.entity);
				}
			}
			return Err(error);
		}
	}

	for command in tag_commands.iter() {
		let change = changes.get_or_insert(command.entity, store)?;
		change.tags.set_index(command.tag, command.action == TagAction::Add);
	}

	for index in changed_component_types.iter() {
		if let Some(log) = component_logs[index.value()].as_mut() {
			log.update_component_types(store, changes)?;
		}
	}

	for (entity, change) in changes.iter() {
		store.move_to_signature(entity, change.types, change.tags)?;
	}
	summary.changed = changes.len();

	for index in changed_component_types.iter() {
		if let Some(log) = component_logs[index.value()].as_mut() {
			log.write_values(store)?;
		}
	}

	for command in script_commands.drain(..) {
		match command.action {
			ScriptAction::Add(script) => {
				store.add_script_boxed(command.entity, script)?;
			},
			ScriptAction::Remove(type_id) => {
				store.remove_script_by_type(command.entity, type_id)?;
			},
		}
	}

	for command in child_commands.iter() {
		match command.action {
			ChildAction::Add => store.add_child(command.parent, command.child)?,
			ChildAction::Remove => store.remove_child(command.parent, command.child)?,
		};
	}

	summary.moved = store.structural_moves() - moves_before;
	Ok(summary)
}
