//! Deferred mutation of an [EntityStore](crate::entities::EntityStore).
//!
//! A [CommandBuffer] records entity, tag, component, script and child changes without touching
//! storage. [CommandBufferSynced] allows many threads to record into one buffer.
//! Recorded commands are applied in one [playback](CommandBuffer::playback) on the owning thread.

mod command;
mod playback;
mod component_log;
mod entity_changes;
mod command_buffer;
mod command_buffer_synced;

pub use command_buffer::*;
pub use command_buffer_synced::*;

pub(crate) use command::*;
pub(crate) use component_log::*;
pub(crate) use entity_changes::*;
