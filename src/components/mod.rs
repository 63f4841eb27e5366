//! [Components](Component) hold the data of an [entity](crate::entities::Entity),
//! [tags](Tag) mark it without carrying data.
//!
//! Both are registered lazily on first use and identified by a small process-wide index.

mod component_id;
mod component_set;
mod component_type;

pub use component_id::*;
pub use component_set::*;
pub use component_type::*;
pub use turbo_store_derive::{Component, Tag};
