mod pool;
mod any_vec;
mod bit_field;

pub use pool::*;
pub use bit_field::*;

pub(crate) use any_vec::*;
