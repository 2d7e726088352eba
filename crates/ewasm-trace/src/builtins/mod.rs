//! Builtin implementations that do more than compute a value from their arguments.

mod access;
mod effects;
pub(crate) mod mock;
