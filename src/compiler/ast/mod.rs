//! The raw declarations of a schema, before any name has been resolved.
mod expr;
mod item;

pub use expr::*;
pub use item::*;
