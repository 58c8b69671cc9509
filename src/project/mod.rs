mod project;

pub use project::*;
