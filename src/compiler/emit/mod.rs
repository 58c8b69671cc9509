//! Backends which turn a resolved [`Package`] into an output artifact.
//!
//! A package is only built once every width and value has been validated,
//! so emission cannot fail. Any failure in a backend is a bug in the
//! compiler and panics.
mod c_header;
mod json;
pub mod naming;

pub use c_header::{CHeader, Storage};
pub use json::JsonDump;

use crate::compiler::semantics::Package;

pub trait Emitter {
    fn emit(&self, package: &Package) -> String;
}

/// The available backends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EmitTarget {
    C,
    Json,
}

impl EmitTarget {
    /// The file extension of the artifact this backend produces.
    pub fn extension(&self) -> &'static str {
        match self {
            EmitTarget::C => "h",
            EmitTarget::Json => "json",
        }
    }

    pub fn emitter(&self) -> Box<dyn Emitter> {
        match self {
            EmitTarget::C => Box::new(CHeader),
            EmitTarget::Json => Box::new(JsonDump),
        }
    }
}

impl Default for EmitTarget {
    fn default() -> Self {
        EmitTarget::C
    }
}

impl std::str::FromStr for EmitTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" => Ok(EmitTarget::C),
            "json" => Ok(EmitTarget::Json),
            _ => Err(format!("Unknown emit target: {}", s)),
        }
    }
}
