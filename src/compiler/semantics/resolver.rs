use std::{collections::HashMap, convert::TryFrom};

use crate::{
    compiler::CompilerError,
    diagnostics::{Tracing, TracingConfig},
    result::Result,
};

use super::symbol_table::{DeclId, Frozen, SymbolTable};

/// The quantities the resolver can compute for a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(super) enum Query {
    Width,
    Value,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mark {
    InProgress,
    Done(u64),
}

/// Computes the widths of every declaration and the values of every
/// parameter of a frozen symbol table.
///
/// Every result is cached once computed. A query which is re-entered while
/// it is still in progress means the declarations reference each other in
/// a cycle, and resolution fails with the path of that cycle.
pub struct Resolver<'a> {
    pub(super) table: &'a SymbolTable<Frozen>,
    marks: HashMap<(DeclId, Query), Mark>,
    stack: Vec<(DeclId, Query)>,
    pub(super) tracing: TracingConfig,
}

impl<'a> Tracing for Resolver<'a> {
    fn set_tracing(&mut self, config: TracingConfig) {
        self.tracing = config;
    }
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a SymbolTable<Frozen>) -> Resolver<'a> {
        Resolver {
            table,
            marks: HashMap::new(),
            stack: vec![],
            tracing: TracingConfig::Off,
        }
    }

    /// Returns the cached result of `query` on `id`, or computes it with
    /// `compute`. Failed computations are not cached.
    pub(super) fn memoized<F>(&mut self, id: DeclId, query: Query, compute: F) -> Result<u64>
    where
        F: FnOnce(&mut Self) -> Result<u64>,
    {
        let key = (id, query);
        match self.marks.get(&key) {
            Some(Mark::Done(v)) => return Ok(*v),
            Some(Mark::InProgress) => return Err(self.cycle(key)),
            None => (),
        }

        self.marks.insert(key, Mark::InProgress);
        self.stack.push(key);
        let result = compute(self);
        self.stack.pop();

        match result {
            Ok(v) => {
                self.marks.insert(key, Mark::Done(v));
            }
            Err(_) => {
                self.marks.remove(&key);
            }
        }
        result
    }

    /// Builds the cycle error for re-entering `key`: the chain of
    /// declarations from the first entry of `key` back to itself.
    fn cycle(&self, key: (DeclId, Query)) -> CompilerError {
        let start = self.stack.iter().position(|k| *k == key).unwrap_or(0);
        let mut path: Vec<String> = self.stack[start..]
            .iter()
            .map(|(id, _)| self.table.get(*id).name().to_string())
            .collect();
        path.dedup();
        path.push(self.table.get(key.0).name().into());
        CompilerError::CyclicDependency(path)
    }
}

/// Converts a computed width into a bit count. Widths must be at least one
/// bit.
pub(super) fn checked_width(name: &str, width: i128) -> Result<u64> {
    if width < 1 {
        return Err(CompilerError::InvalidWidth(name.into(), width));
    }
    u64::try_from(width).map_err(|_| CompilerError::WidthOverflow(name.into()))
}
