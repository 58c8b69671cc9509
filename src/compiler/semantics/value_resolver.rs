use std::convert::TryFrom;

use stdext::function_name;

use crate::{
    compiler::{
        ast::{Attribute, Expr, Item, Kind},
        CompilerError,
    },
    result::Result,
};

use super::{
    package::{ResolvedEnumerator, ResolvedParameter},
    resolver::{Query, Resolver},
    symbol_table::DeclId,
};

/// The number of bits needed to represent `value`. Zero takes one bit.
pub fn bit_width(value: u64) -> u64 {
    std::cmp::max(1, 64 - value.leading_zeros() as u64)
}

/// The number of bits needed to count from 0 to `value` inclusive, that is
/// to represent `value + 1`.
pub fn count_width(value: u64) -> u64 {
    let count = value as u128 + 1;
    128 - count.leading_zeros() as u64
}

/// Returns true if a non-negative `value` can be represented in `width` bits.
fn fits(value: i128, width: u64) -> bool {
    value >= 0 && (width >= 127 || value < (1i128 << width))
}

impl<'a> Resolver<'a> {
    /// Computes the value of a parameter. Parameter values must not be
    /// negative.
    pub fn value_of(&mut self, id: DeclId) -> Result<u64> {
        trace!(self, id, self.table.get(id).name());
        self.memoized(id, Query::Value, |r| {
            let table = r.table;
            match table.get(id) {
                Item::Parameter(p) => {
                    let value = r.eval(&p.value, &p.name)?;
                    u64::try_from(value)
                        .map_err(|_| CompilerError::InvalidParameter(p.name.clone(), value))
                }
                item => Err(CompilerError::WrongKind {
                    from: item.name().into(),
                    name: item.name().into(),
                    found: item.kind(),
                    expected: "a parameter",
                }),
            }
        })
    }

    /// Evaluates an expression used by the declaration named `owner`.
    /// `.value` may only read a parameter; `.width` may read any declaration.
    pub fn eval(&mut self, expr: &Expr, owner: &str) -> Result<i128> {
        match expr {
            Expr::Literal(lit) => Ok(*lit as i128),
            Expr::Ref(name, Attribute::Value) => {
                let id = self.table.resolve_ref(owner, name)?;
                let kind = self.table.get(id).kind();
                if kind != Kind::Parameter {
                    return Err(CompilerError::WrongKind {
                        from: owner.into(),
                        name: name.clone(),
                        found: kind,
                        expected: "a parameter",
                    });
                }
                self.value_of(id).map(|v| v as i128)
            }
            Expr::Ref(name, Attribute::Width) => {
                let id = self.table.resolve_ref(owner, name)?;
                self.width_of(id).map(|w| w as i128)
            }
        }
    }

    /// Assigns a concrete value to every enumerator of an enum. An
    /// enumerator without an explicit value is one more than the enumerator
    /// before it, or 0 if it is the first. Every value must fit in the
    /// width of the enum.
    pub fn enumerators(&mut self, id: DeclId) -> Result<Vec<ResolvedEnumerator>> {
        let table = self.table;
        let e = match table.get(id) {
            Item::Enum(e) => e,
            item => {
                return Err(CompilerError::WrongKind {
                    from: item.name().into(),
                    name: item.name().into(),
                    found: item.kind(),
                    expected: "an enum",
                })
            }
        };

        let width = self.width_of(id)?;
        let mut previous: Option<i128> = None;
        let mut resolved = vec![];

        for v in &e.values {
            let value = match (v.value, previous) {
                (Some(explicit), _) => explicit as i128,
                (None, Some(prev)) => prev + 1,
                (None, None) => 0,
            };

            if !fits(value, width) {
                return Err(CompilerError::EnumeratorOverflow {
                    name: e.name.clone(),
                    enumerator: v.name.clone(),
                    value,
                    width,
                });
            }

            resolved.push(ResolvedEnumerator {
                name: v.name.clone(),
                value: u64::try_from(value).map_err(|_| CompilerError::EnumeratorOverflow {
                    name: e.name.clone(),
                    enumerator: v.name.clone(),
                    value,
                    width,
                })?,
                docs: v.docs.clone(),
            });
            previous = Some(value);
        }

        Ok(resolved)
    }

    /// Resolves a parameter and its derived constants.
    pub fn parameter(&mut self, id: DeclId) -> Result<ResolvedParameter> {
        let value = self.value_of(id)?;
        let item = self.table.get(id);
        Ok(ResolvedParameter {
            name: item.name().into(),
            value,
            width: bit_width(value),
            count_width: count_width(value),
            width_one: 1,
            docs: item.docs().clone(),
        })
    }
}
