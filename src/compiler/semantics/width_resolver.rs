use stdext::function_name;

use crate::{
    compiler::{
        ast::{BaseType, Field, FieldType, Item, Kind, StructDef},
        CompilerError,
    },
    result::Result,
};

use super::{
    resolver::{checked_width, Query, Resolver},
    symbol_table::DeclId,
    value_resolver::bit_width,
};

impl<'a> Resolver<'a> {
    /// Computes the width, in bits, of a declaration.
    ///
    /// Parameters are as wide as their value needs. Enums and typedefs have
    /// the width the schema gives them; a typedef over another type is that
    /// type's width times the declared width. Structs are the sum of their
    /// fields.
    pub fn width_of(&mut self, id: DeclId) -> Result<u64> {
        trace!(self, id, self.table.get(id).name());
        self.memoized(id, Query::Width, |r| {
            let table = r.table;
            match table.get(id) {
                Item::Parameter(_) => r.value_of(id).map(bit_width),
                Item::Enum(e) => {
                    let width = r.eval(&e.width, &e.name)?;
                    checked_width(&e.name, width)
                }
                Item::Typedef(t) => {
                    let width = r.eval(&t.width, &t.name)?;
                    let width = checked_width(&t.name, width)?;
                    match &t.base {
                        BaseType::Logic => Ok(width),
                        BaseType::Named(base) => {
                            let base_width = r.type_width(&t.name, base)?;
                            base_width
                                .checked_mul(width)
                                .ok_or_else(|| CompilerError::WidthOverflow(t.name.clone()))
                        }
                    }
                }
                Item::Struct(s) => s.fields.iter().try_fold(0u64, |total, f| {
                    let width = r.field_width(s, f)?;
                    total
                        .checked_add(width)
                        .ok_or_else(|| CompilerError::WidthOverflow(s.name.clone()))
                }),
            }
        })
    }

    /// Computes the width of one field of a struct.
    pub fn field_width(&mut self, owner: &StructDef, field: &Field) -> Result<u64> {
        match &field.ty {
            FieldType::Logic(width) => {
                let qualified = format!("{}.{}", owner.name, field.name);
                let width = self.eval(width, &owner.name)?;
                checked_width(&qualified, width)
            }
            FieldType::Named(ty) => self.type_width(&owner.name, ty),
        }
    }

    /// The width of the type named `ty`, used by the declaration `from`.
    /// Only enums, typedefs, and structs are types.
    fn type_width(&mut self, from: &str, ty: &str) -> Result<u64> {
        let id = self.type_ref(from, ty)?;
        self.width_of(id)
    }

    pub(super) fn type_ref(&self, from: &str, ty: &str) -> Result<DeclId> {
        let id = self.table.resolve_ref(from, ty)?;
        match self.table.get(id).kind() {
            Kind::Parameter => Err(CompilerError::WrongKind {
                from: from.into(),
                name: ty.into(),
                found: Kind::Parameter,
                expected: "a type",
            }),
            _ => Ok(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::compiler::{
        schema::Schema,
        semantics::{Resolver, SymbolTable},
        CompilerError,
    };

    fn widths(text: &str) -> Vec<(String, Result<u64, CompilerError>)> {
        let schema = Schema::from_str(text).unwrap();
        let table = SymbolTable::from_items(schema.items).unwrap();
        let mut resolver = Resolver::new(&table);
        table
            .iter()
            .map(|(id, item)| (item.name().to_string(), resolver.width_of(id)))
            .collect()
    }

    fn width(text: &str, name: &str) -> Result<u64, CompilerError> {
        widths(text)
            .into_iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| w)
            .unwrap()
    }

    #[test]
    fn nested_struct_widths() {
        // hero_t references sub_t, which is declared after it
        let text = "
structs:
  - name: hero_t
    doc_summary: Hero
    fields:
      - name: kind
        type: kind_e
        doc_summary: kind
      - name: data
        type: logic
        width: 36
        doc_summary: data
      - name: sub
        type: sub_t
        doc_summary: sub
      - name: valid
        type: logic
        doc_summary: valid
  - name: sub_t
    doc_summary: Sub
    fields:
      - name: a
        type: logic
        doc_summary: a
      - name: b
        type: logic
        width: NESTED
        doc_summary: b
      - name: c
        type: pair_t
        doc_summary: c
enums:
  - name: kind_e
    width: 2
    doc_summary: Kinds
    values:
      - name: A
        doc_summary: a
typedefs:
  - name: pair_t
    base_type: logic
    width: 2
    doc_summary: Pair
localparams:
  - name: NESTED
    value: 4
    doc_summary: nested
";
        for (name, expected) in vec![
            ("hero_t", 46),
            ("sub_t", 7),
            ("kind_e", 2),
            ("pair_t", 2),
            ("NESTED", 3),
        ] {
            assert_eq!(width(text, name), Ok(expected), "{}", name);
        }
    }

    #[test]
    fn typedef_of_named_type_is_packed_array() {
        let text = "
typedefs:
  - name: lane_t
    base_type: logic
    width: 8
    doc_summary: lane
  - name: lanes_t
    base_type: lane_t
    width: LANES
    doc_summary: lanes
localparams:
  - name: LANES
    value: 4
    doc_summary: lanes
";
        assert_eq!(width(text, "lanes_t"), Ok(32));
    }

    #[test]
    fn cyclical_structs_fail() {
        let text = "
structs:
  - name: a_t
    doc_summary: a
    fields:
      - name: b
        type: b_t
        doc_summary: b
  - name: b_t
    doc_summary: b
    fields:
      - name: a
        type: a_t
        doc_summary: a
";
        assert_eq!(
            width(text, "a_t"),
            Err(CompilerError::CyclicDependency(vec![
                "a_t".into(),
                "b_t".into(),
                "a_t".into()
            ]))
        );
    }

    #[test]
    fn self_referencing_parameter_fails() {
        let text = "
localparams:
  - name: A
    value: A.width
    doc_summary: a
";
        assert_eq!(
            width(text, "A"),
            Err(CompilerError::CyclicDependency(vec!["A".into(), "A".into()]))
        );
    }

    #[test]
    fn width_errors() {
        for (text, expected) in vec![
            (
                "
enums:
  - name: e_t
    width: 0
    doc_summary: e
    values:
      - name: A
        doc_summary: a
",
                CompilerError::InvalidWidth("e_t".into(), 0),
            ),
            (
                "
structs:
  - name: s_t
    doc_summary: s
    fields:
      - name: f
        type: logic
        width: ZERO
        doc_summary: f
localparams:
  - name: ZERO
    value: 0
    doc_summary: zero
",
                CompilerError::InvalidWidth("s_t.f".into(), 0),
            ),
            (
                "
structs:
  - name: s_t
    doc_summary: s
    fields:
      - name: f
        type: missing_t
        doc_summary: f
",
                CompilerError::UnknownReference("s_t".into(), "missing_t".into()),
            ),
            (
                "
structs:
  - name: s_t
    doc_summary: s
    fields:
      - name: f
        type: DEPTH
        doc_summary: f
localparams:
  - name: DEPTH
    value: 3
    doc_summary: depth
",
                CompilerError::WrongKind {
                    from: "s_t".into(),
                    name: "DEPTH".into(),
                    found: crate::compiler::ast::Kind::Parameter,
                    expected: "a type",
                },
            ),
        ] {
            let results = widths(text);
            assert_eq!(results[0].1, Err(expected));
        }
    }
}
