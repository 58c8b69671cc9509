use log::debug;
use stdext::function_name;

use crate::{
    compiler::CompilerError,
    diagnostics::{Tracing, TracingConfig},
    result::Result,
};

use super::symbol_table::{DeclId, Frozen, SymbolTable};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Color {
    /// Not visited yet.
    White,
    /// Visit in progress: the declaration is on the current path.
    Gray,
    /// Visited and appended to the order.
    Black,
}

/// Orders declarations so that every declaration comes after everything it
/// references.
///
/// Declarations are visited depth first in declaration order, and each
/// declaration's references in the order they are written, so declarations
/// with no dependency between them keep their relative schema order.
pub struct DependencySorter<'a> {
    table: &'a SymbolTable<Frozen>,
    colors: Vec<Color>,
    path: Vec<DeclId>,
    order: Vec<DeclId>,
    tracing: TracingConfig,
}

impl<'a> Tracing for DependencySorter<'a> {
    fn set_tracing(&mut self, config: TracingConfig) {
        self.tracing = config;
    }
}

impl<'a> DependencySorter<'a> {
    pub fn new(table: &'a SymbolTable<Frozen>) -> DependencySorter<'a> {
        DependencySorter {
            table,
            colors: vec![Color::White; table.len()],
            path: vec![],
            order: vec![],
            tracing: TracingConfig::Off,
        }
    }

    /// Consumes the sorter and returns the emission order of every
    /// declaration in the table.
    pub fn sort(mut self) -> Result<Vec<DeclId>> {
        debug!("Sorting {} declarations", self.table.len());
        let table = self.table;
        for (id, _) in table.iter() {
            self.visit(id)?;
        }
        Ok(self.order)
    }

    fn visit(&mut self, id: DeclId) -> Result<()> {
        match self.colors[id.index()] {
            Color::Black => return Ok(()),
            Color::Gray => return Err(self.cycle(id)),
            Color::White => (),
        }

        let table = self.table;
        let item = table.get(id);
        trace!(self, id, item.name());

        self.colors[id.index()] = Color::Gray;
        self.path.push(id);
        for name in item.references() {
            let dep = table.resolve_ref(item.name(), name)?;
            self.visit(dep)?;
        }
        self.path.pop();
        self.colors[id.index()] = Color::Black;

        self.order.push(id);
        Ok(())
    }

    fn cycle(&self, id: DeclId) -> CompilerError {
        let start = self.path.iter().position(|p| *p == id).unwrap_or(0);
        let mut path: Vec<String> = self.path[start..]
            .iter()
            .map(|p| self.table.get(*p).name().to_string())
            .collect();
        path.push(self.table.get(id).name().into());
        CompilerError::CyclicDependency(path)
    }
}

/// Returns every declaration of `table` in an order where each
/// declaration follows the declarations it references.
pub fn topological_order(table: &SymbolTable<Frozen>) -> Result<Vec<DeclId>> {
    DependencySorter::new(table).sort()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::schema::Schema;

    fn order(text: &str) -> Result<Vec<String>> {
        let schema = Schema::from_str(text).unwrap();
        let table = SymbolTable::from_items(schema.items).unwrap();
        topological_order(&table).map(|ids| {
            ids.into_iter()
                .map(|id| table.get(id).name().to_string())
                .collect()
        })
    }

    #[test]
    fn dependencies_come_first() {
        let text = "
structs:
  - name: top_t
    doc_summary: top
    fields:
      - name: a
        type: mid_t
        doc_summary: a
      - name: b
        type: kind_e
        doc_summary: b
  - name: mid_t
    doc_summary: mid
    fields:
      - name: a
        type: logic
        width: W
        doc_summary: a
  - name: lone_t
    doc_summary: lone
    fields:
      - name: a
        type: logic
        doc_summary: a
enums:
  - name: kind_e
    width: 1
    doc_summary: kind
    values:
      - name: A
        doc_summary: a
localparams:
  - name: W
    value: 5
    doc_summary: w
";
        assert_eq!(
            order(text).unwrap(),
            vec!["W", "mid_t", "kind_e", "top_t", "lone_t"]
        );
    }

    #[test]
    fn unrelated_declarations_keep_schema_order() {
        for (text, expected) in vec![
            (
                "
localparams:
  - name: A
    value: 1
    doc_summary: a
  - name: B
    value: 2
    doc_summary: b
",
                vec!["A", "B"],
            ),
            (
                "
localparams:
  - name: B
    value: 2
    doc_summary: b
  - name: A
    value: 1
    doc_summary: a
",
                vec!["B", "A"],
            ),
        ] {
            assert_eq!(order(text).unwrap(), expected);
        }
    }

    #[test]
    fn cycles_report_the_full_path() {
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
      - name: c
        type: c_t
        doc_summary: c
  - name: c_t
    doc_summary: c
    fields:
      - name: b
        type: b_t
        doc_summary: b
";
        assert_eq!(
            order(text),
            Err(CompilerError::CyclicDependency(vec![
                "b_t".into(),
                "c_t".into(),
                "b_t".into()
            ]))
        );
    }

    #[test]
    fn unknown_references_fail() {
        let text = "
typedefs:
  - name: t_t
    base_type: logic
    width: MISSING
    doc_summary: t
";
        assert_eq!(
            order(text),
            Err(CompilerError::UnknownReference(
                "t_t".into(),
                "MISSING".into()
            ))
        );
    }
}
