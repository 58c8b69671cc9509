//! Resolution of a schema into a [`Package`].
//!
//! Declarations are first registered in a [`SymbolTable`]; only once every
//! declaration is known are names resolved, so a declaration may reference
//! one that appears later in the schema. The [`Resolver`] then computes every
//! width and value, and the [`DependencySorter`] fixes the emission order.
mod dependency_sorter;
mod package;
mod resolver;
mod symbol_table;
mod value_resolver;
mod width_resolver;

pub use dependency_sorter::{topological_order, DependencySorter};
pub use package::*;
pub use resolver::Resolver;
pub use symbol_table::{DeclId, Frozen, Open, SymbolTable};
pub use value_resolver::{bit_width, count_width};

use log::{debug, info};

use crate::{
    compiler::{
        ast::{BaseType, FieldType, Item, Kind},
        schema::Schema,
    },
    diagnostics::{Tracing, TracingConfig},
    result::{NResult, Result},
};

/// Resolves every declaration of `schema` and orders them for emission.
///
/// Registration errors are all reported together. Resolution and sorting
/// stop at the first error.
pub fn resolve_package(
    name: &str,
    source: &str,
    schema: Schema,
    trace_resolver: TracingConfig,
    trace_sorter: TracingConfig,
) -> NResult<Package> {
    let Schema {
        doc_summary,
        doc_verbose,
        items,
    } = schema;

    let table = SymbolTable::from_items(items)?;
    debug!("Symbol table for {}:\n{}", name, table);

    let mut resolver = Resolver::new(&table);
    resolver.set_tracing(trace_resolver);
    let mut resolved = table
        .iter()
        .map(|(id, _)| resolve_item(&mut resolver, id).map(Some))
        .collect::<Result<Vec<_>>>()
        .map_err(|e| vec![e])?;

    let mut sorter = DependencySorter::new(&table);
    sorter.set_tracing(trace_sorter);
    let order = sorter.sort().map_err(|e| vec![e])?;

    let items = order
        .into_iter()
        .filter_map(|id| resolved[id.index()].take())
        .collect();
    info!("Resolved {} declarations of {}", table.len(), name);

    Ok(Package {
        name: name.into(),
        source: source.into(),
        doc_summary,
        doc_verbose,
        items,
    })
}

fn resolve_item(resolver: &mut Resolver, id: DeclId) -> Result<ResolvedItem> {
    let table = resolver.table;
    let item = table.get(id);
    let resolved = match item {
        Item::Parameter(_) => ResolvedItem::Parameter(resolver.parameter(id)?),
        Item::Enum(e) => ResolvedItem::Enum(ResolvedEnum {
            name: e.name.clone(),
            width: resolver.width_of(id)?,
            values: resolver.enumerators(id)?,
            docs: e.docs.clone(),
        }),
        Item::Typedef(t) => ResolvedItem::Typedef(ResolvedTypedef {
            name: t.name.clone(),
            width: resolver.width_of(id)?,
            base: match &t.base {
                BaseType::Logic => None,
                BaseType::Named(base) => Some(base.clone()),
            },
            docs: t.docs.clone(),
        }),
        Item::Struct(s) => {
            let mut fields = vec![];
            for f in &s.fields {
                let ty = match &f.ty {
                    FieldType::Logic(_) => FieldKind::Logic,
                    FieldType::Named(ty) => {
                        let ty_id = resolver.type_ref(&s.name, ty)?;
                        match table.get(ty_id).kind() {
                            Kind::Enum => FieldKind::Enum(ty.clone()),
                            Kind::Typedef => FieldKind::Typedef(ty.clone()),
                            _ => FieldKind::Struct(ty.clone()),
                        }
                    }
                };
                fields.push(ResolvedField {
                    name: f.name.clone(),
                    ty,
                    width: resolver.field_width(s, f)?,
                    docs: f.docs.clone(),
                });
            }

            ResolvedItem::Struct(ResolvedStruct {
                name: s.name.clone(),
                width: resolver.width_of(id)?,
                fields,
                docs: s.docs.clone(),
            })
        }
    };
    Ok(resolved)
}
