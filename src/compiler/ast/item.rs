use serde::Serialize;

use super::expr::Expr;

/// The documentation attached to a declaration, enumerator, or field.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Docs {
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<String>,
}

impl Docs {
    pub fn new(summary: &str, verbose: Option<&str>) -> Docs {
        Docs {
            summary: summary.into(),
            verbose: verbose.map(|v| v.into()),
        }
    }
}

/// The kinds of declaration a schema can contain. This set is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Parameter,
    Enum,
    Typedef,
    Struct,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Parameter => f.write_str("a parameter"),
            Kind::Enum => f.write_str("an enum"),
            Kind::Typedef => f.write_str("a typedef"),
            Kind::Struct => f.write_str("a struct"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: Expr,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enumerator {
    pub name: String,
    /// Explicit value; `None` continues from the previous enumerator.
    pub value: Option<i64>,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumDef {
    pub name: String,
    pub width: Expr,
    pub values: Vec<Enumerator>,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BaseType {
    /// A plain bit vector.
    Logic,
    /// A packed array of another enum, typedef, or struct.
    Named(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Typedef {
    pub name: String,
    pub base: BaseType,
    pub width: Expr,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldType {
    /// A bit vector whose width is given by an expression.
    Logic(Expr),
    /// An enum, typedef, or struct.
    Named(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<Field>,
    pub docs: Docs,
}

/// A raw, unresolved declaration as it was written in the schema.
#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Parameter(Parameter),
    Enum(EnumDef),
    Typedef(Typedef),
    Struct(StructDef),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Parameter(p) => &p.name,
            Item::Enum(e) => &e.name,
            Item::Typedef(t) => &t.name,
            Item::Struct(s) => &s.name,
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Item::Parameter(_) => Kind::Parameter,
            Item::Enum(_) => Kind::Enum,
            Item::Typedef(_) => Kind::Typedef,
            Item::Struct(_) => Kind::Struct,
        }
    }

    pub fn docs(&self) -> &Docs {
        match self {
            Item::Parameter(p) => &p.docs,
            Item::Enum(e) => &e.docs,
            Item::Typedef(t) => &t.docs,
            Item::Struct(s) => &s.docs,
        }
    }

    /// The names of every declaration this item references, in the order
    /// they are written. A name may appear more than once.
    pub fn references(&self) -> Vec<&str> {
        match self {
            Item::Parameter(p) => p.value.reference().into_iter().collect(),
            Item::Enum(e) => e.width.reference().into_iter().collect(),
            Item::Typedef(t) => {
                let mut refs = vec![];
                if let BaseType::Named(base) = &t.base {
                    refs.push(base.as_str());
                }
                refs.extend(t.width.reference());
                refs
            }
            Item::Struct(s) => s
                .fields
                .iter()
                .filter_map(|f| match &f.ty {
                    FieldType::Logic(width) => width.reference(),
                    FieldType::Named(ty) => Some(ty.as_str()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::ast::Attribute;

    #[test]
    fn struct_references_in_field_order() {
        let item = Item::Struct(StructDef {
            name: "pkt_t".into(),
            fields: vec![
                Field {
                    name: "kind".into(),
                    ty: FieldType::Named("kind_e".into()),
                    docs: Docs::default(),
                },
                Field {
                    name: "data".into(),
                    ty: FieldType::Logic(Expr::Ref("DATA_W".into(), Attribute::Value)),
                    docs: Docs::default(),
                },
                Field {
                    name: "valid".into(),
                    ty: FieldType::Logic(Expr::Literal(1)),
                    docs: Docs::default(),
                },
                Field {
                    name: "hdr".into(),
                    ty: FieldType::Named("hdr_t".into()),
                    docs: Docs::default(),
                },
            ],
            docs: Docs::default(),
        });

        assert_eq!(item.references(), vec!["kind_e", "DATA_W", "hdr_t"]);
        assert_eq!(item.kind(), Kind::Struct);
    }

    #[test]
    fn typedef_references_base_then_width() {
        let item = Item::Typedef(Typedef {
            name: "lanes_t".into(),
            base: BaseType::Named("lane_t".into()),
            width: Expr::Ref("LANES".into(), Attribute::Value),
            docs: Docs::default(),
        });

        assert_eq!(item.references(), vec!["lane_t", "LANES"]);
    }
}
