use serde::Serialize;

use crate::compiler::ast::Docs;

/// A fully resolved schema. Items are in emission order: every
/// declaration comes after all the declarations it references.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Package {
    pub name: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_verbose: Option<String>,
    pub items: Vec<ResolvedItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolvedItem {
    Parameter(ResolvedParameter),
    Enum(ResolvedEnum),
    Typedef(ResolvedTypedef),
    Struct(ResolvedStruct),
}

impl ResolvedItem {
    pub fn name(&self) -> &str {
        match self {
            ResolvedItem::Parameter(p) => &p.name,
            ResolvedItem::Enum(e) => &e.name,
            ResolvedItem::Typedef(t) => &t.name,
            ResolvedItem::Struct(s) => &s.name,
        }
    }

    /// The resolved width of the declaration.
    pub fn width(&self) -> u64 {
        match self {
            ResolvedItem::Parameter(p) => p.width,
            ResolvedItem::Enum(e) => e.width,
            ResolvedItem::Typedef(t) => t.width,
            ResolvedItem::Struct(s) => s.width,
        }
    }
}

/// A parameter and the constants derived from its value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedParameter {
    pub name: String,
    pub value: u64,
    /// Bits needed to represent `value`.
    pub width: u64,
    /// Bits needed to count from 0 to `value` inclusive.
    pub count_width: u64,
    /// The value 1 at `width` bits.
    pub width_one: u64,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedEnumerator {
    pub name: String,
    pub value: u64,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedEnum {
    pub name: String,
    pub width: u64,
    pub values: Vec<ResolvedEnumerator>,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedTypedef {
    pub name: String,
    pub width: u64,
    /// The element type when the typedef is a packed array of another type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    pub docs: Docs,
}

/// What a struct field holds.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum FieldKind {
    Logic,
    Enum(String),
    Typedef(String),
    Struct(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldKind,
    pub width: u64,
    pub docs: Docs,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedStruct {
    pub name: String,
    /// The sum of the widths of every field.
    pub width: u64,
    pub fields: Vec<ResolvedField>,
    pub docs: Docs,
}
