//! The YAML form of a schema. The text is read with serde into raw
//! records which mirror the file one to one, then lowered into the
//! declarations of [`crate::compiler::ast`].
use std::io::Read;

use log::debug;
use serde::Deserialize;
use serde_yaml::Value;

use crate::{
    compiler::{
        ast::{
            BaseType, Docs, EnumDef, Enumerator, Expr, Field, FieldType, Item, Parameter,
            StructDef, Typedef,
        },
        CompilerError,
    },
    result::{NResult, Result},
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawExpr {
    Int(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParameter {
    name: String,
    value: RawExpr,
    doc_summary: String,
    #[serde(default)]
    doc_verbose: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnumerator {
    name: String,
    #[serde(default)]
    value: Option<i64>,
    doc_summary: String,
    #[serde(default)]
    doc_verbose: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnum {
    name: String,
    width: RawExpr,
    #[serde(default)]
    values: Vec<RawEnumerator>,
    doc_summary: String,
    #[serde(default)]
    doc_verbose: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTypedef {
    name: String,
    base_type: String,
    width: RawExpr,
    doc_summary: String,
    #[serde(default)]
    doc_verbose: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    width: Option<RawExpr>,
    doc_summary: String,
    #[serde(default)]
    doc_verbose: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStruct {
    name: String,
    #[serde(default)]
    fields: Vec<RawField>,
    doc_summary: String,
    #[serde(default)]
    doc_verbose: Option<String>,
}

/// A parsed schema: the package documentation and every declaration in
/// the order it appears in the file.
#[derive(Debug, PartialEq)]
pub struct Schema {
    pub doc_summary: Option<String>,
    pub doc_verbose: Option<String>,
    pub items: Vec<Item>,
}

impl Schema {
    /// Loads a schema from the given file.
    pub fn read(file: &mut std::fs::File) -> NResult<Schema> {
        let mut text = String::new();
        file.read_to_string(&mut text).map_err(|e| vec![e.into()])?;
        Self::from_str(&text)
    }

    pub fn from_str(text: &str) -> NResult<Schema> {
        if text.trim().is_empty() {
            return Err(vec![schema_err("the schema is empty")]);
        }
        let doc: Value = serde_yaml::from_str(text).map_err(|e| vec![e.into()])?;
        Self::from_value(doc)
    }

    /// Lowers a YAML document into a schema. Sections are visited in the
    /// order they appear so that declaration order follows the file.
    /// Errors in individual declarations are collected rather than
    /// stopping at the first.
    fn from_value(doc: Value) -> NResult<Schema> {
        let sections = match doc {
            Value::Mapping(sections) => sections,
            Value::Null => return Err(vec![schema_err("the schema is empty")]),
            _ => return Err(vec![schema_err("the schema must be a mapping of sections")]),
        };

        let mut schema = Schema {
            doc_summary: None,
            doc_verbose: None,
            items: vec![],
        };
        let mut errors = vec![];
        let mut num_sections = 0;

        for (key, value) in sections {
            let key = match key.as_str() {
                Some(key) => key.to_string(),
                None => {
                    errors.push(schema_err("section names must be strings"));
                    continue;
                }
            };
            debug!("Lowering schema section {}", key);

            let lowered = match key.as_str() {
                "doc_summary" => text_section(&key, value).map(|s| schema.doc_summary = s),
                "doc_verbose" => text_section(&key, value).map(|s| schema.doc_verbose = s),
                "localparams" => {
                    num_sections += 1;
                    section(value, lower_parameter, &mut schema.items)
                }
                "enums" => {
                    num_sections += 1;
                    section(value, lower_enum, &mut schema.items)
                }
                "typedefs" => {
                    num_sections += 1;
                    section(value, lower_typedef, &mut schema.items)
                }
                "structs" => {
                    num_sections += 1;
                    section(value, lower_struct, &mut schema.items)
                }
                _ => Err(vec![schema_err(&format!("unknown section {}", key))]),
            };

            if let Err(mut errs) = lowered {
                errors.append(&mut errs);
            }
        }

        if num_sections == 0 && errors.is_empty() {
            errors.push(schema_err("the schema does not declare any section"));
        }

        if errors.is_empty() {
            Ok(schema)
        } else {
            Err(errors)
        }
    }
}

fn schema_err(msg: &str) -> CompilerError {
    CompilerError::Schema(msg.into())
}

fn text_section(key: &str, value: Value) -> NResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        _ => Err(vec![schema_err(&format!("{} must be a string", key))]),
    }
}

/// Deserializes a list of raw declarations and lowers each one into an
/// `Item`. An empty or null section contributes nothing.
fn section<R, F>(value: Value, lower: F, items: &mut Vec<Item>) -> NResult<()>
where
    R: serde::de::DeserializeOwned,
    F: Fn(R) -> Result<Item>,
{
    let raws: Option<Vec<R>> = serde_yaml::from_value(value).map_err(|e| vec![e.into()])?;

    let mut errors = vec![];
    for raw in raws.unwrap_or_default() {
        match lower(raw) {
            Ok(item) => items.push(item),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn lower_expr(owner: &str, raw: RawExpr) -> Result<Expr> {
    match raw {
        RawExpr::Int(lit) => Ok(Expr::Literal(lit)),
        RawExpr::Text(text) => Expr::parse(&text).ok_or_else(|| {
            CompilerError::Schema(format!("{}: `{}` is not a valid expression", owner, text))
        }),
    }
}

fn is_logic(ty: &str) -> bool {
    ty == "logic" || ty == "wire"
}

fn lower_parameter(raw: RawParameter) -> Result<Item> {
    let value = lower_expr(&raw.name, raw.value)?;
    Ok(Item::Parameter(Parameter {
        docs: Docs::new(&raw.doc_summary, raw.doc_verbose.as_deref()),
        name: raw.name,
        value,
    }))
}

fn lower_enum(raw: RawEnum) -> Result<Item> {
    let width = lower_expr(&raw.name, raw.width)?;
    let values = raw
        .values
        .into_iter()
        .map(|v| Enumerator {
            docs: Docs::new(&v.doc_summary, v.doc_verbose.as_deref()),
            name: v.name,
            value: v.value,
        })
        .collect();

    Ok(Item::Enum(EnumDef {
        docs: Docs::new(&raw.doc_summary, raw.doc_verbose.as_deref()),
        name: raw.name,
        width,
        values,
    }))
}

fn lower_typedef(raw: RawTypedef) -> Result<Item> {
    let width = lower_expr(&raw.name, raw.width)?;
    let base = if is_logic(&raw.base_type) {
        BaseType::Logic
    } else {
        BaseType::Named(raw.base_type)
    };

    Ok(Item::Typedef(Typedef {
        docs: Docs::new(&raw.doc_summary, raw.doc_verbose.as_deref()),
        name: raw.name,
        base,
        width,
    }))
}

fn lower_struct(raw: RawStruct) -> Result<Item> {
    let mut fields = vec![];
    for f in raw.fields {
        let ty = match (is_logic(&f.ty), f.width) {
            (true, Some(width)) => FieldType::Logic(lower_expr(&raw.name, width)?),
            (true, None) => FieldType::Logic(Expr::Literal(1)),
            (false, None) => FieldType::Named(f.ty),
            (false, Some(_)) => {
                return Err(CompilerError::InvalidField(raw.name.clone(), f.name))
            }
        };

        fields.push(Field {
            docs: Docs::new(&f.doc_summary, f.doc_verbose.as_deref()),
            name: f.name,
            ty,
        });
    }

    Ok(Item::Struct(StructDef {
        docs: Docs::new(&raw.doc_summary, raw.doc_verbose.as_deref()),
        name: raw.name,
        fields,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::ast::{Attribute, Kind};

    #[test]
    fn declarations_follow_file_order() {
        let text = "
doc_summary: Test package
structs:
  - name: hdr_t
    doc_summary: Header
    fields:
      - name: kind
        type: kind_e
        doc_summary: Kind of packet
      - name: len
        type: logic
        width: LEN_W
        doc_summary: Length
enums:
  - name: kind_e
    width: 2
    doc_summary: Kinds
    values:
      - name: READ
        doc_summary: Read
      - name: WRITE
        value: 2
        doc_summary: Write
localparams:
  - name: LEN_W
    value: 6
    doc_summary: Length width
";
        let schema = Schema::from_str(text).unwrap();
        assert_eq!(schema.doc_summary, Some("Test package".into()));

        let kinds: Vec<_> = schema.items.iter().map(|i| (i.name(), i.kind())).collect();
        assert_eq!(
            kinds,
            vec![
                ("hdr_t", Kind::Struct),
                ("kind_e", Kind::Enum),
                ("LEN_W", Kind::Parameter)
            ]
        );

        match &schema.items[0] {
            Item::Struct(s) => {
                assert_eq!(s.fields[0].ty, FieldType::Named("kind_e".into()));
                assert_eq!(
                    s.fields[1].ty,
                    FieldType::Logic(Expr::Ref("LEN_W".into(), Attribute::Value))
                );
            }
            _ => panic!("Expected a struct"),
        }

        match &schema.items[1] {
            Item::Enum(e) => {
                assert_eq!(e.values[0].value, None);
                assert_eq!(e.values[1].value, Some(2));
            }
            _ => panic!("Expected an enum"),
        }
    }

    #[test]
    fn logic_field_defaults_to_one_bit() {
        let text = "
structs:
  - name: flag_t
    doc_summary: Flags
    fields:
      - name: valid
        type: wire
        doc_summary: Valid
";
        let schema = Schema::from_str(text).unwrap();
        match &schema.items[0] {
            Item::Struct(s) => assert_eq!(s.fields[0].ty, FieldType::Logic(Expr::Literal(1))),
            _ => panic!("Expected a struct"),
        }
    }

    #[test]
    fn malformed_schemas() {
        for (text, expected) in vec![
            ("", schema_err("the schema is empty")),
            ("doc_summary: nothing", schema_err("the schema does not declare any section")),
            ("- a\n- b", schema_err("the schema must be a mapping of sections")),
            ("unions: []", schema_err("unknown section unions")),
            (
                "
localparams:
  - name: A
    value: A+1
    doc_summary: bad
",
                CompilerError::Schema("A: `A+1` is not a valid expression".into()),
            ),
            (
                "
structs:
  - name: s_t
    doc_summary: bad
    fields:
      - name: f
        type: color_e
        width: 3
        doc_summary: f
",
                CompilerError::InvalidField("s_t".into(), "f".into()),
            ),
        ] {
            let result = Schema::from_str(text);
            assert_eq!(result, Err(vec![expected]), "{:?}", text);
        }
    }

    #[test]
    fn unknown_declaration_key_is_rejected() {
        let text = "
localparams:
  - name: A
    value: 1
    doc_summary: a
    colour: blue
";
        match Schema::from_str(text) {
            Err(errs) => {
                assert_eq!(errs.len(), 1);
                assert!(matches!(errs[0], CompilerError::Schema(_)));
            }
            Ok(_) => panic!("Expected an error"),
        }
    }

    #[test]
    fn lowering_errors_are_collected() {
        let text = "
localparams:
  - name: A
    value: A+
    doc_summary: a
  - name: B
    value: 1 2
    doc_summary: b
";
        let errs = Schema::from_str(text).unwrap_err();
        assert_eq!(errs.len(), 2);
    }
}
