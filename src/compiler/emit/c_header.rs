use crate::compiler::{
    ast::Docs,
    semantics::{
        FieldKind, Package, ResolvedEnum, ResolvedField, ResolvedItem, ResolvedParameter,
        ResolvedStruct, ResolvedTypedef,
    },
};

use super::{
    naming::{
        constant_name, count_width_name, leading, trailing, verbose, width_name, width_one_name,
    },
    Emitter,
};

/// The C integer type used to hold a value of a given width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Storage {
    U8,
    U16,
    U32,
    U64,
    /// Wider than 64 bits: an array of this many bytes.
    Bytes(u64),
}

impl Storage {
    pub fn from_bits(width: u64) -> Storage {
        match width {
            0..=8 => Storage::U8,
            9..=16 => Storage::U16,
            17..=32 => Storage::U32,
            33..=64 => Storage::U64,
            _ => Storage::Bytes((width + 7) / 8),
        }
    }

    /// Declares `name` with this storage, e.g. `uint16_t name` or
    /// `uint8_t name[9]`.
    pub fn declare(&self, name: &str) -> String {
        match self {
            Storage::U8 => format!("uint8_t {}", name),
            Storage::U16 => format!("uint16_t {}", name),
            Storage::U32 => format!("uint32_t {}", name),
            Storage::U64 => format!("uint64_t {}", name),
            Storage::Bytes(n) => format!("uint8_t {}[{}]", name, n),
        }
    }
}

/// Emits a C header: a `#define` for every value and width, followed by
/// an enum, typedef, or struct for every type. Both appear in emission
/// order so a construct only ever names constructs above it.
pub struct CHeader;

impl Emitter for CHeader {
    fn emit(&self, package: &Package) -> String {
        let guard = format!("__{}_YIS_H__", constant_name(&package.name));
        let mut out = vec![
            format!("// Autogenerated from {} by yisc", package.source),
            "//".to_string(),
            "// Do Not Edit".to_string(),
            "//".to_string(),
            format!("#ifndef {}", guard),
            format!("#define {}", guard),
            String::new(),
            "#include <stdint.h>".to_string(),
            String::new(),
        ];

        if package.doc_summary.is_some() || package.doc_verbose.is_some() {
            let docs = Docs::new(
                package.doc_summary.as_deref().unwrap_or(""),
                package.doc_verbose.as_deref(),
            );
            out.append(&mut leading(&docs, ""));
            out.push(String::new());
        }

        for item in &package.items {
            out.append(&mut defines(item));
        }

        for item in &package.items {
            let mut construct = match item {
                ResolvedItem::Parameter(_) => continue,
                ResolvedItem::Enum(e) => enumeration(e),
                ResolvedItem::Typedef(t) => typedef(t),
                ResolvedItem::Struct(s) => structure(s),
            };
            out.push(String::new());
            out.append(&mut construct);
        }

        out.push(String::new());
        out.push(format!("#endif // {}", guard));

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

fn define(name: &str, value: u64, comment: &str) -> String {
    format!("#define {} {}           // {}", name, value, comment)
}

/// The C name of a type. Enums are named like constants; typedefs and
/// structs keep their schema names.
fn type_name(item: &ResolvedItem) -> String {
    match item {
        ResolvedItem::Enum(e) => constant_name(&e.name),
        _ => item.name().into(),
    }
}

fn defines(item: &ResolvedItem) -> Vec<String> {
    match item {
        ResolvedItem::Parameter(p) => parameter(p),
        _ => vec![define(
            &width_name(item.name()),
            item.width(),
            &format!("Width of {}", type_name(item)),
        )],
    }
}

fn parameter(p: &ResolvedParameter) -> Vec<String> {
    let name = constant_name(&p.name);
    let width = width_name(&p.name);

    let mut lines = verbose(&p.docs, "");
    lines.push(define(&name, p.value, &trailing(&p.docs.summary)));
    lines.push(define(&width, p.width, &format!("Width of {}", name)));
    lines.push(define(
        &count_width_name(&p.name),
        p.count_width,
        &format!("Width to count {} items", name),
    ));
    lines.push(define(
        &width_one_name(&p.name),
        p.width_one,
        &format!("{}-wide 1 for incrementers and decrementers", width),
    ));
    lines
}

fn enumeration(e: &ResolvedEnum) -> Vec<String> {
    let mut lines = leading(&e.docs, "");
    lines.push("typedef enum {".into());
    for v in &e.values {
        lines.append(&mut verbose(&v.docs, "    "));
        lines.push(format!(
            "    {} = {},   // {}",
            v.name,
            v.value,
            trailing(&v.docs.summary)
        ));
    }
    lines.push(format!("}} {};", constant_name(&e.name)));
    lines
}

fn typedef(t: &ResolvedTypedef) -> Vec<String> {
    let mut lines = leading(&t.docs, "");
    lines.push(format!(
        "typedef {};    // {} bits wide",
        Storage::from_bits(t.width).declare(&t.name),
        t.width
    ));
    lines
}

fn field(f: &ResolvedField) -> String {
    let decl = match &f.ty {
        FieldKind::Logic => Storage::from_bits(f.width).declare(&f.name),
        FieldKind::Enum(ty) => format!("{} {}", constant_name(ty), f.name),
        FieldKind::Typedef(ty) | FieldKind::Struct(ty) => format!("{} {}", ty, f.name),
    };
    format!(
        "    {};    // {} bits : {}",
        decl,
        f.width,
        trailing(&f.docs.summary)
    )
}

fn structure(s: &ResolvedStruct) -> Vec<String> {
    let mut lines = leading(&s.docs, "");
    lines.push(format!("typedef struct _{} {{", s.name));
    for f in &s.fields {
        lines.append(&mut verbose(&f.docs, "    "));
        lines.push(field(f));
    }
    lines.push(format!("}} {};", s.name));
    lines
}
