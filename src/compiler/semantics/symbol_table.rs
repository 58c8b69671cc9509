use std::{
    collections::{hash_map::Entry, HashMap, HashSet},
    marker::PhantomData,
};

use log::debug;

use crate::{
    compiler::{
        ast::{is_identifier, Item},
        emit::naming::{constant_name, count_width_name, width_name, width_one_name},
        CompilerError,
    },
    result::{NResult, Result},
};

/// Words which cannot be used as the name of a declaration or member.
const RESERVED_WORDS: [&str; 13] = [
    "logic",
    "wire",
    "enum",
    "struct",
    "bit",
    "real",
    "input",
    "output",
    "interface",
    "typedef",
    "union",
    "type",
    "class",
];

/// Keywords of the C header the schema is compiled into.
const C_KEYWORDS: [&str; 44] = [
    "auto",
    "break",
    "case",
    "char",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extern",
    "float",
    "for",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "register",
    "restrict",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "struct",
    "switch",
    "typedef",
    "union",
    "unsigned",
    "void",
    "volatile",
    "while",
    "_Alignas",
    "_Alignof",
    "_Atomic",
    "_Bool",
    "_Complex",
    "_Generic",
    "_Imaginary",
    "_Noreturn",
    "_Static_assert",
    "_Thread_local",
];

/// Identifies a declaration within a symbol table. Ids are assigned in
/// declaration order, starting from 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(usize);

impl DeclId {
    pub fn index(&self) -> usize {
        self.0
    }

    /// The 1-based position of the declaration in the schema.
    pub fn number(&self) -> usize {
        self.0 + 1
    }
}

impl std::fmt::Display for DeclId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.number())
    }
}

/// Every declaration of a schema, indexed by name.
///
/// While `Open` the table only accepts new declarations. Once frozen it
/// is read only and names can be resolved against it; a name is resolvable
/// regardless of where in the schema it was declared.
#[derive(Debug)]
pub struct SymbolTable<S> {
    items: Vec<Item>,
    index: HashMap<String, DeclId>,
    state: PhantomData<S>,
}

#[derive(Debug)]
pub struct Open {}
#[derive(Debug)]
pub struct Frozen {}

impl<S> SymbolTable<S> {
    pub fn get(&self, id: DeclId) -> &Item {
        &self.items[id.0]
    }

    pub fn lookup(&self, name: &str) -> Option<DeclId> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over every declaration in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Item)> {
        self.items.iter().enumerate().map(|(idx, i)| (DeclId(idx), i))
    }
}

impl<S> std::fmt::Display for SymbolTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, item) in self.iter() {
            f.write_fmt(format_args!("\t{} => {} | {:?}\n", id, item.name(), item.kind()))?;
        }
        Ok(())
    }
}

impl SymbolTable<Open> {
    pub fn new() -> SymbolTable<Open> {
        SymbolTable {
            items: vec![],
            index: HashMap::new(),
            state: PhantomData,
        }
    }

    /// Builds a frozen table from a schema's declarations. Every
    /// registration error is collected before failing.
    pub fn from_items(items: Vec<Item>) -> NResult<SymbolTable<Frozen>> {
        debug!("Initialize symbol table for {} declarations", items.len());
        let mut table = Self::new();
        let mut errors = vec![];

        for item in items {
            if let Err(e) = table.declare(item) {
                errors.push(e);
            }
        }
        errors.append(&mut table.check_generated_names());

        if errors.is_empty() {
            Ok(table.freeze())
        } else {
            Err(errors)
        }
    }

    /// Registers a declaration. Fails if the name is already registered or
    /// if the declaration or any of its members is malformed.
    pub fn declare(&mut self, item: Item) -> Result<DeclId> {
        let name = item.name();
        check_name(name)?;
        match &item {
            Item::Parameter(_) => forbid_endings(
                name,
                &["_E", "_T"][..],
                "parameter names may not end in _E or _T",
            )?,
            Item::Typedef(_) => {
                forbid_endings(name, &["_e"], "typedef names may not end in _e")?
            }
            Item::Enum(_) | Item::Struct(_) => (),
        }
        if self.index.contains_key(name) {
            return Err(CompilerError::DuplicateDeclaration(name.into()));
        }
        Self::check_members(&item)?;

        let id = DeclId(self.items.len());
        self.index.insert(name.into(), id);
        self.items.push(item);
        Ok(id)
    }

    fn check_members(item: &Item) -> Result<()> {
        let (members, endings, reason): (Vec<&str>, &[&str], &'static str) = match item {
            Item::Enum(e) => (
                e.values.iter().map(|v| v.name.as_str()).collect(),
                &["_E", "_T"][..],
                "enumerator names may not end in _E or _T",
            ),
            Item::Struct(s) => (
                s.fields.iter().map(|f| f.name.as_str()).collect(),
                &["_e", "_t"][..],
                "field names may not end in _e or _t",
            ),
            Item::Parameter(_) | Item::Typedef(_) => return Ok(()),
        };

        if members.is_empty() {
            return Err(CompilerError::EmptyDeclaration(item.name().into()));
        }

        let mut seen = HashSet::new();
        for member in members {
            let qualified = format!("{}.{}", item.name(), member);
            check_name(member).map_err(|e| match e {
                CompilerError::InvalidName(_, why) => {
                    CompilerError::InvalidName(qualified.clone(), why)
                }
                e => e,
            })?;
            if member.contains("__") {
                return Err(CompilerError::InvalidName(
                    qualified,
                    "member names may not contain a double underscore",
                ));
            }
            forbid_endings(&qualified, endings, reason)?;
            if !seen.insert(member) {
                return Err(CompilerError::DuplicateDeclaration(qualified));
            }
        }

        Ok(())
    }

    /// Checks that no two declarations produce the same identifier in the
    /// generated header. Constants are uppercased and every enumerator
    /// shares one namespace, so distinct schema names can still clash.
    fn check_generated_names(&self) -> Vec<CompilerError> {
        let mut owners: HashMap<String, String> = HashMap::new();
        let mut errors = vec![];

        for (_, item) in self.iter() {
            for (generated, owner) in generated_names(item) {
                match owners.entry(generated) {
                    Entry::Occupied(first) => {
                        errors.push(CompilerError::DuplicateDeclaration(format!(
                            "{} (generated from {} and {})",
                            first.key(),
                            first.get(),
                            owner
                        )))
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(owner);
                    }
                }
            }
        }

        errors
    }

    pub fn freeze(self) -> SymbolTable<Frozen> {
        SymbolTable {
            items: self.items,
            index: self.index,
            state: PhantomData,
        }
    }
}

impl SymbolTable<Frozen> {
    /// Resolves a name referenced by the declaration named `from`.
    pub fn resolve_ref(&self, from: &str, name: &str) -> Result<DeclId> {
        self.lookup(name)
            .ok_or_else(|| CompilerError::UnknownReference(from.into(), name.into()))
    }
}

fn check_name(name: &str) -> Result<()> {
    if !is_identifier(name) {
        Err(CompilerError::InvalidName(
            name.into(),
            "names must start with a letter or underscore and contain only letters, digits and underscores",
        ))
    } else if RESERVED_WORDS.contains(&name) {
        Err(CompilerError::InvalidName(name.into(), "it is a reserved word"))
    } else if C_KEYWORDS.contains(&name) {
        Err(CompilerError::InvalidName(name.into(), "it is a C keyword"))
    } else {
        Ok(())
    }
}

fn forbid_endings(name: &str, endings: &[&str], reason: &'static str) -> Result<()> {
    if endings.iter().any(|e| name.ends_with(e)) {
        Err(CompilerError::InvalidName(name.into(), reason))
    } else {
        Ok(())
    }
}

/// Every identifier the C header declares for `item`, paired with the
/// schema name it comes from.
fn generated_names(item: &Item) -> Vec<(String, String)> {
    let name = item.name();
    let mut names = vec![(width_name(name), name.to_string())];
    match item {
        Item::Parameter(_) => {
            names.push((constant_name(name), name.into()));
            names.push((count_width_name(name), name.into()));
            names.push((width_one_name(name), name.into()));
        }
        Item::Enum(e) => {
            names.push((constant_name(name), name.into()));
            for v in &e.values {
                names.push((v.name.clone(), format!("{}.{}", name, v.name)));
            }
        }
        Item::Typedef(_) | Item::Struct(_) => names.push((name.into(), name.into())),
    }
    names
}
