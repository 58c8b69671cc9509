use super::ast::Kind;

/// Represents all errors that are generated from within the Compiler
/// module and its submodules.
///
/// Every error is caused by the input schema: once a package has been
/// resolved the emitters are total, so no error type exists for them.
#[derive(Clone, Debug, PartialEq)]
pub enum CompilerError {
    /// The schema file could not be read.
    Io(String),
    /// The schema text is not well formed.
    Schema(String),
    /// A declaration, enumerator or field name was used twice.
    DuplicateDeclaration(String),
    /// `from` references `name`, which was never declared.
    UnknownReference(String, String),
    /// The declaration graph contains a cycle. The path starts and ends
    /// with the same declaration.
    CyclicDependency(Vec<String>),
    EnumeratorOverflow {
        name: String,
        enumerator: String,
        value: i128,
        width: u64,
    },
    /// A parameter resolved to a negative value.
    InvalidParameter(String, i128),
    /// `from` references `name`, but `name` is a declaration of the wrong kind.
    WrongKind {
        from: String,
        name: String,
        found: Kind,
        expected: &'static str,
    },
    InvalidWidth(String, i128),
    WidthOverflow(String),
    /// A field with a named type also carries an explicit width.
    InvalidField(String, String),
    InvalidName(String, &'static str),
    EmptyDeclaration(String),
}

impl std::fmt::Display for CompilerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompilerError::Io(msg) => write!(f, "{}", msg),
            CompilerError::Schema(msg) => write!(f, "Invalid schema: {}", msg),
            CompilerError::DuplicateDeclaration(name) => {
                write!(f, "{} is already declared", name)
            }
            CompilerError::UnknownReference(from, name) => {
                write!(f, "{} references {}, which is not declared", from, name)
            }
            CompilerError::CyclicDependency(path) => {
                write!(f, "Cyclic dependency: {}", path.join(" -> "))
            }
            CompilerError::EnumeratorOverflow {
                name,
                enumerator,
                value,
                width,
            } => write!(
                f,
                "{}.{} = {} does not fit in the {} bits of {}",
                name, enumerator, value, width, name
            ),
            CompilerError::InvalidParameter(name, value) => write!(
                f,
                "Parameter {} has value {}, but parameters must not be negative",
                name, value
            ),
            CompilerError::WrongKind {
                from,
                name,
                found,
                expected,
            } => write!(
                f,
                "{} references {} as {}, but {} is {}",
                from, name, expected, name, found
            ),
            CompilerError::InvalidWidth(name, width) => {
                write!(f, "{} has an invalid width of {} bits", name, width)
            }
            CompilerError::WidthOverflow(name) => {
                write!(f, "The width of {} is too large to represent", name)
            }
            CompilerError::InvalidField(structure, field) => write!(
                f,
                "{}.{} has a named type and may not also declare a width",
                structure, field
            ),
            CompilerError::InvalidName(name, reason) => {
                write!(f, "{} is not a valid name: {}", name, reason)
            }
            CompilerError::EmptyDeclaration(name) => {
                write!(f, "{} must declare at least one member", name)
            }
        }
    }
}

impl std::error::Error for CompilerError {}

impl From<serde_yaml::Error> for CompilerError {
    fn from(err: serde_yaml::Error) -> Self {
        CompilerError::Schema(err.to_string())
    }
}

impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::Io(err.to_string())
    }
}
