use crate::compiler::CompilerError;

pub type Result<T> = std::result::Result<T, CompilerError>;
pub type NResult<T> = std::result::Result<T, Vec<CompilerError>>;
