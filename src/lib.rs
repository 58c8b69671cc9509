pub mod result;

pub mod cli;
#[macro_use]
pub mod diagnostics;
pub mod compiler;
pub mod io;
pub mod project;

pub use cli::*;
pub use compiler::CompilerError;
pub use project::{
    compile_project, compile_schema, get_package_name, output_path, read_schema_files,
    CompilationUnit, CompileOptions,
};

pub const YIS_FILE_EXT: &str = "yis";
