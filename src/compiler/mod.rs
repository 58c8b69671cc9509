/**
 * The Compiler takes the text of a schema and converts it into an output
 * artifact, such as a C header.
 *
 * Compilation runs through a few stages, each fully consuming the output of
 * the previous one:
 * 1. The `schema` module reads the YAML text into raw declarations.
 * 2. The symbol table registers every declaration by name. Nothing is
 * resolved yet, so a declaration may reference one declared after it.
 * 3. The resolver computes the width of every declaration and the value of
 * every parameter and enumerator, following references transitively.
 * 4. The dependency sorter orders the declarations so that every
 * declaration comes after everything it references.
 * 5. An emitter projects the resolved package into text.
 *
 * Every error that can be caused by the User's schema is found in stages
 * 1 through 4. After that the package is considered correct, and the
 * emitters translate exactly what they are given. If any error happens in
 * an emitter it cannot be caused by User input; therefore, it must be a
 * bug in the compiler itself, and the policy is to immediately panic.
 */
pub mod ast;
pub mod emit;
mod error;
pub mod schema;
pub mod semantics;


pub use error::CompilerError;
