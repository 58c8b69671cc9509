//! Developer-facing insight into what the compiler stages are doing. Each
//! stage that supports tracing implements [`config::Tracing`] and prints
//! one line per traced declaration.
pub mod config;

pub use config::{Tracing, TracingConfig};

/// Prints the calling function and the declaration it is working on when
/// the stage's tracing configuration selects that declaration.
/// `$stage` must have a `tracing: TracingConfig` field and `$id` must be a
/// `DeclId`. Call sites import `stdext::function_name`.
macro_rules! trace {
    ($stage:expr, $id:expr, $name:expr) => {
        if $stage.tracing.selects($id.number()) {
            println!(
                "{} <- #{} {}",
                function_name!(),
                $id.number(),
                $name
            )
        }
    };
}
