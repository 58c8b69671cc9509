use clap::{App, Arg, ArgMatches};
use simplelog::{Config, LevelFilter, SimpleLogger};

use crate::{compiler::emit::EmitTarget, diagnostics::TracingConfig, CompilerError};

// Exit Codes for different types of errors
pub const ERR_IO: i32 = 1;
pub const ERR_SCHEMA: i32 = 2;
pub const ERR_DECLARATION: i32 = 3;
pub const ERR_RESOLUTION: i32 = 4;
pub const ERR_CLI: i32 = 5;

pub fn print_errs(errs: &[CompilerError]) {
    for e in errs {
        eprintln!("Error: {}", e);
    }
}

/// The exit code for the phase of compilation which produces `err`.
pub fn exit_code(err: &CompilerError) -> i32 {
    match err {
        CompilerError::Io(_) => ERR_IO,
        CompilerError::Schema(_) | CompilerError::InvalidField(..) => ERR_SCHEMA,
        CompilerError::DuplicateDeclaration(_)
        | CompilerError::InvalidName(..)
        | CompilerError::EmptyDeclaration(_) => ERR_DECLARATION,
        _ => ERR_RESOLUTION,
    }
}

pub fn configure_cli() -> clap::App<'static, 'static> {
    let app = App::new("YIS Compiler")
        .version("0.1.0")
        .author("Erich Ess")
        .about("Compiles hardware interface schemas into C headers")
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .required(true)
                .help("Schema file to compile, or a directory of .yis schema files"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(true)
                .help("File the artifact will be written to. When compiling a directory, the directory the artifacts will be written to"),
        )
        .arg(
            Arg::with_name("emit")
                .long("emit")
                .possible_values(&["c", "json"])
                .default_value("c")
                .takes_value(true)
                .help("The type of artifact to emit: a C header, or a JSON dump of the resolved schema"),
        )
        .arg(
            Arg::with_name("log-level")
                .long("log-level")
                .possible_values(&["error", "warn", "info", "debug", "trace"])
                .takes_value(true)
                .help("Sets the level of logging written to the console. Logging is off if not set."),
        )
        .arg(
            Arg::with_name("trace-resolver")
                .long("trace-resolver")
                .takes_value(true)
                .help("Prints out a trace of every width and value the resolver computes. Takes `all`, a declaration number `N`, or a range `N:M`, `:M`, `N:`.
                Declarations are numbered from 1 in schema order.")
        )
        .arg(
            Arg::with_name("trace-sorter")
                .long("trace-sorter")
                .takes_value(true)
                .help("Prints out a trace of every declaration the dependency sorter visits. Takes the same selection as --trace-resolver.")
        );
    app
}

pub fn get_emit_target(args: &ArgMatches) -> Result<EmitTarget, String> {
    args.value_of("emit").unwrap_or("c").parse()
}

pub fn get_tracing(args: &ArgMatches, name: &str) -> Result<TracingConfig, String> {
    match args.value_of(name) {
        None => Ok(TracingConfig::Off),
        Some(text) => TracingConfig::parse(text)
            .ok_or_else(|| format!("Invalid value for --{}: {}", name, text)),
    }
}

pub fn get_log_level(args: &ArgMatches) -> Option<LevelFilter> {
    match args.value_of("log-level") {
        Some("error") => Some(LevelFilter::Error),
        Some("warn") => Some(LevelFilter::Warn),
        Some("info") => Some(LevelFilter::Info),
        Some("debug") => Some(LevelFilter::Debug),
        Some("trace") => Some(LevelFilter::Trace),
        _ => None,
    }
}

pub fn configure_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    SimpleLogger::init(level, Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_arguments() {
        let args = configure_cli()
            .get_matches_from_safe(vec![
                "yisc",
                "-i",
                "defs/bus.yis",
                "-o",
                "out/bus.h",
                "--emit",
                "json",
                "--log-level",
                "debug",
                "--trace-sorter",
                "2:4",
            ])
            .unwrap();

        assert_eq!(args.value_of("input"), Some("defs/bus.yis"));
        assert_eq!(get_emit_target(&args), Ok(EmitTarget::Json));
        assert_eq!(get_log_level(&args), Some(LevelFilter::Debug));
        assert_eq!(get_tracing(&args, "trace-sorter"), Ok(TracingConfig::Between(2, 4)));
        assert_eq!(get_tracing(&args, "trace-resolver"), Ok(TracingConfig::Off));
    }

    #[test]
    fn emit_defaults_to_c() {
        let args = configure_cli()
            .get_matches_from_safe(vec!["yisc", "-i", "a.yis", "-o", "a.h"])
            .unwrap();
        assert_eq!(get_emit_target(&args), Ok(EmitTarget::C));
        assert_eq!(get_log_level(&args), None);
    }

    #[test]
    fn exit_codes_by_phase() {
        for (err, expected) in vec![
            (CompilerError::Io("missing".into()), ERR_IO),
            (CompilerError::Schema("bad".into()), ERR_SCHEMA),
            (CompilerError::DuplicateDeclaration("A".into()), ERR_DECLARATION),
            (CompilerError::CyclicDependency(vec!["a".into(), "a".into()]), ERR_RESOLUTION),
            (CompilerError::InvalidParameter("A".into(), -1), ERR_RESOLUTION),
        ] {
            assert_eq!(exit_code(&err), expected);
        }
    }
}
