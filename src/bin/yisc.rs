extern crate log;
extern crate simplelog;

use std::path::Path;
use std::time::Instant;

use yis::*;

fn main() -> Result<(), i32> {
    let config = configure_cli().get_matches();

    if let Some(level) = get_log_level(&config) {
        configure_logging(level).expect("Failed to configure logger.")
    }

    let options = match read_options(&config) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return Err(ERR_CLI);
        }
    };

    let input = config
        .value_of("input")
        .expect("Expected an input schema to compile");
    let output = config
        .value_of("output")
        .expect("Expected an output path to write to");

    let units = match read_schema_files(Path::new(input)) {
        Ok(units) => units,
        Err(errs) => {
            print_errs(&errs);
            return Err(ERR_IO);
        }
    };

    let compile_time = Instant::now();
    let artifacts = match compile_project(units, &options) {
        Ok(artifacts) => artifacts,
        Err(errs) => {
            print_errs(&errs);
            return Err(errs.first().map(exit_code).unwrap_or(ERR_RESOLUTION));
        }
    };
    let compile_duration = compile_time.elapsed();
    eprintln!("Compile: {}", compile_duration.as_secs_f32());

    let output = Path::new(output);
    let several = artifacts.len() > 1;
    if several {
        if let Err(e) = std::fs::create_dir_all(output) {
            eprintln!("Error: Could not create {}: {}", output.display(), e);
            return Err(ERR_IO);
        }
    }

    for artifact in &artifacts {
        let path = output_path(output, artifact, options.emit, several);
        if let Err(e) = std::fs::write(&path, &artifact.data) {
            eprintln!("Error: Could not write {}: {}", path.display(), e);
            return Err(ERR_IO);
        }
    }

    Ok(())
}

fn read_options(config: &clap::ArgMatches) -> Result<CompileOptions, String> {
    Ok(CompileOptions {
        emit: get_emit_target(config)?,
        trace_resolver: get_tracing(config, "trace-resolver")?,
        trace_sorter: get_tracing(config, "trace-sorter")?,
    })
}
