use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    compiler::{emit::EmitTarget, schema::Schema, semantics::resolve_package, CompilerError},
    diagnostics::config::TracingConfig,
    io::get_files,
    result::{NResult, Result},
    YIS_FILE_EXT,
};

/// Given the path to a schema, return the name that should be used
/// for the package: the file name without its extension.
pub fn get_package_name(src: &Path) -> Result<&str> {
    src.file_stem()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            CompilerError::Io(format!(
                "Could not extract a package name from {}",
                src.display()
            ))
        })
}

/// One schema file and what has been produced from it so far.
#[derive(Debug)]
pub struct CompilationUnit<T> {
    pub path: PathBuf,
    pub name: String,
    pub data: T,
}

/// Settings that apply to every schema compiled in one invocation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompileOptions {
    pub emit: EmitTarget,
    pub trace_resolver: TracingConfig,
    pub trace_sorter: TracingConfig,
}

/// Given the location of schema file(s) this function will read the file
/// or files and return the text of each one along with its package name.
///
/// If `src_path` is a directory, this will recursively read every schema
/// file in that directory and its subdirectories.
pub fn read_schema_files(src_path: &Path) -> NResult<Vec<CompilationUnit<String>>> {
    let files = get_files(src_path, YIS_FILE_EXT).map_err(|e| {
        vec![CompilerError::Io(format!(
            "Could not open {}: {}",
            src_path.display(),
            e
        ))]
    })?;

    if files.is_empty() {
        return Err(vec![CompilerError::Io(format!(
            "No schema files found in {}",
            src_path.display()
        ))]);
    }

    let mut units = vec![];
    let mut errors = vec![];
    for file in files {
        let unit = get_package_name(&file).map(|n| n.to_string()).and_then(|name| {
            let data = std::fs::read_to_string(&file).map_err(|e| {
                CompilerError::Io(format!("Failed to read {}: {}", file.display(), e))
            })?;
            Ok(CompilationUnit {
                path: file.clone(),
                name,
                data,
            })
        });

        match unit {
            Ok(unit) => units.push(unit),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(units)
    } else {
        Err(errors)
    }
}

/// Runs the whole pipeline over the text of one schema and returns the
/// emitted artifact.
pub fn compile_schema(
    name: &str,
    source: &str,
    text: &str,
    options: &CompileOptions,
) -> NResult<String> {
    let schema = Schema::from_str(text)?;
    let package = resolve_package(
        name,
        source,
        schema,
        options.trace_resolver,
        options.trace_sorter,
    )?;
    Ok(options.emit.emitter().emit(&package))
}

/// Compiles every schema independently. Errors from every schema are
/// collected; if there are any, no artifact is returned.
pub fn compile_project(
    units: Vec<CompilationUnit<String>>,
    options: &CompileOptions,
) -> NResult<Vec<CompilationUnit<String>>> {
    check_package_names(&units)?;

    let mut artifacts = vec![];
    let mut errors = vec![];
    for unit in units {
        let source = unit.path.display().to_string();
        info!("Compiling {}", source);
        match compile_schema(&unit.name, &source, &unit.data, options) {
            Ok(data) => artifacts.push(CompilationUnit {
                path: unit.path,
                name: unit.name,
                data,
            }),
            Err(mut e) => errors.append(&mut e),
        }
    }

    if errors.is_empty() {
        Ok(artifacts)
    } else {
        Err(errors)
    }
}

/// Artifacts are named after their package, so two schemas with the same
/// file stem would overwrite each other.
fn check_package_names<T>(units: &[CompilationUnit<T>]) -> NResult<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    let mut errors = vec![];
    for unit in units {
        if let Some(first) = seen.insert(&unit.name, &unit.path) {
            errors.push(CompilerError::Io(format!(
                "{} and {} both compile to package {}",
                first.display(),
                unit.path.display(),
                unit.name
            )));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Where the artifact for `unit` is written. When several schemas are
/// compiled, or `output` is an existing directory, each artifact is named
/// after its package inside `output`.
pub fn output_path<T>(
    output: &Path,
    unit: &CompilationUnit<T>,
    emit: EmitTarget,
    several: bool,
) -> PathBuf {
    if several || output.is_dir() {
        output.join(format!("{}.{}", unit.name, emit.extension()))
    } else {
        output.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_name_is_file_stem() {
        assert_eq!(
            get_package_name(Path::new("defs/test_pkg_a.yis")),
            Ok("test_pkg_a")
        );
    }

    #[test]
    fn several_outputs_go_in_a_directory() {
        let unit = CompilationUnit {
            path: PathBuf::from("defs/bus.yis"),
            name: "bus".to_string(),
            data: (),
        };
        for (several, emit, expected) in vec![
            (false, EmitTarget::C, "out/x.h"),
            (true, EmitTarget::C, "out/x.h/bus.h"),
            (true, EmitTarget::Json, "out/x.h/bus.json"),
        ] {
            assert_eq!(
                output_path(Path::new("out/x.h"), &unit, emit, several),
                PathBuf::from(expected)
            );
        }
    }

    #[test]
    fn errors_from_every_schema_are_collected() {
        let units = vec![
            CompilationUnit {
                path: PathBuf::from("a.yis"),
                name: "a".to_string(),
                data: "enums: 3".to_string(),
            },
            CompilationUnit {
                path: PathBuf::from("b.yis"),
                name: "b".to_string(),
                data: "
localparams:
  - name: A
    value: 1
    doc_summary: a
  - name: A
    value: 2
    doc_summary: a
"
                .to_string(),
            },
        ];
        let errs = compile_project(units, &CompileOptions::default()).unwrap_err();
        assert_eq!(errs.len(), 2);
        assert_eq!(errs[1], CompilerError::DuplicateDeclaration("A".into()));
    }

    #[test]
    fn schemas_sharing_a_package_name_are_rejected() {
        let unit = |path: &str| CompilationUnit {
            path: PathBuf::from(path),
            name: "bus".to_string(),
            data: "localparams:\n  - name: A\n    value: 1\n    doc_summary: a\n".to_string(),
        };
        let errs = compile_project(
            vec![unit("in/a/bus.yis"), unit("in/b/bus.yis")],
            &CompileOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            errs,
            vec![CompilerError::Io(
                "in/a/bus.yis and in/b/bus.yis both compile to package bus".into()
            )]
        );
    }
}
