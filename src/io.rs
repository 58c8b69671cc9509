use std::path::{Path, PathBuf};

use crate::YIS_FILE_EXT;

/// Returns every schema file at `path`. If `path` is a directory it is
/// searched recursively; if it is a file it must have the schema extension.
/// Files are returned sorted so that compilation order is stable.
pub fn get_files(path: &Path, ext: &str) -> Result<Vec<PathBuf>, std::io::Error> {
    let mut files = vec![];
    if path.is_dir() {
        for f in std::fs::read_dir(path)? {
            let f = f?;
            let fty = f.file_type()?;
            if fty.is_file() {
                match f.path().extension() {
                    Some(ex) if ex.to_ascii_lowercase() == ext => {
                        files.push(f.path());
                    }
                    _ => (),
                }
            } else if fty.is_dir() {
                let mut sub_files = get_files(&f.path(), ext)?;
                files.append(&mut sub_files);
            }
        }
        files.sort();
    } else {
        match path.extension() {
            Some(ex) if ex.to_ascii_lowercase() == ext => {
                files.push(path.to_path_buf());
            }
            ex => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!(
                        "{} is not a schema file, expected extension {} but got {}",
                        path.display(),
                        YIS_FILE_EXT,
                        ex.map(|ex| ex.to_string_lossy()).unwrap_or_default()
                    ),
                ));
            }
        }
    }
    Ok(files)
}
