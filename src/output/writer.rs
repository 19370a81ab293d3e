// Tue Jan 20 2026 - Alex

use crate::structure::InterfaceDeclaration;
use log::{debug, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create a temporary file in {dir}: {source}")]
    TempFile {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Write error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    ReplaceInput(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// Omitting the output, or naming the input again, overwrites the input.
    pub fn resolve(input: &Path, output: Option<&Path>) -> Self {
        match output {
            Some(output) if !same_file(input, output) => OutputTarget::File(output.to_path_buf()),
            _ => OutputTarget::ReplaceInput(input.to_path_buf()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            OutputTarget::File(path) | OutputTarget::ReplaceInput(path) => Some(path),
            OutputTarget::Stdout => None,
        }
    }

    pub fn replaces_input(&self) -> bool {
        matches!(self, OutputTarget::ReplaceInput(_))
    }
}

pub struct OutputWriter;

impl OutputWriter {
    pub fn write(declaration: &InterfaceDeclaration, target: &OutputTarget) -> Result<(), OutputError> {
        let contents = declaration.to_cpp();

        match target {
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(contents.as_bytes())?;
                handle.flush()?;
            }
            OutputTarget::File(path) => {
                write_atomically(path, &contents)?;
                info!("Wrote {}", path.display());
            }
            OutputTarget::ReplaceInput(path) => {
                write_atomically(path, &contents)?;
                info!("Replaced {}", path.display());
            }
        }

        Ok(())
    }
}

/// Writes `contents` next to `path` and renames it into place. The temporary
/// file is removed if any step fails, so `path` is never left half-written.
pub fn write_atomically(path: &Path, contents: &str) -> Result<(), OutputError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|source| OutputError::TempFile {
        dir: dir.to_path_buf(),
        source,
    })?;
    debug!("Writing to temporary file {}", temp.path().display());

    temp.write_all(contents.as_bytes())?;
    temp.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| OutputError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::ClassHeader;

    fn declaration() -> InterfaceDeclaration {
        let mut declaration = InterfaceDeclaration::new("    ");
        declaration.header = Some(ClassHeader::plain("cFoo"));
        declaration.members.push("Bar(void)".to_string());
        declaration
    }

    #[test]
    fn test_resolve_target() {
        let input = Path::new("symbols.txt");
        assert_eq!(
            OutputTarget::resolve(input, None),
            OutputTarget::ReplaceInput(PathBuf::from("symbols.txt"))
        );
        assert_eq!(
            OutputTarget::resolve(input, Some(Path::new("symbols.txt"))),
            OutputTarget::ReplaceInput(PathBuf::from("symbols.txt"))
        );
        assert_eq!(
            OutputTarget::resolve(input, Some(Path::new("cIFoo.h"))),
            OutputTarget::File(PathBuf::from("cIFoo.h"))
        );
    }

    #[test]
    fn test_resolve_detects_equivalent_paths() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("symbols.txt");
        fs::write(&input, "x").unwrap();
        let aliased = dir.path().join(".").join("symbols.txt");

        assert!(OutputTarget::resolve(&input, Some(&aliased)).replaces_input());
    }

    #[test]
    fn test_replace_input_overwrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("symbols.txt");
        fs::write(&input, "Bar__4cFoo\n").unwrap();

        OutputWriter::write(&declaration(), &OutputTarget::ReplaceInput(input.clone())).unwrap();

        let written = fs::read_to_string(&input).unwrap();
        assert_eq!(written, "class cFoo\n{\npublic:\n    virtual void* Bar(void) = 0;\n};\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("out.h");

        let err = OutputWriter::write(&declaration(), &OutputTarget::File(output.clone())).unwrap_err();
        assert!(matches!(err, OutputError::TempFile { .. }));
        assert!(!output.exists());
    }
}
