//! Local filesystem adapter using std::fs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use playforge_core::{
    application::{ApplicationError, LoadError, WriteError, ports::Filesystem},
    error::{PlayforgeError, PlayforgeResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> PlayforgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> PlayforgeResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn append_file(&self, path: &Path, content: &str) -> PlayforgeResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| map_io_error(path, e, "open file for append"))?;
        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "append to file"))
    }

    fn read_to_string(&self, path: &Path) -> PlayforgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| {
            let error = match e.kind() {
                io::ErrorKind::NotFound => LoadError::NotFound {
                    path: path.to_path_buf(),
                },
                _ => LoadError::Read {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            };
            ApplicationError::from(error).into()
        })
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> PlayforgeError {
    ApplicationError::from(WriteError::Filesystem {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    })
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn append_creates_then_extends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let fs = LocalFilesystem::new();

        fs.append_file(&path, "one\n").unwrap();
        fs.append_file(&path, "two\n").unwrap();

        assert_eq!(fs.read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn missing_file_reads_as_not_found() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("nope.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            PlayforgeError::Application(ApplicationError::Load(LoadError::NotFound { .. }))
        ));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&dir.path().join("a/b/c.txt"), "x")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to write file"));
    }
}
