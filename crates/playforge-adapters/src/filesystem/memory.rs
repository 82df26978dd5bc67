//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use playforge_core::{
    application::{ApplicationError, LoadError, WriteError, ports::Filesystem},
    error::{PlayforgeError, PlayforgeResult},
};

/// In-memory filesystem for testing. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            let path = path.as_ref();
            if let Some(parent) = path.parent() {
                insert_ancestors(&mut inner.directories, parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> PlayforgeResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| poisoned())
    }

    fn write(&self) -> PlayforgeResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> PlayforgeError {
    PlayforgeError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

fn insert_ancestors(directories: &mut HashSet<PathBuf>, path: &Path) {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        directories.insert(current.clone());
    }
}

fn require_parent(inner: &MemoryFilesystemInner, path: &Path) -> PlayforgeResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) => {
            Err(ApplicationError::from(WriteError::Filesystem {
                path: path.to_path_buf(),
                reason: "Parent directory does not exist".into(),
            })
            .into())
        }
        _ => Ok(()),
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn create_dir_all(&self, path: &Path) -> PlayforgeResult<()> {
        let mut inner = self.write()?;
        insert_ancestors(&mut inner.directories, path);
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> PlayforgeResult<()> {
        let mut inner = self.write()?;
        require_parent(&inner, path)?;
        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn append_file(&self, path: &Path, content: &str) -> PlayforgeResult<()> {
        let mut inner = self.write()?;
        require_parent(&inner, path)?;
        inner
            .files
            .entry(path.to_path_buf())
            .or_default()
            .push_str(content);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> PlayforgeResult<String> {
        self.read()?.files.get(path).cloned().ok_or_else(|| {
            ApplicationError::from(LoadError::NotFound {
                path: path.to_path_buf(),
            })
            .into()
        })
    }
}
