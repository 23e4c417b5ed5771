//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use stencil_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, EntryKind, Filesystem},
    },
    error::{StencilError, StencilResult},
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle while the
/// services under test own another.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
    read_only: Vec<PathBuf>,
    unreadable: Vec<PathBuf>,
}

impl MemoryFilesystemInner {
    fn insert_dir_all(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            self.directories.insert(current.clone());
        }
    }

    fn is_read_only(&self, path: &Path) -> bool {
        self.read_only.iter().any(|denied| path.starts_with(denied))
    }

    fn is_unreadable(&self, path: &Path) -> bool {
        self.unreadable.iter().any(|denied| path.starts_with(denied))
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Seed a file, creating its parent directories.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        let path = path.as_ref();
        if let Ok(mut inner) = self.inner.write() {
            if let Some(parent) = path.parent() {
                inner.insert_dir_all(parent);
            }
            inner.files.insert(path.to_path_buf(), content.into());
        }
        self
    }

    /// Seed an empty directory.
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner.insert_dir_all(path.as_ref());
        }
        self
    }

    /// Make every write at or below `path` fail.
    pub fn deny_writes_under(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.read_only.push(path.into());
        }
    }

    /// Make every file read at or below `path` fail. Listings still show
    /// the entries.
    pub fn deny_reads_under(&self, path: impl Into<PathBuf>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.unreadable.push(path.into());
        }
    }

    /// A file's content, if it exists (testing helper).
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path.as_ref()).cloned()
    }

    /// All files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<_> = self
            .inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default();
        files.sort();
        files
    }

    /// Files below `root`, relative to it, sorted.
    pub fn files_under(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.list_files()
            .into_iter()
            .filter_map(|p| p.strip_prefix(root).ok().map(Path::to_path_buf))
            .collect()
    }

    fn read(&self, path: &Path) -> StencilResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner.read().map_err(|_| lock_error(path))
    }

    fn write(&self, path: &Path) -> StencilResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        let inner = self.inner.write().map_err(|_| lock_error(path))?;
        if inner.is_read_only(path) {
            return Err(fs_error(path, "Permission denied"));
        }
        Ok(inner)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        let mut inner = self.write(path)?;
        inner.insert_dir_all(path);
        Ok(())
    }

    fn read_file(&self, path: &Path) -> StencilResult<String> {
        let inner = self.read(path)?;
        if inner.is_unreadable(path) {
            return Err(fs_error(path, "Permission denied"));
        }
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| fs_error(path, "No such file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        let mut inner = self.write(path)?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(fs_error(path, "Parent directory does not exist"));
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>> {
        let inner = self.read(path)?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "No such directory"));
        }

        let mut children = BTreeMap::new();
        let child_name = |p: &Path| {
            (p.parent() == Some(path))
                .then(|| p.file_name())
                .flatten()
                .map(|n| n.to_string_lossy().into_owned())
        };
        for dir in &inner.directories {
            if let Some(name) = child_name(dir.as_path()) {
                children.insert(name, EntryKind::Directory);
            }
        }
        for file in inner.files.keys() {
            if let Some(name) = child_name(file.as_path()) {
                children.insert(name, EntryKind::File);
            }
        }

        Ok(children
            .into_iter()
            .map(|(name, kind)| DirEntry { name, kind })
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()> {
        let mut inner = self.write(to)?;
        if !inner.files.contains_key(from) && !inner.directories.contains(from) {
            return Err(fs_error(from, "No such file or directory"));
        }

        let moved = |p: &Path| p.strip_prefix(from).ok().map(|rest| to.join(rest));

        let files: Vec<_> = inner
            .files
            .iter()
            .filter_map(|(p, c)| moved(p.as_path()).map(|dest| (p.clone(), dest, c.clone())))
            .collect();
        for (old, new, content) in files {
            inner.files.remove(&old);
            inner.files.insert(new, content);
        }

        let dirs: Vec<_> = inner
            .directories
            .iter()
            .filter_map(|p| moved(p.as_path()).map(|dest| (p.clone(), dest)))
            .collect();
        for (old, new) in dirs {
            inner.directories.remove(&old);
            inner.directories.insert(new);
        }

        if let Some(parent) = to.parent() {
            inner.insert_dir_all(parent);
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }
}

fn fs_error(path: &Path, reason: &str) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.to_owned(),
    }
    .into()
}

fn lock_error(path: &Path) -> StencilError {
    fs_error(path, "In-memory filesystem lock poisoned")
}
