//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

use stencil_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, Filesystem},
    },
    error::{StencilError, StencilResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StencilResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn read_file(&self, path: &Path) -> StencilResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>> {
        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| map_walk_error(path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            entries.push(if entry.file_type().is_dir() {
                DirEntry::directory(name)
            } else {
                DirEntry::file(name)
            });
        }
        Ok(entries)
    }

    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()> {
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "rename"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StencilError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

fn map_walk_error(root: &Path, e: walkdir::Error) -> StencilError {
    let path = e.path().unwrap_or(root).to_path_buf();
    ApplicationError::FilesystemError {
        path,
        reason: format!("Failed to list directory: {}", e),
    }
    .into()
}
