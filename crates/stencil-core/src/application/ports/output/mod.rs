//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `stencil-adapters` crate provides implementations.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::StencilResult;

/// Kind of a directory entry returned by [`Filesystem::read_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name only, no parent components.
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `stencil_adapters::filesystem::LocalFilesystem` (production)
/// - `stencil_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> StencilResult<()>;

    /// Read a whole file as UTF-8 text.
    fn read_file(&self, path: &Path) -> StencilResult<String>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> StencilResult<()>;

    /// List the immediate children of a directory, sorted by name.
    fn read_dir(&self, path: &Path) -> StencilResult<Vec<DirEntry>>;

    /// Move a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> StencilResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;
}

/// Port for running external scaffolder executables.
///
/// Implemented by `stencil_adapters::SystemProcessRunner`. Calls block until
/// the child exits; its stdout and stderr go straight to the terminal.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessRunner: Send + Sync {
    /// Whether `program` exists and can be started.
    fn is_available(&self, program: &Path) -> bool;

    /// Run `program` with `args` and wait for it.
    ///
    /// Arguments are OS strings so paths reach the child byte for byte.
    /// Returns the exit code, or `None` if the child was killed by a signal.
    fn run(&self, program: &Path, args: &[OsString]) -> StencilResult<Option<i32>>;
}

/// Observer for progress notifications.
///
/// Purely observational: implementations must not influence the outcome.
pub trait Progress {
    /// A composition stage or unit is about to run.
    fn stage_started(&self, _label: &str) {}

    /// A file was written at `path`.
    fn file_written(&self, _path: &Path) {}
}

/// Progress observer that discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl Progress for SilentProgress {}

/// Progress observer that records notifications, for tests and reports.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    stages: std::sync::Mutex<Vec<String>>,
    files: std::sync::Mutex<Vec<PathBuf>>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stages(&self) -> Vec<String> {
        self.stages.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.files.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl Progress for RecordingProgress {
    fn stage_started(&self, label: &str) {
        if let Ok(mut stages) = self.stages.lock() {
            stages.push(label.to_owned());
        }
    }

    fn file_written(&self, path: &Path) {
        if let Ok(mut files) = self.files.lock() {
            files.push(path.to_path_buf());
        }
    }
}
