//! Tree Materializer - mirrors a template root into a destination.
//!
//! The walk is an explicit worklist of relative directories rather than a
//! recursive call chain, so the first failing read or write returns
//! immediately with the offending path and nothing after it is touched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{EntryKind, Filesystem, Progress},
    },
    domain::Substitution,
    error::StencilResult,
};

/// Files written by one materialization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Paths relative to the destination root, in write order.
    pub files: Vec<PathBuf>,
}

impl MaterializeReport {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Copies template trees, substituting the placeholder in file contents.
///
/// File and directory *names* are never substituted.
#[derive(Clone)]
pub struct TreeMaterializer {
    filesystem: Arc<dyn Filesystem>,
}

impl TreeMaterializer {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    pub fn filesystem(&self) -> &Arc<dyn Filesystem> {
        &self.filesystem
    }

    /// Mirror `source_dir` into `dest_dir`.
    ///
    /// `dest_dir` and any missing parents are created. Entries are visited in
    /// name order; subdirectories are processed after the files of their
    /// parent.
    #[instrument(
        skip_all,
        fields(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            placeholder = substitution.placeholder().as_str()
        )
    )]
    pub fn materialize(
        &self,
        source_dir: &Path,
        dest_dir: &Path,
        substitution: &Substitution,
        progress: &dyn Progress,
    ) -> StencilResult<MaterializeReport> {
        if !self.filesystem.is_dir(source_dir) {
            return Err(ApplicationError::TemplateRootMissing {
                path: source_dir.to_path_buf(),
            }
            .into());
        }

        let mut report = MaterializeReport::default();
        let mut pending = vec![PathBuf::new()];

        while let Some(relative_dir) = pending.pop() {
            let from_dir = source_dir.join(&relative_dir);
            let to_dir = dest_dir.join(&relative_dir);
            self.filesystem.create_dir_all(&to_dir)?;

            let mut subdirs = Vec::new();
            for entry in self.filesystem.read_dir(&from_dir)? {
                let relative = relative_dir.join(&entry.name);
                match entry.kind {
                    EntryKind::Directory => subdirs.push(relative),
                    EntryKind::File => {
                        self.copy_file(
                            &source_dir.join(&relative),
                            &dest_dir.join(&relative),
                            substitution,
                        )?;
                        progress.file_written(&dest_dir.join(&relative));
                        report.files.push(relative);
                    }
                }
            }

            // Reversed so the stack pops them in name order.
            pending.extend(subdirs.into_iter().rev());
        }

        debug!(files = report.file_count(), "tree materialized");
        Ok(report)
    }

    /// Materialize a single file onto `dest_file`, creating parents.
    ///
    /// An existing file at `dest_file` is overwritten.
    #[instrument(skip_all, fields(source = %source_file.display(), dest = %dest_file.display()))]
    pub fn materialize_file(
        &self,
        source_file: &Path,
        dest_file: &Path,
        substitution: &Substitution,
        progress: &dyn Progress,
    ) -> StencilResult<()> {
        if let Some(parent) = dest_file.parent() {
            if !parent.as_os_str().is_empty() {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.copy_file(source_file, dest_file, substitution)?;
        progress.file_written(dest_file);
        Ok(())
    }

    fn copy_file(
        &self,
        source_file: &Path,
        dest_file: &Path,
        substitution: &Substitution,
    ) -> StencilResult<()> {
        let content = self.filesystem.read_file(source_file)?;
        self.filesystem
            .write_file(dest_file, &substitution.apply(&content))?;
        debug!(
            path = %dest_file.display(),
            substituted = substitution.matches(&content),
            "created"
        );
        Ok(())
    }
}
