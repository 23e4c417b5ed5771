//! Scaffolder units - independently invocable materialization operations.
//!
//! A unit is bound to one fixed location and a conventional output shape:
//!
//! - [`TemplateUnit`] runs in-process: one [`TreeMaterializer`] pass over a
//!   template root, followed by optional single-file patches.
//! - [`ExternalUnit`] runs another scaffolder executable as
//!   `<program> <name> <dest_base>` and waits for it.
//!
//! Units never check for conflicts. Files already present at the same
//! relative paths are overwritten; refusing an existing project directory is
//! the composition driver's job.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{ProcessRunner, Progress},
        services::materializer::TreeMaterializer,
    },
    domain::{Placeholder, ProjectName, Substitution},
    error::StencilResult,
};

/// Where a unit writes relative to the destination it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitLayout {
    /// Output goes to `<dest_base>/<name>/`.
    Subdirectory,
    /// Output goes directly into `<dest_base>/`.
    Root,
}

/// How a unit is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Template,
    External,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template => f.write_str("template"),
            Self::External => f.write_str("external"),
        }
    }
}

/// Identifies a unit for composition and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDescriptor {
    pub label: String,
    pub kind: UnitKind,
    /// Template root for template units, executable for external units.
    pub location: PathBuf,
    pub layout: UnitLayout,
}

impl UnitDescriptor {
    /// Directory the unit's output lands in.
    pub fn output_dir(&self, name: &ProjectName, dest_base: &Path) -> PathBuf {
        match self.layout {
            UnitLayout::Subdirectory => dest_base.join(name.as_str()),
            UnitLayout::Root => dest_base.to_path_buf(),
        }
    }
}

/// Result of a successful unit invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    pub output_dir: PathBuf,
    /// Files written, relative to `output_dir`. Empty for external units,
    /// whose writes are not observed.
    pub files: Vec<PathBuf>,
}

/// A named, independently invocable scaffolding operation.
pub trait ScaffolderUnit: Send + Sync {
    fn descriptor(&self) -> &UnitDescriptor;

    /// Whether the unit's template root or executable is present.
    fn is_available(&self) -> bool;

    fn invoke(
        &self,
        name: &ProjectName,
        dest_base: &Path,
        progress: &dyn Progress,
    ) -> StencilResult<UnitOutcome>;
}

// ── TemplateUnit ──────────────────────────────────────────────────────────────

/// A single-file overlay applied after the tree pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    pub source: PathBuf,
    /// Destination relative to the unit's output directory.
    pub target: PathBuf,
}

/// In-process unit materializing a template root.
pub struct TemplateUnit {
    descriptor: UnitDescriptor,
    placeholder: Placeholder,
    materializer: TreeMaterializer,
    patches: Vec<FilePatch>,
}

impl TemplateUnit {
    pub fn new(
        label: impl Into<String>,
        template_root: impl Into<PathBuf>,
        layout: UnitLayout,
        placeholder: Placeholder,
        materializer: TreeMaterializer,
    ) -> Self {
        Self {
            descriptor: UnitDescriptor {
                label: label.into(),
                kind: UnitKind::Template,
                location: template_root.into(),
                layout,
            },
            placeholder,
            materializer,
            patches: Vec::new(),
        }
    }

    /// Overwrite `target` with the substituted contents of `source` after
    /// the tree pass.
    pub fn with_patch(mut self, source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.patches.push(FilePatch {
            source: source.into(),
            target: target.into(),
        });
        self
    }
}

impl ScaffolderUnit for TemplateUnit {
    fn descriptor(&self) -> &UnitDescriptor {
        &self.descriptor
    }

    fn is_available(&self) -> bool {
        self.materializer
            .filesystem()
            .is_dir(&self.descriptor.location)
    }

    #[instrument(skip_all, fields(unit = %self.descriptor.label, project = %name))]
    fn invoke(
        &self,
        name: &ProjectName,
        dest_base: &Path,
        progress: &dyn Progress,
    ) -> StencilResult<UnitOutcome> {
        if !self.is_available() {
            return Err(ApplicationError::MissingDependency {
                label: self.descriptor.label.clone(),
                path: self.descriptor.location.clone(),
            }
            .into());
        }

        let substitution = Substitution::for_project(self.placeholder.clone(), name);
        let output_dir = self.descriptor.output_dir(name, dest_base);

        let report = self.materializer.materialize(
            &self.descriptor.location,
            &output_dir,
            &substitution,
            progress,
        )?;
        let mut files = report.files;

        for patch in &self.patches {
            self.materializer.materialize_file(
                &patch.source,
                &output_dir.join(&patch.target),
                &substitution,
                progress,
            )?;
            if !files.contains(&patch.target) {
                files.push(patch.target.clone());
            }
        }

        info!(files = files.len(), output = %output_dir.display(), "unit completed");
        Ok(UnitOutcome { output_dir, files })
    }
}

// ── ExternalUnit ──────────────────────────────────────────────────────────────

/// Out-of-process unit delegating to another scaffolder executable.
pub struct ExternalUnit {
    descriptor: UnitDescriptor,
    runner: Arc<dyn ProcessRunner>,
}

impl ExternalUnit {
    pub fn new(
        label: impl Into<String>,
        program: impl Into<PathBuf>,
        layout: UnitLayout,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self {
            descriptor: UnitDescriptor {
                label: label.into(),
                kind: UnitKind::External,
                location: program.into(),
                layout,
            },
            runner,
        }
    }
}

impl ScaffolderUnit for ExternalUnit {
    fn descriptor(&self) -> &UnitDescriptor {
        &self.descriptor
    }

    fn is_available(&self) -> bool {
        self.runner.is_available(&self.descriptor.location)
    }

    #[instrument(skip_all, fields(unit = %self.descriptor.label, project = %name))]
    fn invoke(
        &self,
        name: &ProjectName,
        dest_base: &Path,
        _progress: &dyn Progress,
    ) -> StencilResult<UnitOutcome> {
        let program = &self.descriptor.location;
        if !self.is_available() {
            return Err(ApplicationError::MissingDependency {
                label: self.descriptor.label.clone(),
                path: program.clone(),
            }
            .into());
        }

        let args = [
            OsString::from(name.as_str()),
            dest_base.as_os_str().to_owned(),
        ];
        info!(program = %program.display(), "running external unit");

        match self.runner.run(program, &args)? {
            Some(0) => Ok(UnitOutcome {
                output_dir: self.descriptor.output_dir(name, dest_base),
                files: Vec::new(),
            }),
            Some(code) => {
                warn!(code, "external unit failed");
                Err(ApplicationError::SubUnitFailed {
                    label: self.descriptor.label.clone(),
                    code,
                }
                .into())
            }
            None => {
                warn!("external unit terminated by signal");
                Err(ApplicationError::SubUnitFailed {
                    label: self.descriptor.label.clone(),
                    code: 1,
                }
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockProcessRunner, SilentProgress};
    use crate::error::StencilError;

    fn shop() -> ProjectName {
        ProjectName::new("shop").unwrap()
    }

    #[test]
    fn output_dir_follows_layout() {
        let mut descriptor = UnitDescriptor {
            label: "api".into(),
            kind: UnitKind::Template,
            location: PathBuf::from("/templates/api"),
            layout: UnitLayout::Subdirectory,
        };
        assert_eq!(
            descriptor.output_dir(&shop(), Path::new("/out/apps")),
            PathBuf::from("/out/apps/shop")
        );

        descriptor.layout = UnitLayout::Root;
        assert_eq!(
            descriptor.output_dir(&shop(), Path::new("/out")),
            PathBuf::from("/out")
        );
    }

    #[test]
    fn external_unit_passes_name_and_destination() {
        let mut runner = MockProcessRunner::new();
        runner.expect_is_available().return_const(true);
        runner
            .expect_run()
            .withf(|program, args| {
                program == Path::new("/opt/infra-unit") && args == ["shop", "/out/shop"]
            })
            .times(1)
            .returning(|_, _| Ok(Some(0)));

        let unit = ExternalUnit::new(
            "infra",
            "/opt/infra-unit",
            UnitLayout::Root,
            Arc::new(runner),
        );
        let outcome = unit
            .invoke(&shop(), Path::new("/out/shop"), &SilentProgress)
            .unwrap();
        assert_eq!(outcome.output_dir, PathBuf::from("/out/shop"));
        assert!(outcome.files.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn external_unit_keeps_non_utf8_destination() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dest = Path::new(OsStr::from_bytes(b"/out/caf\xe9")).to_path_buf();
        let expected = dest.clone().into_os_string();

        let mut runner = MockProcessRunner::new();
        runner.expect_is_available().return_const(true);
        runner
            .expect_run()
            .withf(move |_, args| args[1] == expected)
            .times(1)
            .returning(|_, _| Ok(Some(0)));

        let unit = ExternalUnit::new("infra", "/opt/infra-unit", UnitLayout::Root, Arc::new(runner));
        let outcome = unit.invoke(&shop(), &dest, &SilentProgress).unwrap();
        assert_eq!(outcome.output_dir, dest);
    }

    #[test]
    fn external_unit_propagates_exit_code() {
        let mut runner = MockProcessRunner::new();
        runner.expect_is_available().return_const(true);
        runner.expect_run().returning(|_, _| Ok(Some(2)));

        let unit = ExternalUnit::new(
            "api",
            "/opt/api-unit",
            UnitLayout::Subdirectory,
            Arc::new(runner),
        );
        let err = unit
            .invoke(&shop(), Path::new("/out/apps"), &SilentProgress)
            .unwrap_err();
        assert_eq!(err.unit_exit_code(), Some(2));
    }

    #[test]
    fn external_unit_signal_maps_to_code_one() {
        let mut runner = MockProcessRunner::new();
        runner.expect_is_available().return_const(true);
        runner.expect_run().returning(|_, _| Ok(None));

        let unit = ExternalUnit::new(
            "api",
            "/opt/api-unit",
            UnitLayout::Subdirectory,
            Arc::new(runner),
        );
        let err = unit
            .invoke(&shop(), Path::new("/out/apps"), &SilentProgress)
            .unwrap_err();
        assert_eq!(err.unit_exit_code(), Some(1));
    }

    #[test]
    fn missing_external_program_is_reported_without_running() {
        let mut runner = MockProcessRunner::new();
        runner.expect_is_available().return_const(false);
        runner.expect_run().never();

        let unit = ExternalUnit::new(
            "infra",
            "/nowhere/infra",
            UnitLayout::Root,
            Arc::new(runner),
        );
        let err = unit
            .invoke(&shop(), Path::new("/out"), &SilentProgress)
            .unwrap_err();
        assert!(matches!(
            err,
            StencilError::Application(ApplicationError::MissingDependency { ref label, .. })
                if label == "infra"
        ));
    }
}
