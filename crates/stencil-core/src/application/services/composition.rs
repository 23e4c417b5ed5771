//! Composition Service - assembles one project from several units.
//!
//! A composition is an ordered list of [`Stage`] values run against a shared
//! [`CompositionContext`]:
//!
//! 1. Refuse an existing project directory (no writes happen)
//! 2. Create the project directory
//! 3. Run each stage in order, stopping at the first error
//!
//! Completed stages are never undone. On failure the partial project stays on
//! disk for inspection.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, Progress},
        services::{materializer::TreeMaterializer, unit::ScaffolderUnit},
    },
    domain::{Placeholder, ProjectName, Substitution},
    error::StencilResult,
};

/// Directory the API unit is staged into.
pub const APPS_DIR: &str = "apps";

/// Final location of the API crate inside a composed workspace.
pub const API_DIR: &str = "apps/api";

/// Workspace-aware manifest overlaid onto the API crate.
pub const API_MANIFEST_RESOURCE: &str = "api-Cargo.toml";

/// Workspace root manifest resource.
pub const WORKSPACE_MANIFEST_RESOURCE: &str = "Cargo.toml";

/// Top-level convenience files written last.
pub const TOP_LEVEL_RESOURCES: [&str; 4] = ["justfile", "README.md", ".gitignore", ".env.example"];

/// State shared by the stages of one composition run.
pub struct CompositionContext<'a> {
    pub name: ProjectName,
    pub project_dir: PathBuf,
    pub substitution: Substitution,
    pub progress: &'a dyn Progress,
    /// Files written so far, relative to `project_dir` when known.
    pub files: Vec<PathBuf>,
}

impl CompositionContext<'_> {
    /// Resolve a project-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        let relative = relative.as_ref();
        if relative.as_os_str().is_empty() {
            self.project_dir.clone()
        } else {
            self.project_dir.join(relative)
        }
    }

    fn record(&mut self, relative: PathBuf) {
        if !self.files.contains(&relative) {
            self.files.push(relative);
        }
    }
}

/// One step of a composition.
pub trait Stage: Send + Sync {
    fn label(&self) -> &str;

    fn run(&self, ctx: &mut CompositionContext<'_>) -> StencilResult<()>;
}

/// Outcome of a successful composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionReport {
    pub project_dir: PathBuf,
    pub stages: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Runs composition stages into a fresh project directory.
pub struct CompositionService {
    filesystem: Arc<dyn Filesystem>,
    placeholder: Placeholder,
    stages: Vec<Box<dyn Stage>>,
}

impl CompositionService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        placeholder: Placeholder,
        stages: Vec<Box<dyn Stage>>,
    ) -> Self {
        Self {
            filesystem,
            placeholder,
            stages,
        }
    }

    pub fn stage_labels(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.label()).collect()
    }

    /// Compose `<dest_base>/<name>`.
    #[instrument(
        skip_all,
        fields(project = %name, dest = %dest_base.display())
    )]
    pub fn compose(
        &self,
        name: &ProjectName,
        dest_base: &Path,
        progress: &dyn Progress,
    ) -> StencilResult<CompositionReport> {
        let project_dir = dest_base.join(name.as_str());

        if self.filesystem.exists(&project_dir) {
            return Err(ApplicationError::ProjectExists { path: project_dir }.into());
        }

        self.filesystem.create_dir_all(&project_dir)?;
        info!(path = %project_dir.display(), "project directory created");

        let mut ctx = CompositionContext {
            name: name.clone(),
            project_dir,
            substitution: Substitution::for_project(self.placeholder.clone(), name),
            progress,
            files: Vec::new(),
        };
        let mut completed = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            progress.stage_started(stage.label());
            info!(stage = stage.label(), "stage started");

            if let Err(e) = stage.run(&mut ctx) {
                error!(stage = stage.label(), error = %e, "stage failed, aborting composition");
                return Err(e);
            }
            completed.push(stage.label().to_owned());
        }

        info!(stages = completed.len(), files = ctx.files.len(), "composition completed");
        Ok(CompositionReport {
            project_dir: ctx.project_dir,
            stages: completed,
            files: ctx.files,
        })
    }
}

// ── Stages ────────────────────────────────────────────────────────────────────

/// Invoke a scaffolder unit with a project-relative destination.
pub struct UnitStage {
    label: String,
    unit: Arc<dyn ScaffolderUnit>,
    dest: PathBuf,
}

impl UnitStage {
    pub fn new(unit: Arc<dyn ScaffolderUnit>, dest: impl Into<PathBuf>) -> Self {
        Self {
            label: unit.descriptor().label.clone(),
            unit,
            dest: dest.into(),
        }
    }
}

impl Stage for UnitStage {
    fn label(&self) -> &str {
        &self.label
    }

    fn run(&self, ctx: &mut CompositionContext<'_>) -> StencilResult<()> {
        let dest_base = ctx.path(&self.dest);
        let outcome = self.unit.invoke(&ctx.name, &dest_base, ctx.progress)?;

        for file in outcome.files {
            let absolute = outcome.output_dir.join(file);
            let relative = absolute
                .strip_prefix(&ctx.project_dir)
                .map(Path::to_path_buf)
                .unwrap_or(absolute);
            ctx.record(relative);
        }
        Ok(())
    }
}

/// Move the subdirectory a unit created under `parent/<name>` to `to`.
pub struct RenameStage {
    label: String,
    filesystem: Arc<dyn Filesystem>,
    parent: PathBuf,
    to: PathBuf,
}

impl RenameStage {
    pub fn named_subdir(
        filesystem: Arc<dyn Filesystem>,
        parent: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
    ) -> Self {
        let to = to.into();
        Self {
            label: format!("rename to {}", to.display()),
            filesystem,
            parent: parent.into(),
            to,
        }
    }
}

impl Stage for RenameStage {
    fn label(&self) -> &str {
        &self.label
    }

    fn run(&self, ctx: &mut CompositionContext<'_>) -> StencilResult<()> {
        let from_relative = self.parent.join(ctx.name.as_str());
        let from = ctx.path(&from_relative);
        let to = ctx.path(&self.to);

        if !self.filesystem.exists(&from) {
            return Err(ApplicationError::RenameSourceMissing { from, to }.into());
        }
        self.filesystem.rename(&from, &to)?;
        info!(from = %from_relative.display(), to = %self.to.display(), "renamed");

        for file in ctx.files.iter_mut() {
            if let Ok(rest) = file.strip_prefix(&from_relative) {
                *file = self.to.join(rest);
            }
        }
        Ok(())
    }
}

/// Write single resource files onto fixed project-relative paths,
/// substituting the project name.
pub struct OverlayStage {
    label: String,
    materializer: TreeMaterializer,
    files: Vec<(PathBuf, PathBuf)>,
}

impl OverlayStage {
    pub fn new(label: impl Into<String>, materializer: TreeMaterializer) -> Self {
        Self {
            label: label.into(),
            materializer,
            files: Vec::new(),
        }
    }

    /// Add an overlay of `source` onto project-relative `target`.
    pub fn file(mut self, source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.files.push((source.into(), target.into()));
        self
    }
}

impl Stage for OverlayStage {
    fn label(&self) -> &str {
        &self.label
    }

    fn run(&self, ctx: &mut CompositionContext<'_>) -> StencilResult<()> {
        for (source, target) in &self.files {
            self.materializer.materialize_file(
                source,
                &ctx.path(target),
                &ctx.substitution,
                ctx.progress,
            )?;
            ctx.record(target.clone());
        }
        Ok(())
    }
}

// ── Plans ─────────────────────────────────────────────────────────────────────

/// Stage list for an API workspace: API crate under `apps/api`, infra
/// compose files and workspace-level files at the root.
///
/// `resources` holds the workspace overlay files.
pub fn api_workspace_stages(
    api: Arc<dyn ScaffolderUnit>,
    infra: Arc<dyn ScaffolderUnit>,
    resources: &Path,
    materializer: TreeMaterializer,
) -> Vec<Box<dyn Stage>> {
    let filesystem = materializer.filesystem().clone();

    let top_level = TOP_LEVEL_RESOURCES.iter().fold(
        OverlayStage::new("top-level files", materializer.clone()),
        |stage, file| stage.file(resources.join(file), *file),
    );

    vec![
        Box::new(UnitStage::new(api, APPS_DIR)),
        Box::new(RenameStage::named_subdir(filesystem, APPS_DIR, API_DIR)),
        Box::new(
            OverlayStage::new("workspace patch", materializer.clone()).file(
                resources.join(API_MANIFEST_RESOURCE),
                Path::new(API_DIR).join("Cargo.toml"),
            ),
        ),
        Box::new(
            OverlayStage::new("workspace root", materializer)
                .file(resources.join(WORKSPACE_MANIFEST_RESOURCE), "Cargo.toml"),
        ),
        Box::new(UnitStage::new(infra, "")),
        Box::new(top_level),
    ]
}
