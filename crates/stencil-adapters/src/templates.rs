//! Template distribution discovery.
//!
//! A template set is one directory holding the payloads the units stamp out:
//!
//! ```text
//! templates/
//!   api/        API crate unit
//!   infra/      compose unit
//!   workspace/  workspace-level overlays (Cargo.toml, justfile, ...)
//! ```
//!
//! # Resolution order
//!
//! 1. Explicit overrides (`--templates`, `$STENCIL_TEMPLATES_DIR`, config
//!    `templates.dir`), in the order they were added. When any override is
//!    given, only overrides are considered.
//! 2. `./templates` relative to the current working directory.
//! 3. `<executable-dir>/templates`.
//! 4. `<executable-dir>/../share/stencil/templates` (installed layout).
//! 5. The platform data directory, e.g. `~/.local/share/stencil/templates`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info, instrument, warn};

/// Sub-directory holding the API unit's template root.
pub const API_TEMPLATE_DIR: &str = "api";

/// Sub-directory holding the infra unit's template root.
pub const INFRA_TEMPLATE_DIR: &str = "infra";

/// Sub-directory holding workspace overlay files.
pub const WORKSPACE_TEMPLATE_DIR: &str = "workspace";

/// A resolved template distribution directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    root: PathBuf,
}

impl TemplateSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn api(&self) -> PathBuf {
        self.root.join(API_TEMPLATE_DIR)
    }

    pub fn infra(&self) -> PathBuf {
        self.root.join(INFRA_TEMPLATE_DIR)
    }

    pub fn workspace(&self) -> PathBuf {
        self.root.join(WORKSPACE_TEMPLATE_DIR)
    }

    /// Whether `dir` looks like a template set.
    pub fn is_template_set(dir: &Path) -> bool {
        [API_TEMPLATE_DIR, INFRA_TEMPLATE_DIR, WORKSPACE_TEMPLATE_DIR]
            .iter()
            .any(|child| dir.join(child).is_dir())
    }
}

/// Finds the template set following the documented resolution order.
#[derive(Debug, Clone, Default)]
pub struct TemplateLocator {
    overrides: Vec<PathBuf>,
}

impl TemplateLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an explicit template directory. Earlier overrides win.
    pub fn with_override(mut self, dir: impl Into<PathBuf>) -> Self {
        self.overrides.push(dir.into());
        self
    }

    /// Ordered list of directories that will be probed.
    pub fn candidates(&self) -> Vec<PathBuf> {
        if !self.overrides.is_empty() {
            return self.overrides.clone();
        }

        let mut paths = Vec::with_capacity(4);
        paths.push(PathBuf::from("templates"));

        if let Some(exe_dir) = exe_dir() {
            paths.push(exe_dir.join("templates"));
            paths.push(exe_dir.join("../share/stencil/templates"));
        }

        if let Some(dirs) = ProjectDirs::from("com", "stencil", "stencil") {
            paths.push(dirs.data_dir().join("templates"));
        }

        paths
    }

    /// First candidate that exists. Fallback candidates must also contain at
    /// least one of `api/`, `infra/` or `workspace/`.
    #[instrument(skip(self))]
    pub fn locate(&self) -> Option<TemplateSet> {
        let explicit = !self.overrides.is_empty();

        for candidate in self.candidates() {
            debug!(path = %candidate.display(), "checking candidate templates path");

            if !candidate.is_dir() {
                debug!(path = %candidate.display(), "path does not exist, skipping");
                continue;
            }
            if !explicit && !TemplateSet::is_template_set(&candidate) {
                debug!(path = %candidate.display(), "not a template set, skipping");
                continue;
            }

            info!(path = %candidate.display(), "templates directory resolved");
            return Some(TemplateSet::new(candidate));
        }

        warn!(explicit, "no templates directory found");
        None
    }
}

/// Directory of the current executable, or `None` if it cannot be
/// determined (some platforms / test runners).
fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}
