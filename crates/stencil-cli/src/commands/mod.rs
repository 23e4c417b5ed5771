//! Command handlers, one module per subcommand.
//!
//! [`UnitFactory`] turns the parsed flags and configuration into the
//! scaffolder units the handlers run.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use stencil_adapters::{LocalFilesystem, SystemProcessRunner, TemplateLocator, TemplateSet};
use stencil_core::{
    application::{
        ports::{Filesystem, ProcessRunner},
        services::{ExternalUnit, ScaffolderUnit, TemplateUnit, TreeMaterializer, UnitLayout},
    },
    domain::{Placeholder, ProjectName},
};

use crate::{
    cli::GlobalArgs,
    config::{AppConfig, UnitConfig},
    error::{CliError, CliResult},
};

pub mod api;
pub mod completions;
pub mod config;
pub mod infra;
pub mod init;
pub mod list;
pub mod new;

/// Label of the API crate unit.
pub const API_UNIT: &str = "api";

/// Label of the compose unit.
pub const INFRA_UNIT: &str = "infra";

/// Validate the project name argument.
pub fn parse_name(raw: &str) -> CliResult<ProjectName> {
    Ok(ProjectName::new(raw)?)
}

/// Builds units from configuration and the resolved template set.
pub struct UnitFactory {
    templates: Option<TemplateSet>,
    searched: Vec<PathBuf>,
    placeholder: Placeholder,
    api: UnitConfig,
    infra: UnitConfig,
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn ProcessRunner>,
}

impl UnitFactory {
    pub fn new(global: &GlobalArgs, config: &AppConfig) -> CliResult<Self> {
        let placeholder = Placeholder::new(config.templates.placeholder.clone())?;

        let locator = [global.templates.as_ref(), config.templates.dir.as_ref()]
            .into_iter()
            .flatten()
            .fold(TemplateLocator::new(), |locator, dir| {
                locator.with_override(dir)
            });
        let templates = locator.locate();
        debug!(templates = ?templates.as_ref().map(TemplateSet::root), "template set");

        Ok(Self {
            templates,
            searched: locator.candidates(),
            placeholder,
            api: config.units.api.clone(),
            infra: config.units.infra.clone(),
            filesystem: Arc::new(LocalFilesystem::new()),
            runner: Arc::new(SystemProcessRunner::new()),
        })
    }

    pub fn filesystem(&self) -> Arc<dyn Filesystem> {
        self.filesystem.clone()
    }

    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    pub fn materializer(&self) -> TreeMaterializer {
        TreeMaterializer::new(self.filesystem.clone())
    }

    /// The resolved template set, or `TemplatesNotFound` listing every
    /// directory that was probed.
    pub fn templates(&self) -> CliResult<&TemplateSet> {
        self.templates
            .as_ref()
            .ok_or_else(|| CliError::TemplatesNotFound {
                searched: self.searched.clone(),
            })
    }

    /// The API crate unit: writes `<dest>/<name>/`.
    pub fn api(&self) -> CliResult<Arc<dyn ScaffolderUnit>> {
        self.unit(API_UNIT, &self.api, UnitLayout::Subdirectory, TemplateSet::api)
    }

    /// The compose unit: writes into `<dest>/` directly.
    pub fn infra(&self) -> CliResult<Arc<dyn ScaffolderUnit>> {
        self.unit(INFRA_UNIT, &self.infra, UnitLayout::Root, TemplateSet::infra)
    }

    fn unit(
        &self,
        label: &str,
        config: &UnitConfig,
        layout: UnitLayout,
        template_root: fn(&TemplateSet) -> PathBuf,
    ) -> CliResult<Arc<dyn ScaffolderUnit>> {
        if let Some(command) = &config.command {
            debug!(unit = label, command = %command.display(), "using external unit");
            return Ok(Arc::new(ExternalUnit::new(
                label,
                command,
                layout,
                self.runner.clone(),
            )));
        }

        Ok(Arc::new(TemplateUnit::new(
            label,
            template_root(self.templates()?),
            layout,
            self.placeholder.clone(),
            self.materializer(),
        )))
    }
}

/// `path` as the user would type it from the current directory.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf());
    relative
        .strip_prefix(".")
        .unwrap_or(&relative)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::application::services::UnitKind;
    use tempfile::TempDir;

    fn global(templates: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            templates,
        }
    }

    #[test]
    fn template_units_use_resolved_set() {
        let dir = TempDir::new().unwrap();
        let factory =
            UnitFactory::new(&global(Some(dir.path().to_path_buf())), &AppConfig::default())
                .unwrap();

        let api = factory.api().unwrap();
        assert_eq!(api.descriptor().kind, UnitKind::Template);
        assert_eq!(api.descriptor().location, dir.path().join("api"));
        assert_eq!(api.descriptor().layout, UnitLayout::Subdirectory);

        let infra = factory.infra().unwrap();
        assert_eq!(infra.descriptor().location, dir.path().join("infra"));
        assert_eq!(infra.descriptor().layout, UnitLayout::Root);
    }

    #[test]
    fn configured_command_makes_unit_external() {
        let dir = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.units.infra.command = Some(PathBuf::from("/opt/infra-unit"));

        let factory = UnitFactory::new(&global(Some(dir.path().join("missing"))), &config).unwrap();

        let infra = factory.infra().unwrap();
        assert_eq!(infra.descriptor().kind, UnitKind::External);
        assert_eq!(infra.descriptor().location, PathBuf::from("/opt/infra-unit"));
        assert!(matches!(
            factory.api(),
            Err(CliError::TemplatesNotFound { .. })
        ));
    }

    #[test]
    fn flag_wins_over_config_dir() {
        let flag = TempDir::new().unwrap();
        let configured = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.templates.dir = Some(configured.path().to_path_buf());

        let factory = UnitFactory::new(&global(Some(flag.path().to_path_buf())), &config).unwrap();

        assert_eq!(factory.templates().unwrap().root(), flag.path());
    }

    #[test]
    fn invalid_placeholder_is_rejected() {
        let mut config = AppConfig::default();
        config.templates.placeholder = String::new();
        assert!(UnitFactory::new(&global(None), &config).is_err());
    }

    #[test]
    fn display_path_drops_leading_dot() {
        assert_eq!(display_path(Path::new("./shop")), "shop");
        assert_eq!(display_path(Path::new("/nowhere/shop")), "/nowhere/shop");
    }

    #[test]
    fn bad_name_is_core_error() {
        assert!(matches!(parse_name("Shop"), Err(CliError::Core(_))));
        assert_eq!(parse_name("shop").unwrap().as_str(), "shop");
    }
}
