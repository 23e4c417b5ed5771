//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `STENCIL__<SECTION>__<KEY>`, e.g.
//!    `STENCIL__UNITS__INFRA__COMMAND=/opt/infra-unit`
//! 3. Config file (`--config FILE`, else [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use stencil_core::domain::DEFAULT_PLACEHOLDER;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "STENCIL";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Template settings.
    pub templates: TemplateConfig,
    /// Per-unit overrides.
    pub units: UnitsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template distribution directory. Overridden by `--templates`.
    pub dir: Option<PathBuf>,
    /// Token replaced with the project name.
    pub placeholder: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: None,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsConfig {
    pub api: UnitConfig,
    pub infra: UnitConfig,
}

/// How one unit runs. Without a command the shipped template runs in-process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// External scaffolder executable, invoked as `<command> <name> <dest>`.
    pub command: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// A file passed explicitly via `--config` must exist; the default
    /// location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let built = Config::builder()
            .set_default("templates.placeholder", DEFAULT_PLACEHOLDER)?
            .set_default("output.no_color", false)?
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| format!("reading {}", path.display()))?;

        built
            .try_deserialize()
            .with_context(|| format!("parsing {}", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.stencil.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "stencil", "stencil")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".stencil.toml"))
    }

    /// Look up a dotted key such as `units.infra.command`.
    ///
    /// Unset optional values read as an empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let root = serde_json::to_value(self).ok()?;
        let value = key
            .split('.')
            .try_fold(&root, |node, segment| node.get(segment))?;

        match value {
            serde_json::Value::Null => Some(String::new()),
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }
}
