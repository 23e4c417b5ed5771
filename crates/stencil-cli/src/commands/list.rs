//! Implementation of the `stencil list` command.

use std::sync::Arc;

use serde::Serialize;

use stencil_core::application::ScaffolderUnit;

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    commands::{API_UNIT, INFRA_UNIT, UnitFactory},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One row of `stencil list`.
#[derive(Debug, Serialize)]
struct UnitRow {
    label: String,
    kind: String,
    location: Option<String>,
    available: bool,
}

pub fn execute(
    args: ListArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let factory = UnitFactory::new(&global, &config)?;
    let rows = vec![
        row(API_UNIT, factory.api()),
        row(INFRA_UNIT, factory.infra()),
    ];

    match args.format {
        ListFormat::Table => {
            match factory.templates() {
                Ok(set) => output.header(&format!("Templates: {}", set.root().display()))?,
                Err(_) => output.warning("No templates directory found")?,
            }
            output.print("")?;
            output.print(&format!(
                "  {:<8} {:<10} {:<10} {}",
                "UNIT", "KIND", "STATUS", "LOCATION"
            ))?;
            for row in &rows {
                output.print(&format!(
                    "  {:<8} {:<10} {:<10} {}",
                    row.label,
                    row.kind,
                    if row.available { "ready" } else { "missing" },
                    row.location.as_deref().unwrap_or("-"),
                ))?;
            }
        }

        ListFormat::Plain => {
            for row in &rows {
                output.data(&row.label)?;
            }
        }

        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise unit list: {e}"),
                source: Some(Box::new(e)),
            })?;
            output.data(&json)?;
        }
    }

    Ok(())
}

fn row(label: &str, unit: CliResult<Arc<dyn ScaffolderUnit>>) -> UnitRow {
    match unit {
        Ok(unit) => {
            let descriptor = unit.descriptor();
            UnitRow {
                label: descriptor.label.clone(),
                kind: descriptor.kind.to_string(),
                location: Some(descriptor.location.display().to_string()),
                available: unit.is_available(),
            }
        }
        Err(_) => UnitRow {
            label: label.to_owned(),
            kind: "template".into(),
            location: None,
            available: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_unit_is_missing() {
        let row = row("api", Err(CliError::TemplatesNotFound { searched: vec![] }));
        assert_eq!(row.label, "api");
        assert!(!row.available);
        assert!(row.location.is_none());
    }
}
