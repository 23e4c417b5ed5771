//! Implementation of the `stencil new` command.
//!
//! Responsibility: resolve units and templates, run the composition, and
//! display results. No scaffolding logic lives here.

use tracing::{info, instrument};

use stencil_core::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::{CompositionService, UnitKind, api_workspace_stages},
    },
    domain::{ConnectionInfo, ProjectName},
};

use crate::{
    cli::{ProjectArgs, global::GlobalArgs},
    commands::{UnitFactory, display_path, parse_name},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `stencil new` command.
///
/// Dispatch sequence:
/// 1. Validate the project name
/// 2. Resolve the API and infra units and the workspace overlay files
/// 3. Run the composition into `<dest>/<name>`
/// 4. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: ProjectArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = parse_name(&args.name)?;
    let dest_base = args.dest_base();

    let factory = UnitFactory::new(&global, &config)?;
    let workspace = factory.templates()?.workspace();
    if !factory.filesystem().is_dir(&workspace) {
        return Err(ApplicationError::MissingDependency {
            label: "workspace files".into(),
            path: workspace,
        }
        .into());
    }

    let api = factory.api()?;
    let infra = factory.infra()?;
    let all_in_process = [&api, &infra]
        .iter()
        .all(|unit| unit.descriptor().kind == UnitKind::Template);

    let stages = api_workspace_stages(
        api,
        infra,
        &workspace,
        factory.materializer(),
    );
    let service = CompositionService::new(
        factory.filesystem(),
        factory.placeholder().clone(),
        stages,
    );

    output.header(&format!("Creating '{name}'..."))?;
    let project_dir = dest_base.join(name.as_str());
    let progress = output.progress(&project_dir);

    let report = service.compose(&name, &dest_base, &progress)?;
    info!(
        stages = report.stages.len(),
        files = report.files.len(),
        "composition finished"
    );

    output.success(&summary(&name, report.files.len(), all_in_process))?;
    print_next_steps(&name, &display_path(&report.project_dir), &output)?;

    Ok(())
}

fn print_next_steps(name: &ProjectName, project: &str, output: &OutputManager) -> CliResult<()> {
    let connections = ConnectionInfo::for_project(name);

    output.print("")?;
    output.print("Next steps:")?;
    for line in next_steps(project) {
        output.print(&format!("  {line}"))?;
    }
    output.print("")?;
    output.print("Databases:")?;
    output.print(&format!("  dev   {}", connections.dev_url))?;
    output.print(&format!("  test  {}", connections.test_url))?;
    output.print("")?;
    output.detail(
        "Duplicate and rename apps/api/src/features/example/ to start your first resource.",
    )?;
    Ok(())
}

/// Files written by external units are not observed, so the count is only
/// shown when every unit ran in-process.
fn summary(name: &ProjectName, files: usize, all_in_process: bool) -> String {
    if all_in_process {
        format!("Project '{name}' created ({files} files)")
    } else {
        format!("Project '{name}' created")
    }
}

fn next_steps(project: &str) -> [String; 4] {
    [
        format!("cd {project}"),
        "cp .env.example .env".into(),
        "just db-up".into(),
        "just run".into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_steps_start_in_project() {
        let steps = next_steps("shop");
        assert_eq!(steps[0], "cd shop");
        assert_eq!(steps[3], "just run");
    }

    #[test]
    fn file_count_only_for_in_process_units() {
        let name = ProjectName::new("shop").unwrap();
        assert_eq!(summary(&name, 12, true), "Project 'shop' created (12 files)");
        assert_eq!(summary(&name, 9, false), "Project 'shop' created");
    }
}
