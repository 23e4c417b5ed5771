//! Implementation of the `stencil infra` command: the compose unit on its own.

use std::path::Path;

use tracing::instrument;

use stencil_core::domain::ConnectionInfo;

use crate::{
    cli::{ProjectArgs, global::GlobalArgs},
    commands::{UnitFactory, display_path, parse_name},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Write the compose files for `<name>` into `<dest>`.
///
/// Existing files at the same paths are overwritten.
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: ProjectArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let name = parse_name(&args.name)?;
    let dest_base = args.dest_base();

    let unit = UnitFactory::new(&global, &config)?.infra()?;
    let progress = output.progress(&dest_base);
    output.header(&format!("Writing infra for '{name}'..."))?;

    let outcome = unit.invoke(&name, &dest_base, &progress)?;

    let connections = ConnectionInfo::for_project(&name);
    output.success(&format!(
        "Infra files written to {}",
        display_path(&outcome.output_dir)
    ))?;
    output.print("")?;
    output.print("Start the databases:")?;
    for line in compose_commands(&outcome.output_dir) {
        output.print(&format!("  {line}"))?;
    }
    output.print("")?;
    output.print("Databases:")?;
    output.print(&format!("  dev   {}", connections.dev_url))?;
    output.print(&format!("  test  {}", connections.test_url))?;

    Ok(())
}

/// `podman compose` invocations for the dev and test databases.
fn compose_commands(dest: &Path) -> [String; 2] {
    let infra = Path::new(&display_path(dest)).join("infra");
    ["docker-compose.yml", "docker-compose.test.yml"]
        .map(|file| format!("podman compose -f {} up -d", infra.join(file).display()))
}
