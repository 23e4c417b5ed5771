//! Implementation of the `stencil api` command: the API unit on its own.

use tracing::instrument;

use stencil_core::application::{ApplicationError, ports::Filesystem};

use crate::{
    cli::{ProjectArgs, global::GlobalArgs},
    commands::{UnitFactory, display_path, parse_name},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Create `<dest>/<name>/` from the API unit. Refuses an existing directory.
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
    let project_dir = dest_base.join(name.as_str());
    if factory.filesystem().exists(&project_dir) {
        return Err(ApplicationError::ProjectExists { path: project_dir }.into());
    }

    let unit = factory.api()?;
    let progress = output.progress(&project_dir);
    output.header(&format!("Creating API crate '{name}'..."))?;

    let outcome = unit.invoke(&name, &dest_base, &progress)?;

    output.success(&format!(
        "API crate created at {}",
        display_path(&outcome.output_dir)
    ))?;
    output.print("")?;
    output.print("Next steps:")?;
    for line in next_steps(&display_path(&outcome.output_dir)) {
        output.print(&format!("  {line}"))?;
    }
    output.print("")?;
    output.detail("The resource template lives in src/features/example/. Rename or copy it for real resources.")?;
    output.detail("Register new resources in src/features/mod.rs.")?;

    Ok(())
}

fn next_steps(crate_dir: &str) -> [String; 3] {
    [
        format!("cd {crate_dir}"),
        "cargo build".into(),
        "cargo test    # needs the test database, see .env.example".into(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_steps_build_then_test() {
        let steps = next_steps("billing");
        assert_eq!(steps[0], "cd billing");
        assert_eq!(steps[1], "cargo build");
        assert!(steps[2].starts_with("cargo test"));
    }
}
