//! Process runner adapter using `std::process`.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use stencil_core::{
    application::{ApplicationError, ports::ProcessRunner},
    error::StencilResult,
};

/// Runs external scaffolder executables as blocking child processes.
///
/// The child inherits stdin, stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn is_available(&self, program: &Path) -> bool {
        program.is_file()
    }

    #[instrument(skip(self), fields(program = %program.display()))]
    fn run(&self, program: &Path, args: &[OsString]) -> StencilResult<Option<i32>> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ApplicationError::ProcessFailed {
                program: program.to_path_buf(),
                reason: e.to_string(),
            })?;

        debug!(?status, "child exited");
        Ok(status.code())
    }
}
