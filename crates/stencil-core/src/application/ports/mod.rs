//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stencil-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ProcessRunner`: External scaffolder executables
//!   - `Progress`: Per-file and per-stage notifications

pub mod output;

#[cfg(test)]
pub use output::MockProcessRunner;
pub use output::{
    DirEntry, EntryKind, Filesystem, ProcessRunner, Progress, RecordingProgress, SilentProgress,
};
