//! Application layer for Stencil.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (TreeMaterializer, units, CompositionService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Naming rules and substitution live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    CompositionReport, CompositionService, ExternalUnit, MaterializeReport, ScaffolderUnit,
    TemplateUnit, TreeMaterializer, UnitDescriptor, UnitKind, UnitLayout,
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ProcessRunner, Progress};

pub use error::ApplicationError;
