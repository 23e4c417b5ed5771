//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! project scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! │     new / api / infra subcommands       │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  CompositionService → ScaffolderUnit    │
//! │         → TreeMaterializer              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  Filesystem, ProcessRunner, Progress    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     stencil-adapters (Infrastructure)   │
//! │  LocalFilesystem, SystemProcessRunner   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  ProjectName, Placeholder, Substitution │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use stencil_core::prelude::*;
//!
//! # fn run(filesystem: Arc<dyn Filesystem>) -> StencilResult<()> {
//! let materializer = TreeMaterializer::new(filesystem);
//! let name = ProjectName::new("shop")?;
//! let substitution = Substitution::for_project(Placeholder::default(), &name);
//!
//! materializer.materialize(
//!     Path::new("templates/api"),
//!     Path::new("out/shop"),
//!     &substitution,
//!     &SilentProgress,
//! )?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::ports::{
        DirEntry, EntryKind, Filesystem, ProcessRunner, Progress, SilentProgress,
    };
    pub use crate::application::services::{
        CompositionReport, CompositionService, ExternalUnit, ScaffolderUnit, Stage, TemplateUnit,
        TreeMaterializer, UnitLayout, api_workspace_stages,
    };
    pub use crate::domain::{ConnectionInfo, Placeholder, ProjectName, Substitution};
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
