//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "materialize a template" or "compose a project".

pub mod composition;
pub mod materializer;
pub mod unit;

pub use composition::{
    API_DIR, API_MANIFEST_RESOURCE, APPS_DIR, CompositionContext, CompositionReport,
    CompositionService, OverlayStage, RenameStage, Stage, TOP_LEVEL_RESOURCES, UnitStage,
    WORKSPACE_MANIFEST_RESOURCE, api_workspace_stages,
};
pub use materializer::{MaterializeReport, TreeMaterializer};
pub use unit::{
    ExternalUnit, FilePatch, ScaffolderUnit, TemplateUnit, UnitDescriptor, UnitKind, UnitLayout,
    UnitOutcome,
};
