//! Domain layer: pure values with no I/O.
//!
//! - [`ProjectName`] and [`Placeholder`] carry their validation contracts.
//! - [`Substitution`] is the text substitution engine.
//! - [`ConnectionInfo`] derives the database URLs advertised to operators.

pub mod error;
pub mod substitution;
pub mod value_objects;

pub use error::{DomainError, ErrorCategory};
pub use substitution::Substitution;
pub use value_objects::{
    ConnectionInfo, DEFAULT_PLACEHOLDER, DEV_DATABASE_PORT, Placeholder, ProjectName,
    TEST_DATABASE_PORT,
};
