pub mod config;
pub mod error;
pub mod features;
pub mod router;
pub mod state;
