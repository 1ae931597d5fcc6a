//! Clipdrop API Library
//!
//! This crate provides the HTTP handlers, error rendering and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod telemetry;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
