//! Shared utilities for API access, configuration, errors and identifiers.
//!
//! Feature clients build on the gateway in [`api`] so every backend call gets
//! the same bearer handling and error normalization. These helpers never store
//! credentials themselves; callers must still avoid logging token material.

pub mod api;
pub mod config;
pub mod errors;
pub mod ids;

pub use api::{ApiClient, Gateway};
pub use config::{Service, ServiceEndpoints};
pub use errors::AppError;
