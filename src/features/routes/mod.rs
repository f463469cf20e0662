//! Route moderation: listing (all or pending), approve, reject and delete.

pub mod client;
pub mod types;

pub use types::{Route, RouteFilters, RouteStatus, RouteTab};
