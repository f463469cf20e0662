//! Review moderation: listing, full delete and comment redaction.

pub mod client;
pub mod types;

pub use types::{Review, ReviewFilters, REDACTED_COMMENT};
