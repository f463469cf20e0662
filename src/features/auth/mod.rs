//! Auth feature module covering login, silent refresh, logout and the session
//! guard. It keeps authentication logic out of the views. This module touches
//! credentials and token material and must avoid logging either.
//!
//! Flow Overview: login posts the credentials to the auth service and persists
//! the returned token triple. On startup the stored access token's expiry is
//! checked and refreshed once if needed; any failure clears the session.
//! Logout invalidates the refresh token on a best-effort basis and then always
//! clears local state.

pub(crate) mod client;
mod guards;
pub mod state;
pub mod storage;
pub mod token;
pub mod types;

pub use guards::{require_auth, Access, LOGIN_PATH};
pub use state::{SessionContext, SessionFault, SessionStatus};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use types::User;
