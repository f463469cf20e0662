//! # Putevod Admin (Moderation Console)
//!
//! `putevod-admin` is the administrative console for the Putevod travel-route
//! platform. It signs an administrator in against the auth service, lists and
//! moderates user-submitted routes and reviews held by the library service, and
//! renders dashboard counters.
//!
//! ## Services
//!
//! The console is a thin client over four backends, each reached under a
//! versioned prefix: `auth`, `library`, `planner` and `external`. All business
//! rules and persistence live there; the console only issues reads and the
//! moderation commands (approve, reject, delete, redact).
//!
//! ## Session Lifecycle
//!
//! The session is an access token, a refresh token and a cached user record,
//! persisted under the `token`, `refreshToken` and `user` keys. On startup the
//! access token's `exp` claim is decoded; an expired token is refreshed once.
//! Any decode or refresh failure clears all three keys together, so the stored
//! session is never half-valid.

pub mod app_lib;
pub mod cli;
pub mod features;
pub mod views;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
