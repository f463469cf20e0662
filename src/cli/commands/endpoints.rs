use clap::{Arg, Command};

pub const ARG_AUTH_URL: &str = "auth-url";
pub const ARG_LIBRARY_URL: &str = "library-url";
pub const ARG_PLANNER_URL: &str = "planner-url";
pub const ARG_EXTERNAL_URL: &str = "external-url";
pub const ARG_SESSION_FILE: &str = "session-file";

/// Base URL overrides and the session file location. Unset means the built-in
/// default applies.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_AUTH_URL)
                .long("auth-url")
                .help("Auth service base URL")
                .env("PUTEVOD_AUTH_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_LIBRARY_URL)
                .long("library-url")
                .help("Library service base URL (routes and reviews)")
                .env("PUTEVOD_LIBRARY_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_PLANNER_URL)
                .long("planner-url")
                .help("Planner service base URL")
                .env("PUTEVOD_PLANNER_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_EXTERNAL_URL)
                .long("external-url")
                .help("External integration service base URL")
                .env("PUTEVOD_EXTERNAL_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long("session-file")
                .help("Where the session tokens are stored (default: ~/.putevod-admin/session.json)")
                .env("PUTEVOD_SESSION_FILE")
                .global(true),
        )
}
