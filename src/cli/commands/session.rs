use clap::{Arg, Command};

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn login() -> Command {
    Command::new("login")
        .about("Sign in and store the session")
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long("username")
                .help("Administrator username (email)")
                .env("PUTEVOD_ADMIN_USERNAME"),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long("password")
                .help("Administrator password; prompted for without echo when omitted")
                .env("PUTEVOD_ADMIN_PASSWORD")
                .hide_env_values(true),
        )
}

#[must_use]
pub fn logout() -> Command {
    Command::new("logout").about("Invalidate the refresh token and clear the stored session")
}

#[must_use]
pub fn status() -> Command {
    Command::new("status").about("Validate the stored session and show who is signed in")
}

#[must_use]
pub fn dashboard() -> Command {
    Command::new("dashboard").about("Show moderation counters and recent activity")
}
