use crate::{
    app_lib::AppError,
    features::auth::{KeyValueStore, SessionContext, User},
};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

const MISSING_CREDENTIALS: &str = "Please enter username and password";
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// What the login screen shows after a submit.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn(User),
    /// A session was already active; no credentials were sent.
    AlreadySignedIn(User),
    Rejected(&'static str),
    Failed(AppError),
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SignedIn(user) => write!(f, "Signed in as {}", user.username),
            Self::AlreadySignedIn(user) => write!(f, "Already signed in as {}", user.username),
            Self::Rejected(message) => f.write_str(message),
            Self::Failed(err) => write!(f, "{err}"),
        }
    }
}

/// Validates the form and hands the credentials to the session.
pub async fn submit<S: KeyValueStore>(
    session: &mut SessionContext<S>,
    username: &str,
    password: &SecretString,
) -> LoginOutcome {
    if let Some(user) = session.user() {
        return LoginOutcome::AlreadySignedIn(user.clone());
    }

    let username = username.trim();
    if username.is_empty() || password.expose_secret().trim().is_empty() {
        return LoginOutcome::Rejected(MISSING_CREDENTIALS);
    }

    match session.login(username, password).await {
        Ok(true) => session
            .user()
            .cloned()
            .map_or(LoginOutcome::Rejected(INVALID_CREDENTIALS), LoginOutcome::SignedIn),
        Ok(false) => LoginOutcome::Rejected(INVALID_CREDENTIALS),
        Err(err) => LoginOutcome::Failed(err),
    }
}
