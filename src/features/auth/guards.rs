use crate::{
    app_lib::AppError,
    features::auth::{state::SessionContext, storage::KeyValueStore, types::User},
};

/// Where unauthenticated callers are sent.
pub const LOGIN_PATH: &str = "login";

/// Decision of the session guard for a protected view.
#[derive(Debug, PartialEq, Eq)]
pub enum Access<'a> {
    /// Session check has not run yet; show the loading state.
    Pending,
    Granted(&'a User),
    Redirect { to: &'static str },
}

impl<'a> Access<'a> {
    /// Collapses the decision into the signed-in user or `Unauthenticated`.
    ///
    /// # Errors
    /// Returns `AppError::Unauthenticated` unless access was granted.
    pub fn into_user(self) -> Result<&'a User, AppError> {
        match self {
            Self::Granted(user) => Ok(user),
            Self::Pending | Self::Redirect { .. } => Err(AppError::Unauthenticated),
        }
    }
}

/// Gates a protected view on the session state.
// UX-only guard; real access control lives on the backends.
pub fn require_auth<S: KeyValueStore>(session: &SessionContext<S>) -> Access<'_> {
    if !session.is_initialized() {
        return Access::Pending;
    }
    session
        .user()
        .map_or(Access::Redirect { to: LOGIN_PATH }, Access::Granted)
}
