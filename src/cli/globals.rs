use crate::{
    app_lib::{config::default_session_file, ApiClient, ServiceEndpoints},
    features::auth::{require_auth, FileStore, SessionContext, SessionStatus},
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// Settings shared by every command: where the backends live and where the
/// session is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalArgs {
    pub endpoints: ServiceEndpoints,
    pub session_file: PathBuf,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(endpoints: ServiceEndpoints, session_file: Option<PathBuf>) -> Self {
        Self {
            endpoints,
            session_file: session_file.unwrap_or_else(default_session_file),
        }
    }

    /// Opens the stored session and runs the startup check.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or the session file cannot be set up.
    pub async fn open_session(&self) -> Result<(SessionContext<FileStore>, SessionStatus)> {
        let store = FileStore::open(&self.session_file).with_context(|| {
            format!("Failed to open session file {}", self.session_file.display())
        })?;
        let api = ApiClient::new(self.endpoints.clone())?;
        let mut session = SessionContext::new(store, api);
        let status = session.init().await;
        debug!("session status: {status:?}");
        Ok((session, status))
    }

    /// Like [`Self::open_session`], but only yields a signed-in session.
    ///
    /// # Errors
    /// Returns `AppError::Unauthenticated` when nobody is signed in.
    pub async fn authenticated_session(&self) -> Result<SessionContext<FileStore>> {
        let (session, _) = self.open_session().await?;
        require_auth(&session).into_user()?;
        Ok(session)
    }
}
