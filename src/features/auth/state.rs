//! Session context for the console. It is created once per invocation, checks
//! the stored session on [`SessionContext::init`], and is torn down on logout.
//! Only the cached user record is held in memory; tokens are read from the
//! store when a gateway is requested and are never logged.

use crate::{
    app_lib::{ApiClient, AppError, Gateway},
    features::auth::{
        client,
        storage::{KeyValueStore, REFRESH_TOKEN_KEY, SESSION_KEYS, TOKEN_KEY, USER_KEY},
        token::{self, TokenError},
        types::User,
    },
};
use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

/// Why a stored session was discarded during the startup check.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionFault {
    #[error("stored session is incomplete")]
    Partial,
    #[error("stored user record is unreadable")]
    CorruptUser,
    #[error("stored access token is unreadable: {0}")]
    CorruptToken(TokenError),
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
    #[error("session storage is unreadable: {0}")]
    Storage(String),
}

/// Outcome of the startup check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Authenticated(User),
    /// Nothing was stored.
    Unauthenticated,
    /// Something was stored but could not be used; it has been cleared.
    Invalid(SessionFault),
}

impl SessionStatus {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

struct StoredSession {
    access_token: String,
    refresh_token: String,
    user: User,
}

/// Auth session state shared by the guard and the views.
pub struct SessionContext<S> {
    store: S,
    api: ApiClient,
    user: Option<User>,
    initialized: bool,
}

impl<S: KeyValueStore> SessionContext<S> {
    #[must_use]
    pub fn new(store: S, api: ApiClient) -> Self {
        Self {
            store,
            api,
            user: None,
            initialized: false,
        }
    }

    /// Checks the stored session: decode the access token's expiry, refresh it
    /// once if it has passed, and clear every key on any failure. Never errors.
    #[instrument(skip(self))]
    pub async fn init(&mut self) -> SessionStatus {
        let status = match self.load_stored() {
            Ok(None) => SessionStatus::Unauthenticated,
            Ok(Some(stored)) => self.validate(stored).await,
            Err(fault) => SessionStatus::Invalid(fault),
        };

        match &status {
            SessionStatus::Authenticated(user) => {
                debug!("session restored for user {}", user.id);
                self.user = Some(user.clone());
            }
            SessionStatus::Unauthenticated => self.user = None,
            SessionStatus::Invalid(fault) => {
                warn!("Discarding stored session: {fault}");
                self.clear();
            }
        }

        self.initialized = true;
        status
    }

    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Gateway carrying the access token currently in storage, if any.
    #[must_use]
    pub fn gateway(&self) -> Gateway<'_> {
        let token = self
            .store
            .get(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|value| !value.is_empty())
            .map(SecretString::from);
        self.api.with_token(token)
    }

    /// Exchanges credentials for a session and persists it.
    ///
    /// Returns `Ok(false)` when the auth service rejects the credentials (4xx)
    /// or answers without an access token; nothing is persisted then.
    ///
    /// # Errors
    /// Transport failures, server errors and undecodable responses are returned
    /// so the login view can display them. A storage failure is also an error.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, username: &str, password: &SecretString) -> Result<bool, AppError> {
        let result = {
            let gateway = self.gateway();
            client::login(&gateway, username, password).await
        };

        let response = match result {
            Ok(response) => response,
            Err(err) if err.is_client_error() => {
                info!("login rejected: {err}");
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        let Some(access_token) = response.access_token.filter(|token| !token.is_empty()) else {
            info!("login response carried no access token");
            return Ok(false);
        };
        let refresh_token = response.refresh_token.unwrap_or_default();
        let user = User::from(response.user);
        let user_json = serde_json::to_string(&user)
            .map_err(|err| AppError::Serialization(format!("Failed to encode user: {err}")))?;

        self.store.set_many(&[
            (TOKEN_KEY, access_token.as_str()),
            (REFRESH_TOKEN_KEY, refresh_token.as_str()),
            (USER_KEY, user_json.as_str()),
        ])?;

        info!("signed in as {}", user.username);
        self.user = Some(user);
        self.initialized = true;
        Ok(true)
    }

    /// Best-effort server-side invalidation followed by an unconditional local clear.
    #[instrument(skip(self))]
    pub async fn logout(&mut self) {
        let refresh_token = self
            .store
            .get(REFRESH_TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|value| !value.is_empty());

        if let Some(refresh_token) = refresh_token {
            let gateway = self.gateway();
            if let Err(err) = client::logout(&gateway, &refresh_token).await {
                warn!("Server-side logout failed, clearing local session anyway: {err}");
            }
        }

        self.clear();
    }

    /// Removes all three keys together and drops the in-memory user.
    pub fn clear(&mut self) {
        if let Err(err) = self.store.remove_many(&SESSION_KEYS) {
            error!("Failed to clear stored session: {err}");
        }
        self.user = None;
    }

    fn load_stored(&self) -> Result<Option<StoredSession>, SessionFault> {
        let read = |key: &str| -> Result<Option<String>, SessionFault> {
            self.store
                .get(key)
                .map(|value| value.filter(|v| !v.is_empty()))
                .map_err(|err| SessionFault::Storage(err.to_string()))
        };

        let access_token = read(TOKEN_KEY)?;
        let refresh_token = read(REFRESH_TOKEN_KEY)?;
        let user = read(USER_KEY)?;

        match (access_token, refresh_token, user) {
            (None, None, None) => Ok(None),
            (Some(access_token), Some(refresh_token), Some(user)) => {
                let user: User =
                    serde_json::from_str(&user).map_err(|_| SessionFault::CorruptUser)?;
                Ok(Some(StoredSession {
                    access_token,
                    refresh_token,
                    user,
                }))
            }
            _ => Err(SessionFault::Partial),
        }
    }

    async fn validate(&mut self, stored: StoredSession) -> SessionStatus {
        match token::is_expired(&stored.access_token) {
            Ok(false) => SessionStatus::Authenticated(stored.user),
            Ok(true) => self.refresh(stored).await,
            Err(err) => SessionStatus::Invalid(SessionFault::CorruptToken(err)),
        }
    }

    async fn refresh(&mut self, stored: StoredSession) -> SessionStatus {
        debug!("access token expired, refreshing");

        let result = {
            let gateway = self.gateway();
            client::refresh(&gateway, &stored.refresh_token).await
        };

        let pair = match result {
            Ok(pair) if !pair.access_token.is_empty() => pair,
            Ok(_) => {
                return SessionStatus::Invalid(SessionFault::RefreshFailed(
                    "empty access token".to_string(),
                ))
            }
            Err(err) => return SessionStatus::Invalid(SessionFault::RefreshFailed(err.to_string())),
        };

        if let Err(err) = self.store.set_many(&[
            (TOKEN_KEY, pair.access_token.as_str()),
            (REFRESH_TOKEN_KEY, pair.refresh_token.as_str()),
        ]) {
            return SessionStatus::Invalid(SessionFault::Storage(err.to_string()));
        }

        SessionStatus::Authenticated(stored.user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        app_lib::ServiceEndpoints,
        features::auth::{storage::MemoryStore, token::test_tokens},
    };
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    fn context(base_url: &str, store: MemoryStore) -> SessionContext<MemoryStore> {
        let api = ApiClient::new(ServiceEndpoints::uniform(base_url)).unwrap();
        SessionContext::new(store, api)
    }

    fn stored(access_token: &str, refresh_token: &str) -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .set_many(&[
                (TOKEN_KEY, access_token),
                (REFRESH_TOKEN_KEY, refresh_token),
                (USER_KEY, r#"{"id":"1","username":"admin@putevod-app.ru"}"#),
            ])
            .unwrap();
        store
    }

    fn assert_cleared(ctx: &SessionContext<MemoryStore>) {
        for key in SESSION_KEYS {
            assert_eq!(ctx.store().get(key).unwrap(), None, "{key} should be cleared");
        }
        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn init_without_session_is_unauthenticated() {
        let mut ctx = context("http://127.0.0.1:1", MemoryStore::new());
        assert!(!ctx.is_initialized());
        assert_eq!(ctx.init().await, SessionStatus::Unauthenticated);
        assert!(ctx.is_initialized());
        assert!(!ctx.is_authenticated());
    }

    #[tokio::test]
    async fn init_with_valid_token_skips_refresh() {
        let token = test_tokens::fresh();
        let mut ctx = context("http://127.0.0.1:1", stored(&token, "refresh-1"));

        let status = ctx.init().await;
        assert_eq!(
            status,
            SessionStatus::Authenticated(User {
                id: "1".to_string(),
                username: "admin@putevod-app.ru".to_string(),
            })
        );
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.store().get(TOKEN_KEY).unwrap(), Some(token));
    }

    #[tokio::test]
    async fn init_refreshes_expired_token() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        let renewed = test_tokens::fresh();
        Mock::given(method("POST"))
            .and(path("/refresh"))
            .and(body_json(json!({ "refreshToken": "refresh-1" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": renewed,
                "refreshToken": "refresh-2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut ctx = context(&server.uri(), stored(&test_tokens::expired(), "refresh-1"));
        let status = ctx.init().await;

        assert!(status.is_authenticated());
        assert_eq!(ctx.user().unwrap().username, "admin@putevod-app.ru");
        assert_eq!(ctx.store().get(TOKEN_KEY).unwrap(), Some(renewed));
        assert_eq!(
            ctx.store().get(REFRESH_TOKEN_KEY).unwrap().as_deref(),
            Some("refresh-2")
        );
    }

    #[tokio::test]
    async fn init_clears_session_when_refresh_fails() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/refresh"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Refresh expired" })),
            )
            .mount(&server)
            .await;

        let mut ctx = context(&server.uri(), stored(&test_tokens::expired(), "refresh-1"));
        let status = ctx.init().await;

        assert_eq!(
            status,
            SessionStatus::Invalid(SessionFault::RefreshFailed("Refresh expired".to_string()))
        );
        assert_cleared(&ctx);
    }

    #[tokio::test]
    async fn init_clears_corrupt_token() {
        let mut ctx = context("http://127.0.0.1:1", stored("garbage", "refresh-1"));
        let status = ctx.init().await;

        assert!(matches!(
            status,
            SessionStatus::Invalid(SessionFault::CorruptToken(TokenError::Malformed))
        ));
        assert!(!status.is_authenticated());
        assert_cleared(&ctx);
    }

    #[tokio::test]
    async fn init_clears_partial_session() {
        let mut store = MemoryStore::new();
        store.set_many(&[(TOKEN_KEY, "a.b.c")]).unwrap();
        let mut ctx = context("http://127.0.0.1:1", store);

        assert_eq!(
            ctx.init().await,
            SessionStatus::Invalid(SessionFault::Partial)
        );
        assert_cleared(&ctx);
    }

    #[tokio::test]
    async fn init_treats_empty_refresh_token_as_partial() {
        let mut ctx = context("http://127.0.0.1:1", stored(&test_tokens::fresh(), ""));
        assert_eq!(
            ctx.init().await,
            SessionStatus::Invalid(SessionFault::Partial)
        );
        assert_cleared(&ctx);
    }

    #[tokio::test]
    async fn init_clears_unreadable_user() {
        let mut store = stored(&test_tokens::fresh(), "refresh-1");
        store.set_many(&[(USER_KEY, "{not json")]).unwrap();
        let mut ctx = context("http://127.0.0.1:1", store);

        assert_eq!(
            ctx.init().await,
            SessionStatus::Invalid(SessionFault::CorruptUser)
        );
        assert_cleared(&ctx);
    }

    #[tokio::test]
    async fn login_persists_token_triple() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        let access = test_tokens::fresh();
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({
                "email": "admin@putevod-app.ru",
                "password": "correct horse",
                "deviceId": "admin site"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": access,
                "refreshToken": "refresh-1",
                "user": { "id": 1, "email": "admin@putevod-app.ru" }
            })))
            .mount(&server)
            .await;

        let mut ctx = context(&server.uri(), MemoryStore::new());
        let password = SecretString::from("correct horse".to_string());
        assert!(ctx.login("admin@putevod-app.ru", &password).await.unwrap());

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.store().get(TOKEN_KEY).unwrap(), Some(access));
        assert_eq!(
            ctx.store().get(REFRESH_TOKEN_KEY).unwrap().as_deref(),
            Some("refresh-1")
        );
        let user: User = serde_json::from_str(&ctx.store().get(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.username, "admin@putevod-app.ru");
    }

    #[tokio::test]
    async fn login_with_invalid_credentials_returns_false() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
            )
            .mount(&server)
            .await;

        let mut ctx = context(&server.uri(), MemoryStore::new());
        let password = SecretString::from("wrong".to_string());
        assert!(!ctx.login("admin@putevod-app.ru", &password).await.unwrap());

        assert!(!ctx.is_authenticated());
        assert!(ctx.store().is_empty());
    }

    #[tokio::test]
    async fn login_without_access_token_returns_false() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": { "id": 1, "email": "admin@putevod-app.ru" }
            })))
            .mount(&server)
            .await;

        let mut ctx = context(&server.uri(), MemoryStore::new());
        let password = SecretString::from("pw".to_string());
        assert!(!ctx.login("admin@putevod-app.ru", &password).await.unwrap());
        assert!(ctx.store().is_empty());
    }

    #[tokio::test]
    async fn login_surfaces_server_and_network_errors() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let password = SecretString::from("pw".to_string());

        let mut ctx = context(&server.uri(), MemoryStore::new());
        let err = ctx.login("admin", &password).await.unwrap_err();
        assert_eq!(err.to_string(), "Request failed: 503");

        let mut offline = context("http://127.0.0.1:1", MemoryStore::new());
        let err = offline.login("admin", &password).await.unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
        assert!(offline.store().is_empty());
    }

    #[tokio::test]
    async fn logout_invalidates_refresh_token_and_clears() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .and(body_json(json!({ "refreshToken": "refresh-1" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut ctx = context(&server.uri(), stored(&test_tokens::fresh(), "refresh-1"));
        assert!(ctx.init().await.is_authenticated());

        ctx.logout().await;
        assert_cleared(&ctx);
    }

    #[tokio::test]
    async fn logout_clears_even_when_server_call_fails() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut ctx = context(&server.uri(), stored(&test_tokens::fresh(), "refresh-1"));
        assert!(ctx.init().await.is_authenticated());

        ctx.logout().await;
        assert_cleared(&ctx);

        let mut offline = context("http://127.0.0.1:1", stored(&test_tokens::fresh(), "r"));
        offline.init().await;
        offline.logout().await;
        assert_cleared(&offline);
    }

    #[tokio::test]
    async fn gateway_carries_stored_token_only() {
        let ctx = context("http://127.0.0.1:1", MemoryStore::new());
        assert!(!ctx.gateway().has_token());

        let ctx = context("http://127.0.0.1:1", stored(&test_tokens::fresh(), "r"));
        assert!(ctx.gateway().has_token());
    }
}
