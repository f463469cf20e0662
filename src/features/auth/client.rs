//! Client wrappers for the auth service endpoints. Passwords and refresh tokens
//! pass through here on their way to the wire and must never be logged.

use crate::{
    app_lib::{AppError, Gateway, Service},
    features::auth::types::{
        LoginRequest, LoginResponse, RefreshTokenRequest, TokenPair, DEVICE_ID,
    },
};
use secrecy::{ExposeSecret, SecretString};

/// Exchanges a username and password for a token triple.
pub async fn login(
    gateway: &Gateway<'_>,
    username: &str,
    password: &SecretString,
) -> Result<LoginResponse, AppError> {
    let request = LoginRequest {
        email: username,
        password: password.expose_secret(),
        device_id: DEVICE_ID,
    };
    gateway.post_json(Service::Auth, "/login", &request).await
}

/// Trades a refresh token for a new access/refresh pair.
pub async fn refresh(gateway: &Gateway<'_>, refresh_token: &str) -> Result<TokenPair, AppError> {
    let request = RefreshTokenRequest { refresh_token };
    gateway.post_json(Service::Auth, "/refresh", &request).await
}

/// Invalidates a refresh token on the server.
pub async fn logout(gateway: &Gateway<'_>, refresh_token: &str) -> Result<(), AppError> {
    let request = RefreshTokenRequest { refresh_token };
    gateway
        .post_json_empty(Service::Auth, "/logout", &request)
        .await
}
