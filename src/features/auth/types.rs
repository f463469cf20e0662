//! Request and response types for the auth service. Login and refresh payloads
//! carry credentials and tokens, so they deliberately do not implement `Debug`
//! and must never be logged.

use crate::app_lib::ids;
use serde::{Deserialize, Serialize};

/// Device label the auth service records for console sessions.
pub const DEVICE_ID: &str = "admin site";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub device_id: &'a str,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// Account record as returned by the auth service; `email` is the login name.
#[derive(Clone, Debug, Deserialize)]
pub struct AuthUser {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,
    pub email: String,
}

/// Body of both the refresh and the logout calls.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Cached user record persisted next to the tokens. Contains no secrets.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(deserialize_with = "ids::deserialize")]
    pub id: String,
    pub username: String,
}

impl From<AuthUser> for User {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            username: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_request_uses_wire_names() {
        let request = LoginRequest {
            email: "admin@putevod-app.ru",
            password: "hunter2",
            device_id: DEVICE_ID,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "email": "admin@putevod-app.ru",
                "password": "hunter2",
                "deviceId": "admin site"
            })
        );
    }

    #[test]
    fn login_response_maps_email_to_username() {
        let response: LoginResponse = serde_json::from_value(json!({
            "accessToken": "a.b.c",
            "refreshToken": "r-1",
            "user": { "id": 12, "email": "admin@putevod-app.ru" }
        }))
        .unwrap();
        assert_eq!(response.access_token.as_deref(), Some("a.b.c"));

        let user = User::from(response.user);
        assert_eq!(user.id, "12");
        assert_eq!(user.username, "admin@putevod-app.ru");
    }

    #[test]
    fn login_response_tolerates_missing_refresh_token() {
        let response: LoginResponse = serde_json::from_value(json!({
            "accessToken": "a.b.c",
            "user": { "id": "u-1", "email": "admin" }
        }))
        .unwrap();
        assert!(response.refresh_token.is_none());
    }

    #[test]
    fn stored_user_round_trips_through_json() {
        let user = User {
            id: "7".to_string(),
            username: "moderator".to_string(),
        };
        let encoded = serde_json::to_string(&user).unwrap();
        assert_eq!(encoded, r#"{"id":"7","username":"moderator"}"#);
        let decoded: User = serde_json::from_str(r#"{"id":7,"username":"moderator"}"#).unwrap();
        assert_eq!(decoded, user);
    }
}
