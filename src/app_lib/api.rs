//! HTTP gateway for the four backend services. Every request is a single
//! round trip: no retry, no backoff. Feature clients use these helpers so the
//! bearer header, JSON encoding and error normalization stay consistent.
//! Tokens are attached here and nowhere else; they must never be logged.

use super::{
    config::{Service, ServiceEndpoints},
    errors::AppError,
};
use crate::APP_USER_AGENT;
use reqwest::{header::CONTENT_TYPE, Client, Method, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Shared HTTP client bound to the configured service endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    endpoints: ServiceEndpoints,
}

impl ApiClient {
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(endpoints: ServiceEndpoints) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self { http, endpoints })
    }

    #[must_use]
    pub const fn endpoints(&self) -> &ServiceEndpoints {
        &self.endpoints
    }

    /// Binds the client to the bearer token current at call time.
    #[must_use]
    pub fn with_token(&self, token: Option<SecretString>) -> Gateway<'_> {
        Gateway {
            client: self,
            token,
        }
    }
}

/// A request helper carrying the bearer token for one call or view load.
pub struct Gateway<'a> {
    client: &'a ApiClient,
    token: Option<SecretString>,
}

impl Gateway<'_> {
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fetches JSON with optional query parameters.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure, non-success status, or an undecodable body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .send::<()>(Method::GET, service, path, query, None)
            .await?;
        handle_json_response(response).await
    }

    /// Posts a JSON body and parses a JSON response.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure, non-success status, or an undecodable body.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .send(Method::POST, service, path, &[], Some(body))
            .await?;
        handle_json_response(response).await
    }

    /// Posts a JSON body and ignores the response body.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure or non-success status.
    pub async fn post_json_empty<B: Serialize>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<(), AppError> {
        let response = self
            .send(Method::POST, service, path, &[], Some(body))
            .await?;
        handle_empty_response(response).await
    }

    /// Issues a body-less `PUT` command.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure or non-success status.
    pub async fn put_empty(&self, service: Service, path: &str) -> Result<(), AppError> {
        let response = self
            .send::<()>(Method::PUT, service, path, &[], None)
            .await?;
        handle_empty_response(response).await
    }

    /// Issues a `DELETE` command.
    ///
    /// # Errors
    /// Returns an `AppError` on transport failure or non-success status.
    pub async fn delete_empty(&self, service: Service, path: &str) -> Result<(), AppError> {
        let response = self
            .send::<()>(Method::DELETE, service, path, &[], None)
            .await?;
        handle_empty_response(response).await
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        service: Service,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, AppError> {
        let url = build_url_with_base(self.client.endpoints.base_url(service), path);
        let span = info_span!(
            "api.request",
            http.method = %method,
            service = %service,
            path = %path
        );

        let mut builder = self
            .client
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            builder = builder.query(query);
        }

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        if let Some(body) = body {
            let payload = serde_json::to_string(body).map_err(|err| {
                AppError::Serialization(format!("Failed to encode request: {err}"))
            })?;
            builder = builder.body(payload);
        }

        let response = builder
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;

        debug!(status = response.status().as_u16(), "{} responded", service);

        Ok(response)
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into user-facing `AppError` variants.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else if err.is_timeout() {
        AppError::Network("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and normalizes HTTP errors.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(error_from_response(response).await)
    }
}

/// Accepts any success body, including an empty one.
async fn handle_empty_response(response: Response) -> Result<(), AppError> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(error_from_response(response).await)
    }
}

async fn error_from_response(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: error_message(status, &body),
    }
}

/// Extracts the server's `message` field, falling back to a status-coded text.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|json| json.get("message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map_or_else(
            || format!("Request failed: {status}"),
            |message| message.chars().take(MAX_ERROR_CHARS).collect(),
        )
}
