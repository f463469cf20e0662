//! Service endpoint configuration. Each backend has a hard-coded default base
//! URL that the environment (through CLI flags with `env` fallbacks) may
//! override. Blank overrides are ignored. Configuration values are public; do
//! not store secrets here.

use super::errors::AppError;
use std::{env, fmt, path::PathBuf};
use url::Url;

pub const DEFAULT_AUTH_API_URL: &str = "https://putevod-app.ru/auth/api/v1";
pub const DEFAULT_LIBRARY_API_URL: &str = "https://putevod-app.ru/library/api/v1";
pub const DEFAULT_EXTERNAL_API_URL: &str = "https://putevod-app.ru/external/api/v1";
pub const DEFAULT_PLANNER_API_URL: &str = "https://putevod-app.ru/planner/api/v1";

/// Directory under `$HOME` holding the persisted session.
pub const SESSION_DIR: &str = ".putevod-admin";
pub const SESSION_FILE: &str = "session.json";

/// Backend service a request is addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Service {
    Auth,
    Library,
    Planner,
    External,
}

impl Service {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Library => "library",
            Self::Planner => "planner",
            Self::External => "external",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base URLs of the four backend services.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceEndpoints {
    pub auth: String,
    pub library: String,
    pub planner: String,
    pub external: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            auth: DEFAULT_AUTH_API_URL.to_string(),
            library: DEFAULT_LIBRARY_API_URL.to_string(),
            planner: DEFAULT_PLANNER_API_URL.to_string(),
            external: DEFAULT_EXTERNAL_API_URL.to_string(),
        }
    }
}

/// Optional per-service overrides, typically read from CLI flags or env.
#[derive(Clone, Debug, Default)]
pub struct EndpointOverrides {
    pub auth: Option<String>,
    pub library: Option<String>,
    pub planner: Option<String>,
    pub external: Option<String>,
}

impl ServiceEndpoints {
    /// Builds endpoints from the defaults with validated overrides applied.
    ///
    /// # Errors
    /// Returns `AppError::Config` if an override is not an absolute http(s) URL.
    pub fn with_overrides(overrides: EndpointOverrides) -> Result<Self, AppError> {
        let mut endpoints = Self::default();
        apply_override(&mut endpoints.auth, overrides.auth, Service::Auth)?;
        apply_override(&mut endpoints.library, overrides.library, Service::Library)?;
        apply_override(&mut endpoints.planner, overrides.planner, Service::Planner)?;
        apply_override(&mut endpoints.external, overrides.external, Service::External)?;
        Ok(endpoints)
    }

    /// Same base URL for every service, used against a single mock or gateway.
    #[must_use]
    pub fn uniform(base_url: &str) -> Self {
        let base = base_url.trim().trim_end_matches('/').to_string();
        Self {
            auth: base.clone(),
            library: base.clone(),
            planner: base.clone(),
            external: base,
        }
    }

    #[must_use]
    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Auth => &self.auth,
            Service::Library => &self.library,
            Service::Planner => &self.planner,
            Service::External => &self.external,
        }
    }
}

fn apply_override(
    target: &mut String,
    value: Option<String>,
    service: Service,
) -> Result<(), AppError> {
    let Some(value) = value.as_deref().and_then(normalize_value) else {
        return Ok(());
    };

    let parsed = Url::parse(&value)
        .map_err(|err| AppError::Config(format!("Invalid {service} API URL '{value}': {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "Invalid {service} API URL '{value}': unsupported scheme {}",
            parsed.scheme()
        )));
    }

    *target = value.trim_end_matches('/').to_string();
    Ok(())
}

/// Trims a configured value and rejects blanks.
#[must_use]
pub fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Default session file: `$HOME/.putevod-admin/session.json`, or the working
/// directory when no home is set.
#[must_use]
pub fn default_session_file() -> PathBuf {
    let base = env::var("HOME")
        .ok()
        .and_then(|home| normalize_value(&home))
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    base.join(SESSION_DIR).join(SESSION_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://putevod-app.ru "),
            Some("https://putevod-app.ru".to_string())
        );
    }

    #[test]
    fn with_overrides_ignores_empty_values() {
        let overrides = EndpointOverrides {
            auth: Some(String::new()),
            library: Some("  ".to_string()),
            planner: None,
            external: None,
        };

        let endpoints = ServiceEndpoints::with_overrides(overrides).unwrap();
        assert_eq!(endpoints, ServiceEndpoints::default());
        assert_eq!(endpoints.base_url(Service::Auth), DEFAULT_AUTH_API_URL);
        assert_eq!(endpoints.base_url(Service::Planner), DEFAULT_PLANNER_API_URL);
    }

    #[test]
    fn with_overrides_overwrites_and_trims_trailing_slash() {
        let overrides = EndpointOverrides {
            auth: Some("http://localhost:8081/auth/api/v1/".to_string()),
            library: Some("http://localhost:8082/library/api/v1".to_string()),
            planner: None,
            external: Some(" https://ext.example/api/v1 ".to_string()),
        };

        let endpoints = ServiceEndpoints::with_overrides(overrides).unwrap();
        assert_eq!(endpoints.auth, "http://localhost:8081/auth/api/v1");
        assert_eq!(endpoints.library, "http://localhost:8082/library/api/v1");
        assert_eq!(endpoints.planner, DEFAULT_PLANNER_API_URL);
        assert_eq!(endpoints.external, "https://ext.example/api/v1");
    }

    #[test]
    fn with_overrides_rejects_invalid_urls() {
        let overrides = EndpointOverrides {
            library: Some("not a url".to_string()),
            ..EndpointOverrides::default()
        };
        let err = ServiceEndpoints::with_overrides(overrides).unwrap_err();
        assert!(err.to_string().contains("Invalid library API URL"));

        let overrides = EndpointOverrides {
            auth: Some("ftp://putevod-app.ru/auth".to_string()),
            ..EndpointOverrides::default()
        };
        let err = ServiceEndpoints::with_overrides(overrides).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme ftp"));
    }

    #[test]
    fn uniform_points_every_service_at_one_base() {
        let endpoints = ServiceEndpoints::uniform("http://127.0.0.1:9000/");
        for service in [
            Service::Auth,
            Service::Library,
            Service::Planner,
            Service::External,
        ] {
            assert_eq!(endpoints.base_url(service), "http://127.0.0.1:9000");
        }
    }

    #[test]
    fn default_session_file_uses_home() {
        temp_env::with_var("HOME", Some("/home/moderator"), || {
            assert_eq!(
                default_session_file(),
                PathBuf::from("/home/moderator/.putevod-admin/session.json")
            );
        });
        temp_env::with_var("HOME", None::<&str>, || {
            assert_eq!(
                default_session_file(),
                PathBuf::from("./.putevod-admin/session.json")
            );
        });
    }
}
