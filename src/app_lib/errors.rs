use thiserror::Error;

/// Errors surfaced to views and commands. `Http` displays the server-provided
/// message as-is so it can be shown inline.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Not signed in. Run `putevod-admin login` first.")]
    Unauthenticated,
}

impl AppError {
    /// HTTP status of a rejected request, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server rejected the request itself (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|status| (400..500).contains(&status))
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn http_error_displays_server_message() {
        let err = AppError::Http {
            status: 403,
            message: "Access denied".to_string(),
        };
        assert_eq!(err.to_string(), "Access denied");
        assert_eq!(err.status(), Some(403));
        assert!(err.is_client_error());
    }

    #[test]
    fn server_errors_are_not_client_errors() {
        let err = AppError::Http {
            status: 502,
            message: "Request failed: 502".to_string(),
        };
        assert!(!err.is_client_error());
        assert!(!AppError::Network("down".to_string()).is_client_error());
        assert_eq!(AppError::Parse("bad".to_string()).status(), None);
    }
}
