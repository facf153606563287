// --- File: crates/advisor_api/src/error.rs ---
use advisor_common::{
    auth_error, conflict, external_service_error, internal_error, AdvisorError, HttpStatusCode,
};
use thiserror::Error;

/// Errors produced while talking to the REST backend.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure, including timeouts
    #[error("Backend request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The backend rejected the session (or the stored token has expired).
    /// The session has already been cleared when this is returned.
    #[error("Session is not authorized")]
    Unauthorized { navigate_to: Option<String> },

    /// Any other non-success status, with the backend's `error` message if it sent one
    #[error(
        "Backend returned an error: {} (Status: {status_code})",
        .message.as_deref().unwrap_or("no message")
    )]
    Status {
        status_code: u16,
        message: Option<String>,
    },

    /// Error parsing a backend response
    #[error("Failed to parse backend response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A newer request for the same resource cancelled this one
    #[error("Request superseded by a newer one")]
    Superseded,

    #[error("Authentication token not found")]
    MissingToken,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    /// Message to show the user: the backend's own message when present, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Where the browser should go after this error, if anywhere.
    pub fn navigate_to(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { navigate_to } => navigate_to.as_deref(),
            _ => None,
        }
    }
}

/// Convert ApiError to AdvisorError
impl From<ApiError> for AdvisorError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::RequestError(e) => AdvisorError::from(e),
            ApiError::Unauthorized { .. } => auth_error("Session is not authorized"),
            ApiError::Status {
                status_code,
                message,
            } => external_service_error(
                "Scheduling backend",
                format!(
                    "Status: {}, Message: {}",
                    status_code,
                    message.unwrap_or_default()
                ),
            ),
            ApiError::ParseError(e) => {
                AdvisorError::ParseError(format!("Backend response parse error: {}", e))
            }
            ApiError::Superseded => conflict("Request superseded by a newer one"),
            ApiError::MissingToken => auth_error("Authentication token not found"),
            ApiError::InternalError(msg) => internal_error(msg),
        }
    }
}

impl HttpStatusCode for ApiError {
    fn status_code(&self) -> u16 {
        match self {
            ApiError::RequestError(e) if e.is_timeout() => 504,
            ApiError::RequestError(_) => 502,
            ApiError::Unauthorized { .. } => 401,
            ApiError::Status { status_code, .. } => *status_code,
            ApiError::ParseError(_) => 502,
            ApiError::Superseded => 409,
            ApiError::MissingToken => 401,
            ApiError::InternalError(_) => 500,
        }
    }
}
