// --- File: crates/services/advisor_web/src/error.rs ---
use advisor_api::{ApiError, LOGIN_PATH};
use advisor_booking::WizardError;
use advisor_common::{not_found, validation_error, AdvisorError};
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors a page handler can end with.
#[derive(Error, Debug)]
pub enum WebError {
    /// The session was rejected; the browser is sent to the login page.
    #[error("Session is not authorized")]
    Unauthorized { navigate_to: Option<String> },

    #[error("Backend error: {0}")]
    Api(ApiError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid form: {0}")]
    BadRequest(String),
}

impl From<ApiError> for WebError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized { navigate_to } => WebError::Unauthorized { navigate_to },
            other => WebError::Api(other),
        }
    }
}

impl From<WizardError> for WebError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::Unauthorized => WebError::Unauthorized {
                navigate_to: Some(LOGIN_PATH.to_string()),
            },
            other => WebError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Unauthorized { navigate_to } => {
                let target = navigate_to.as_deref().unwrap_or(LOGIN_PATH);
                debug!("[Web] Unauthorized, redirecting to {}", target);
                Redirect::to(target).into_response()
            }
            WebError::Api(err) => {
                warn!("[Web] Backend error: {}", err);
                AdvisorError::from(err).into_response()
            }
            WebError::NotFound(what) => not_found(what).into_response(),
            WebError::BadRequest(message) => validation_error(message).into_response(),
        }
    }
}
