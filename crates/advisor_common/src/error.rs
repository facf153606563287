// --- File: crates/advisor_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type shared by all Advisor crates.
///
/// Crates keep their own error enums and provide `From<CrateError> for AdvisorError`
/// so that anything can be rendered through one HTTP mapping.
#[derive(Error, Debug)]
pub enum AdvisorError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The session is missing, expired or was rejected by the backend
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The backend answered with a non-success status
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// A newer request for the same resource replaced this one
    #[error("Conflict: {0}")]
    ConflictError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Timeout: {0}")]
    TimeoutError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AdvisorError {
    fn status_code(&self) -> u16 {
        match self {
            AdvisorError::HttpError(_) => 502,
            AdvisorError::ParseError(_) => 502,
            AdvisorError::ConfigError(_) => 500,
            AdvisorError::AuthError(_) => 401,
            AdvisorError::ValidationError(_) => 400,
            AdvisorError::ExternalServiceError { .. } => 502,
            AdvisorError::ConflictError(_) => 409,
            AdvisorError::NotFoundError(_) => 404,
            AdvisorError::TimeoutError(_) => 504,
            AdvisorError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, AdvisorError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, AdvisorError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, AdvisorError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| AdvisorError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, AdvisorError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| AdvisorError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for AdvisorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdvisorError::TimeoutError(err.to_string())
        } else {
            AdvisorError::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        AdvisorError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> AdvisorError {
    AdvisorError::ConfigError(message.to_string())
}

pub fn auth_error<T: fmt::Display>(message: T) -> AdvisorError {
    AdvisorError::AuthError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> AdvisorError {
    AdvisorError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AdvisorError {
    AdvisorError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> AdvisorError {
    AdvisorError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> AdvisorError {
    AdvisorError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> AdvisorError {
    AdvisorError::InternalError(message.to_string())
}
