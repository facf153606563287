// --- File: crates/advisor_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Backend resource models
pub mod services; // Session storage abstraction
#[cfg(test)]
mod services_test;

// Re-export error types and utilities for easier access
pub use error::{
    auth_error, config_error, conflict, external_service_error, internal_error, not_found,
    validation_error, AdvisorError, Context, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, escape_html, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init_from_config, init_with_level, log_error};

pub use services::{MemorySessionStore, SessionStore, PROFILE_KEY, TOKEN_KEY};
