// --- File: crates/advisor_api/src/lib.rs ---
// Declare modules within this crate
pub mod accounts;
pub mod calendar;
pub mod client;
pub mod error;
pub mod guard;
#[cfg(test)]
mod guard_test;
pub mod scheduler;
pub mod scheduling;
pub mod session;

pub use accounts::AccountProvider;
pub use client::ApiClient;
pub use error::ApiError;
pub use guard::{check_session, GuardOutcome, LOGIN_PATH};
pub use scheduler::{Resource, ResourceKey, ResourceScheduler};
pub use session::SessionContext;
