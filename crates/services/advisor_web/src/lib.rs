// --- File: crates/services/advisor_web/src/lib.rs ---
// Declare modules within this crate
pub mod app_state;
pub mod browser;
pub mod error;
pub mod guard;
pub mod handlers;
pub mod routes;
pub mod views;

pub use app_state::AppState;
pub use error::WebError;
pub use routes::app;
