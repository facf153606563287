// --- File: crates/services/advisor_web/src/views/mod.rs ---
//! HTML rendering. Views take already-fetched data and never call the backend.
pub mod dashboard;
pub mod home;
pub mod layout;
pub mod login;
pub mod schedule;
