// --- File: crates/services/advisor_web/src/handlers/mod.rs ---
pub mod dashboard;
pub mod home;
pub mod login;
pub mod schedule;
