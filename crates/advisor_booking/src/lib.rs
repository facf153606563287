// --- File: crates/advisor_booking/src/lib.rs ---
// Declare modules within this crate
pub mod accounts;
#[cfg(test)]
mod accounts_test;
pub mod calendar;
pub mod events;
#[cfg(test)]
mod events_test;
pub mod feedback;
pub mod format;
pub mod links;
pub mod windows;
#[cfg(test)]
mod windows_proptest;
pub mod wizard;
#[cfg(test)]
mod wizard_proptest;
#[cfg(test)]
mod wizard_test;

pub use feedback::Feedback;
pub use wizard::{BookingWizard, InviteeDetails, WizardError, WizardState, WizardStep};
