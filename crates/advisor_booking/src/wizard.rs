// --- File: crates/advisor_booking/src/wizard.rs ---
//! Invitee booking flow for one scheduling link.
//!
//! The flow is a tagged union with explicit transitions:
//! `SelectTime -> EnterDetails -> Confirm -> Booked`. Each transition checks its
//! own precondition, so an invalid state cannot be reached by skipping steps.

use advisor_api::{ApiClient, ApiError};
use advisor_common::models::{NewMeeting, SchedulingLink, TimeSlot};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{info, warn};

pub const SUBMIT_FALLBACK: &str = "Failed to create meeting. Please try again.";
pub const STEP_LABELS: [&str; 3] = ["Select Date & Time", "Enter Details", "Confirmation"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Please select a time slot")]
    NoSlotSelected,

    #[error("Email is required")]
    MissingEmail,

    #[error("LinkedIn URL is required")]
    MissingProfileUrl,

    #[error("Please answer: {0}")]
    UnansweredQuestion(String),

    /// Transition requested from a step that does not offer it
    #[error("Action not available in step '{0}'")]
    InvalidStep(&'static str),

    /// The backend refused or failed the booking; the message is user-facing
    #[error("{0}")]
    SubmitFailed(String),

    /// A booking request for this flow is still waiting for the backend
    #[error("Your booking is already being submitted")]
    SubmitInProgress,

    /// The session was rejected while submitting
    #[error("Session is not authorized")]
    Unauthorized,
}

/// What the invitee typed in the details step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteeDetails {
    pub email: String,
    pub linkedin_url: String,
    /// `(question, answer)` in link order.
    pub answers: Vec<(String, String)>,
}

impl InviteeDetails {
    /// Empty details with an empty answer for every question of `link`.
    pub fn for_link(link: &SchedulingLink) -> Self {
        Self {
            email: String::new(),
            linkedin_url: String::new(),
            answers: link
                .custom_questions
                .iter()
                .map(|question| (question.clone(), String::new()))
                .collect(),
        }
    }

    pub fn answer(&self, question: &str) -> &str {
        self.answers
            .iter()
            .find(|(q, _)| q == question)
            .map(|(_, answer)| answer.as_str())
            .unwrap_or("")
    }

    /// Replaces the answers positionally; missing positions become empty answers.
    pub fn set_answers<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values = values.into_iter();
        for (_, answer) in self.answers.iter_mut() {
            *answer = values.next().map(Into::into).unwrap_or_default();
        }
    }

    fn validate(&self, questions: &[String]) -> Result<(), WizardError> {
        if self.email.trim().is_empty() {
            return Err(WizardError::MissingEmail);
        }
        if self.linkedin_url.trim().is_empty() {
            return Err(WizardError::MissingProfileUrl);
        }
        for question in questions {
            if self.answer(question).trim().is_empty() {
                return Err(WizardError::UnansweredQuestion(question.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectTime,
    EnterDetails,
    Confirm,
    Booked,
}

impl WizardStep {
    pub fn label(self) -> &'static str {
        match self {
            WizardStep::SelectTime => STEP_LABELS[0],
            WizardStep::EnterDetails => STEP_LABELS[1],
            WizardStep::Confirm | WizardStep::Booked => STEP_LABELS[2],
        }
    }

    /// Zero-based position in the stepper.
    pub fn index(self) -> usize {
        match self {
            WizardStep::SelectTime => 0,
            WizardStep::EnterDetails => 1,
            WizardStep::Confirm | WizardStep::Booked => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    SelectTime {
        selected: Option<TimeSlot>,
        details: InviteeDetails,
    },
    EnterDetails {
        slot: TimeSlot,
        details: InviteeDetails,
    },
    Confirm {
        slot: TimeSlot,
        details: InviteeDetails,
        error: Option<String>,
        /// Set while the booking request is out; the step is frozen meanwhile.
        submitting: bool,
    },
    Booked {
        slot: TimeSlot,
        details: InviteeDetails,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingWizard {
    link: SchedulingLink,
    state: WizardState,
}

impl BookingWizard {
    pub fn new(link: SchedulingLink) -> Self {
        let details = InviteeDetails::for_link(&link);
        Self {
            link,
            state: WizardState::SelectTime {
                selected: None,
                details,
            },
        }
    }

    pub fn link(&self) -> &SchedulingLink {
        &self.link
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        match self.state {
            WizardState::SelectTime { .. } => WizardStep::SelectTime,
            WizardState::EnterDetails { .. } => WizardStep::EnterDetails,
            WizardState::Confirm { .. } => WizardStep::Confirm,
            WizardState::Booked { .. } => WizardStep::Booked,
        }
    }

    pub fn details(&self) -> &InviteeDetails {
        match &self.state {
            WizardState::SelectTime { details, .. }
            | WizardState::EnterDetails { details, .. }
            | WizardState::Confirm { details, .. }
            | WizardState::Booked { details, .. } => details,
        }
    }

    /// Currently chosen slot, in any step.
    pub fn slot(&self) -> Option<&TimeSlot> {
        match &self.state {
            WizardState::SelectTime { selected, .. } => selected.as_ref(),
            WizardState::EnterDetails { slot, .. }
            | WizardState::Confirm { slot, .. }
            | WizardState::Booked { slot, .. } => Some(slot),
        }
    }

    /// Last submission error shown on the confirmation step.
    pub fn submit_error(&self) -> Option<&str> {
        match &self.state {
            WizardState::Confirm { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, WizardState::Confirm { submitting: true, .. })
    }

    /// Picks `slot`, replacing any earlier pick. Only while choosing a time.
    pub fn select_slot(&mut self, slot: TimeSlot) -> Result<(), WizardError> {
        let step = self.step();
        match &mut self.state {
            WizardState::SelectTime { selected, .. } => {
                *selected = Some(slot);
                Ok(())
            }
            _ => Err(WizardError::InvalidStep(step.label())),
        }
    }

    /// Replaces the details while in the details step.
    pub fn update_details(&mut self, new_details: InviteeDetails) -> Result<(), WizardError> {
        let step = self.step();
        match &mut self.state {
            WizardState::EnterDetails { details, .. } => {
                *details = new_details;
                Ok(())
            }
            _ => Err(WizardError::InvalidStep(step.label())),
        }
    }

    /// Moves to the next step if the current one is complete.
    pub fn advance(&mut self) -> Result<(), WizardError> {
        let next = match &self.state {
            WizardState::SelectTime { selected, details } => {
                let slot = selected.ok_or(WizardError::NoSlotSelected)?;
                WizardState::EnterDetails {
                    slot,
                    details: details.clone(),
                }
            }
            WizardState::EnterDetails { slot, details } => {
                details.validate(&self.link.custom_questions)?;
                WizardState::Confirm {
                    slot: *slot,
                    details: details.clone(),
                    error: None,
                    submitting: false,
                }
            }
            WizardState::Confirm { .. } | WizardState::Booked { .. } => {
                return Err(WizardError::InvalidStep(self.step().label()))
            }
        };
        self.state = next;
        Ok(())
    }

    /// Goes one step back, keeping everything entered so far.
    /// Does nothing on the first step, during a submission or once booked.
    pub fn back(&mut self) {
        let previous = match &self.state {
            WizardState::Confirm {
                submitting: true, ..
            } => return,
            WizardState::EnterDetails { slot, details } => WizardState::SelectTime {
                selected: Some(*slot),
                details: details.clone(),
            },
            WizardState::Confirm { slot, details, .. } => WizardState::EnterDetails {
                slot: *slot,
                details: details.clone(),
            },
            WizardState::SelectTime { .. } | WizardState::Booked { .. } => return,
        };
        self.state = previous;
    }

    /// Question/answer pairs shown for review, one per link question, in order.
    pub fn confirmation_pairs(&self) -> Vec<(&str, &str)> {
        let details = self.details();
        self.link
            .custom_questions
            .iter()
            .map(|question| (question.as_str(), details.answer(question)))
            .collect()
    }

    /// Request body for the booking; only meaningful on the confirmation step.
    pub fn meeting_request(&self) -> Result<NewMeeting, WizardError> {
        match &self.state {
            WizardState::Confirm { slot, details, .. } => {
                let answers: BTreeMap<String, String> = self
                    .link
                    .custom_questions
                    .iter()
                    .map(|question| (question.clone(), details.answer(question).to_string()))
                    .collect();
                Ok(NewMeeting {
                    client_email: details.email.trim().to_string(),
                    linkedin_url: details.linkedin_url.trim().to_string(),
                    start_time: slot.start,
                    end_time: slot.end,
                    answers,
                })
            }
            _ => Err(WizardError::InvalidStep(self.step().label())),
        }
    }

    /// Marks the confirmation step as submitting and returns the request to send.
    /// Fails with [`WizardError::SubmitInProgress`] while an earlier submission is
    /// still out.
    pub fn begin_submit(&mut self) -> Result<NewMeeting, WizardError> {
        let request = self.meeting_request()?;
        let step = self.step();
        match &mut self.state {
            WizardState::Confirm {
                submitting: true, ..
            } => Err(WizardError::SubmitInProgress),
            WizardState::Confirm {
                error, submitting, ..
            } => {
                *submitting = true;
                *error = None;
                Ok(request)
            }
            _ => Err(WizardError::InvalidStep(step.label())),
        }
    }

    /// Applies the backend's answer to a submission started with
    /// [`BookingWizard::begin_submit`]. On failure the wizard stays on the
    /// confirmation step with the error recorded, so the invitee can try again.
    pub fn finish_submit(&mut self, outcome: Result<(), ApiError>) -> Result<(), WizardError> {
        match outcome {
            Ok(()) => {
                info!(
                    "Meeting booked on link {} for {}",
                    self.link.id,
                    self.details().email.trim()
                );
                if let WizardState::Confirm { slot, details, .. } = &self.state {
                    self.state = WizardState::Booked {
                        slot: *slot,
                        details: details.clone(),
                    };
                }
                Ok(())
            }
            Err(err) => {
                warn!("Booking on link {} failed: {}", self.link.id, err);
                let message = err.message_or(SUBMIT_FALLBACK);
                if let WizardState::Confirm {
                    error, submitting, ..
                } = &mut self.state
                {
                    *error = Some(message.clone());
                    *submitting = false;
                }
                match err {
                    ApiError::Unauthorized { .. } => Err(WizardError::Unauthorized),
                    _ => Err(WizardError::SubmitFailed(message)),
                }
            }
        }
    }

    /// Books the meeting in one go.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<(), WizardError> {
        let request = self.begin_submit()?;
        let outcome = api.create_meeting(&self.link.id, &request).await;
        self.finish_submit(outcome)
    }
}
