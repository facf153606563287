// --- File: crates/advisor_booking/src/feedback.rs ---

/// Outcome message a manager hands to its caller instead of rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Feedback::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Feedback::Error(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(message) | Feedback::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}
