// --- File: crates/advisor_api/src/guard.rs ---
use crate::session::SessionContext;
use advisor_common::models::UserProfile;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Page that starts authentication.
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// Render the page. The profile is `None` only when the stored entry is unreadable.
    Allow { profile: Option<UserProfile> },
    RedirectToLogin,
}

/// Decides whether a protected page may render for this session.
///
/// Requires both a token and a profile. An expired JWT clears the session.
pub fn check_session(session: &SessionContext, now: DateTime<Utc>) -> GuardOutcome {
    if !session.is_present() {
        debug!("Guard: no session, redirecting to {}", LOGIN_PATH);
        return GuardOutcome::RedirectToLogin;
    }
    if session.is_expired(now) {
        debug!("Guard: token expired, redirecting to {}", LOGIN_PATH);
        session.clear();
        return GuardOutcome::RedirectToLogin;
    }
    GuardOutcome::Allow {
        profile: session.profile(),
    }
}
