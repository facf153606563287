// --- File: crates/services/advisor_web/src/guard.rs ---
use std::sync::Arc;

use advisor_api::{check_session, GuardOutcome, LOGIN_PATH};
use axum::{
    extract::{Extension, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use crate::browser::BrowserState;

/// Lets the request through only for a signed-in browser; everyone else is sent to
/// the login page.
pub async fn require_session(
    Extension(browser): Extension<Arc<BrowserState>>,
    request: Request,
    next: Next,
) -> Response {
    match check_session(&browser.session(), Utc::now()) {
        GuardOutcome::Allow { .. } => next.run(request).await,
        GuardOutcome::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
    }
}
