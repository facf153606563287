// --- File: crates/services/advisor_web/src/views/login.rs ---
use advisor_booking::Feedback;
use advisor_common::escape_html;
use axum::response::Html;

use super::layout::{alert, page};

/// Sign-in page. `google_login_url` starts the backend's Google flow.
pub fn render(google_login_url: &str, error: Option<&str>) -> Html<String> {
    let error = error
        .map(|message| alert(&Feedback::error(message)))
        .unwrap_or_default();

    let body = format!(
        "<div class=\"card\" style=\"max-width:480px;margin:64px auto;text-align:center\">\
         <h1>Welcome Back</h1>\
         <p class=\"muted\">Sign in to manage your scheduling links and client meetings</p>\
         {error}\
         <a class=\"btn\" href=\"{url}\">Continue with Google</a></div>",
        url = escape_html(google_login_url),
    );

    page("Login", None, &[], &body)
}
