// --- File: crates/services/advisor_web/src/views/home.rs ---
use advisor_common::models::UserProfile;
use axum::response::Html;

use super::layout::{page, APP_TITLE};

const FEATURES: [(&str, &str); 3] = [
    (
        "Smart Scheduling",
        "Easily manage your availability and let clients book meetings at their convenience.",
    ),
    (
        "Custom Booking Links",
        "Create personalized booking links with custom forms and meeting durations.",
    ),
    (
        "CRM Integration",
        "Seamlessly integrate with HubSpot and Google Calendar for better client management.",
    ),
];

pub fn render(profile: Option<&UserProfile>) -> Html<String> {
    let features: String = FEATURES
        .iter()
        .map(|(title, description)| {
            format!(
                "<div class=\"card\" style=\"text-align:center\"><h2>{}</h2><p class=\"muted\">{}</p></div>",
                title, description
            )
        })
        .collect();

    let body = format!(
        "<section style=\"background:#1976d2;color:#fff;padding:64px 24px;margin:-24px -24px 48px;text-align:center\">\
         <h1>Schedule Smarter, Not Harder</h1>\
         <p>Streamline your client meetings with our intelligent scheduling platform. \
         Connect your calendars, create custom booking links, and manage your client \
         relationships all in one place.</p>\
         <a class=\"btn btn-outline\" href=\"/login\">Get Started</a></section>\
         <div class=\"grid\">{}</div>",
        features
    );

    page(APP_TITLE, profile, &[], &body)
}
