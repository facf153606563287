// --- File: crates/services/advisor_web/src/views/layout.rs ---
use advisor_booking::Feedback;
use advisor_common::escape_html;
use advisor_common::models::UserProfile;
use axum::response::Html;

pub const APP_TITLE: &str = "Advisor Scheduling";

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#f5f5f5;color:#222}\
header{display:flex;align-items:center;justify-content:space-between;padding:12px 24px;background:#1976d2;color:#fff}\
header a,header button{color:#fff;background:none;border:0;font:inherit;cursor:pointer;text-decoration:none}\
main{padding:24px;max-width:1100px;margin:0 auto}\
.avatar{width:32px;height:32px;border-radius:50%;vertical-align:middle;margin-right:8px}\
.avatar-initial{display:inline-flex;align-items:center;justify-content:center;background:#fff;color:#1976d2}\
.alert{padding:12px 16px;border-radius:4px;margin-bottom:16px}\
.alert-success{background:#e8f5e9;color:#1b5e20}\
.alert-error{background:#fdecea;color:#b71c1c}\
.muted{color:#666}\
.card{background:#fff;border-radius:6px;padding:16px;margin-bottom:16px;box-shadow:0 1px 3px rgba(0,0,0,.12)}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:16px}\
.btn{display:inline-block;padding:8px 16px;border-radius:4px;border:0;background:#1976d2;color:#fff;cursor:pointer;text-decoration:none;font:inherit}\
.btn-outline{background:#fff;color:#1976d2;border:1px solid #1976d2}\
.btn:disabled{opacity:.5;cursor:default}\
.active-dot{display:inline-block;width:8px;height:8px;border-radius:50%;background:#2e7d32;margin-left:6px}\
.selected{outline:3px solid #1976d2}";

/// Full page with the application bar, one-shot feedback messages and `body`.
pub fn page(
    title: &str,
    profile: Option<&UserProfile>,
    flash: &[Feedback],
    body: &str,
) -> Html<String> {
    let mut alerts = String::new();
    for feedback in flash {
        alerts.push_str(&alert(feedback));
    }

    Html(format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title><style>{STYLE}</style></head><body>\
         <header><a href=\"/\"><strong>{APP_TITLE}</strong></a>{account}</header>\
         <main>{alerts}{body}</main></body></html>",
        title = escape_html(title),
        account = account_menu(profile),
    ))
}

pub fn alert(feedback: &Feedback) -> String {
    let class = if feedback.is_error() {
        "alert-error"
    } else {
        "alert-success"
    };
    format!(
        "<div class=\"alert {}\" role=\"alert\">{}</div>",
        class,
        escape_html(feedback.message())
    )
}

fn account_menu(profile: Option<&UserProfile>) -> String {
    let Some(profile) = profile else {
        return "<a href=\"/login\">Login</a>".to_string();
    };

    let avatar = if profile.profile_picture.is_empty() {
        format!(
            "<span class=\"avatar avatar-initial\">{}</span>",
            escape_html(&profile.initial())
        )
    } else {
        format!(
            "<img class=\"avatar\" src=\"{}\" alt=\"{}\">",
            escape_html(&profile.profile_picture),
            escape_html(&profile.name)
        )
    };

    format!(
        "<div>{avatar}<span>{name}</span>\
         <form method=\"post\" action=\"/logout\" style=\"display:inline;margin-left:16px\">\
         <button type=\"submit\">Logout</button></form></div>",
        name = escape_html(profile.display_name()),
    )
}
