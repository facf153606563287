// --- File: crates/services/advisor_web/src/views/dashboard.rs ---
use std::collections::HashSet;

use advisor_booking::accounts::{hubspot_details, ConnectedAccounts, EMPTY_MESSAGE};
use advisor_booking::events::{time_range, truncate_description, EventsView};
use advisor_booking::format;
use advisor_booking::links::{
    share_url, LinkForm, LinkWithMeetings, COPIED_MESSAGE, DURATION_STEP, MIN_DURATION,
    NO_MEETINGS_MESSAGE,
};
use advisor_booking::windows::{hours_label, weekday_name, SchedulingWindows, WindowForm, MAX_HOUR, WEEKDAYS};
use advisor_booking::Feedback;
use advisor_common::escape_html;
use advisor_common::models::{Meeting, UserProfile};
use axum::response::Html;
use chrono_tz::Tz;

use super::layout::{alert, page};

const SCRIPT: &str = r#"<script>
document.querySelectorAll('[data-copy]').forEach(function (button) {
  button.addEventListener('click', function () {
    navigator.clipboard.writeText(button.dataset.copy).then(function () {
      var notice = document.getElementById('copy-notice');
      notice.hidden = false;
      setTimeout(function () { notice.hidden = true; }, 3000);
    });
  });
});
(function () {
  var form = document.getElementById('window-form');
  if (!form) { return; }
  var start = form.querySelector('[name=start_hour]');
  var end = form.querySelector('[name=end_hour]');
  var submit = form.querySelector('button[type=submit]');
  function check() { submit.disabled = Number(start.value) >= Number(end.value); }
  start.addEventListener('input', check);
  end.addEventListener('input', check);
  check();
})();
</script>"#;

/// Everything the dashboard shows, fetched before rendering.
pub struct DashboardView<'a> {
    pub profile: Option<&'a UserProfile>,
    pub flash: &'a [Feedback],
    pub accounts: &'a ConnectedAccounts,
    pub windows: &'a SchedulingWindows,
    pub window_draft: &'a WindowForm,
    pub events: &'a EventsView,
    /// Loaded links, or the message to show when the list failed.
    pub links: &'a Result<Vec<LinkWithMeetings>, String>,
    pub link_draft: &'a LinkForm,
    pub expanded: &'a HashSet<String>,
    /// Origin of this front-end for share URLs.
    pub origin: &'a str,
    pub tz: Tz,
}

pub fn render(view: &DashboardView<'_>) -> Html<String> {
    let body = format!(
        "<h1>Dashboard</h1>{}{}{}{}{}",
        accounts_section(view.accounts),
        windows_section(view.windows, view.window_draft),
        events_section(view.events, view.tz),
        links_section(view),
        SCRIPT
    );
    page("Dashboard", view.profile, view.flash, &body)
}

fn accounts_section(accounts: &ConnectedAccounts) -> String {
    let mut html = String::from(
        "<section id=\"accounts\"><h2>Connected Accounts</h2>\
         <p><a class=\"btn\" href=\"/dashboard/accounts/google/connect\">Connect Google</a> \
         <a class=\"btn\" href=\"/dashboard/accounts/hubspot/connect\">Connect HubSpot</a></p>\
         <div class=\"card\">",
    );

    if accounts.is_empty() {
        html.push_str(&format!("<p class=\"muted\">{}</p>", EMPTY_MESSAGE));
    }
    if !accounts.google.is_empty() {
        html.push_str("<h3>Google Accounts</h3><ul>");
        for account in &accounts.google {
            html.push_str(&format!(
                "<li><strong>{}</strong> <span class=\"muted\">{}</span> {}</li>",
                escape_html(&account.name),
                escape_html(&account.email),
                disconnect_form("google", &account.id)
            ));
        }
        html.push_str("</ul>");
    }
    if !accounts.hubspot.is_empty() {
        html.push_str("<h3>HubSpot Accounts</h3><ul>");
        for account in &accounts.hubspot {
            html.push_str(&format!(
                "<li><strong>{}</strong> <span class=\"muted\">{}</span> {}</li>",
                escape_html(&account.hub_name),
                escape_html(&hubspot_details(account)),
                disconnect_form("hubspot", &account.id)
            ));
        }
        html.push_str("</ul>");
    }

    html.push_str("</div></section>");
    html
}

fn disconnect_form(provider: &str, id: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/dashboard/accounts/{}/{}/disconnect\" style=\"display:inline\">\
         <button class=\"btn btn-outline\" type=\"submit\" aria-label=\"disconnect\">Disconnect</button></form>",
        provider,
        escape_html(id)
    )
}

fn windows_section(windows: &SchedulingWindows, draft: &WindowForm) -> String {
    let mut html = String::from("<section id=\"windows\"><h2>Scheduling Windows</h2>");
    if let Some(error) = &windows.error {
        html.push_str(&alert(&Feedback::error(error.as_str())));
    }

    html.push_str("<div class=\"grid\">");
    for window in &windows.windows {
        let active = if window.is_active {
            "<span class=\"active-dot\" title=\"Active\"></span>"
        } else {
            ""
        };
        html.push_str(&format!(
            "<div class=\"card\"><strong>{}</strong>{}<p class=\"muted\">{}</p>\
             <form method=\"post\" action=\"/dashboard/windows/{}/delete\">\
             <button class=\"btn btn-outline\" type=\"submit\">Delete</button></form></div>",
            weekday_name(window.weekday),
            active,
            hours_label(window),
            escape_html(&window.id)
        ));
    }
    html.push_str("</div>");

    let weekday_options: String = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let selected = if index == usize::from(draft.weekday) {
                " selected"
            } else {
                ""
            };
            format!("<option value=\"{}\"{}>{}</option>", index, selected, day)
        })
        .collect();
    let disabled = if draft.can_submit() { "" } else { " disabled" };

    html.push_str(&format!(
        "<details class=\"card\"><summary>Add Window</summary>\
         <form id=\"window-form\" method=\"post\" action=\"/dashboard/windows\">\
         <h3>Add Scheduling Window</h3>\
         <label>Weekday <select name=\"weekday\">{weekday_options}</select></label> \
         <label>Start Hour <input type=\"number\" name=\"start_hour\" min=\"0\" max=\"{MAX_HOUR}\" value=\"{start}\"></label> \
         <label>End Hour <input type=\"number\" name=\"end_hour\" min=\"0\" max=\"{MAX_HOUR}\" value=\"{end}\"></label> \
         <button class=\"btn\" type=\"submit\"{disabled}>Add</button></form></details></section>",
        start = draft.start_hour,
        end = draft.end_hour,
    ));
    html
}

fn events_section(events: &EventsView, tz: Tz) -> String {
    let mut html = String::from("<section id=\"events\"><div class=\"card\"><h2>Upcoming Events</h2>");

    if let EventsView::Failed(message) = events {
        html.push_str(&alert(&Feedback::error(message.as_str())));
    } else if let Some(notice) = events.notice() {
        html.push_str(&format!("<p class=\"muted\">{}</p>", escape_html(notice)));
    }

    if let EventsView::Ready(events) = events {
        html.push_str("<div class=\"grid\">");
        for event in events {
            html.push_str(&format!(
                "<div class=\"card\"><strong>{}</strong><p>{}</p>",
                escape_html(&event.summary),
                escape_html(&time_range(event, tz))
            ));
            if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
                html.push_str(&format!("<p class=\"muted\">Location: {}</p>", escape_html(location)));
            }
            if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
                html.push_str(&format!(
                    "<p class=\"muted\">{}</p>",
                    escape_html(&truncate_description(description))
                ));
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }

    html.push_str("</div></section>");
    html
}

fn links_section(view: &DashboardView<'_>) -> String {
    let mut html = String::from(
        "<section id=\"links\"><h2>Scheduling Links</h2>",
    );
    html.push_str(&format!(
        "<div id=\"copy-notice\" class=\"alert alert-success\" hidden>{}</div>",
        COPIED_MESSAGE
    ));

    match view.links {
        Err(message) => html.push_str(&alert(&Feedback::error(message.as_str()))),
        Ok(links) => {
            html.push_str("<div class=\"grid\">");
            for entry in links {
                html.push_str(&link_card(entry, view));
            }
            html.push_str("</div>");
        }
    }

    html.push_str(&link_form(view.link_draft));
    html.push_str("</section>");
    html
}

fn link_card(entry: &LinkWithMeetings, view: &DashboardView<'_>) -> String {
    let link = &entry.link;
    let id = escape_html(&link.id);
    let mut html = format!(
        "<div class=\"card\" id=\"link-{id}\"><h3>{}</h3>\
         <p class=\"muted\">Duration: {} minutes</p>",
        escape_html(&link.title),
        link.duration
    );
    if let Some(max_uses) = link.max_uses {
        html.push_str(&format!("<p class=\"muted\">Max uses: {}</p>", max_uses));
    }
    if let Some(expires_at) = link.expires_at {
        html.push_str(&format!(
            "<p class=\"muted\">Expires: {}</p>",
            format::date(expires_at, view.tz)
        ));
    }
    html.push_str(&format!(
        "<p class=\"muted\">Max days in advance: {}</p>",
        link.max_days_in_advance
    ));

    let url = escape_html(&share_url(view.origin, &link.id));
    html.push_str(&format!(
        "<p><a href=\"{url}\">{url}</a></p>\
         <button class=\"btn btn-outline\" type=\"button\" data-copy=\"{url}\">Copy Link</button>"
    ));

    let expanded = view.expanded.contains(&link.id);
    html.push_str(&format!(
        "<form method=\"post\" action=\"/dashboard/links/{id}/toggle\">\
         <button class=\"btn btn-outline\" type=\"submit\" aria-expanded=\"{expanded}\">Meetings ({})</button></form>",
        entry.meetings.len()
    ));

    if expanded {
        if entry.meetings.is_empty() {
            html.push_str(&format!("<p class=\"muted\">{}</p>", NO_MEETINGS_MESSAGE));
        } else {
            html.push_str("<ul>");
            for meeting in &entry.meetings {
                html.push_str(&meeting_item(meeting, view.tz));
            }
            html.push_str("</ul>");
        }
    }

    html.push_str("</div>");
    html
}

fn meeting_item(meeting: &Meeting, tz: Tz) -> String {
    let start = format::parse_instant(&meeting.start_time)
        .map(|start| format::date_time(start, tz))
        .unwrap_or_else(|| meeting.start_time.clone());

    let mut html = format!(
        "<li><strong>{}</strong><br><span class=\"muted\">{}</span>",
        escape_html(&meeting.client_email),
        escape_html(&start)
    );
    if !meeting.linkedin_url.is_empty() {
        html.push_str(&format!(
            "<br><span class=\"muted\">LinkedIn: {}</span>",
            escape_html(&meeting.linkedin_url)
        ));
    }
    for note in meeting.note_values() {
        html.push_str(&format!(
            "<br><span class=\"muted\">Notes: {}</span>",
            escape_html(&note)
        ));
    }
    html.push_str("</li>");
    html
}

fn link_form(draft: &LinkForm) -> String {
    let questions: String = draft
        .custom_questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            format!(
                "<li>{} <button class=\"btn btn-outline\" type=\"submit\" name=\"action\" \
                 value=\"remove_question:{}\" aria-label=\"delete\">Remove</button></li>",
                escape_html(question),
                index
            )
        })
        .collect();

    let max_uses = draft.max_uses.map(|uses| uses.to_string()).unwrap_or_default();
    let expires_at = draft
        .expires_at
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let open = if draft == &LinkForm::default() { "" } else { " open" };

    format!(
        "<details class=\"card\"{open}><summary>Create Link</summary>\
         <form method=\"post\" action=\"/dashboard/links\">\
         <h3>Create Scheduling Link</h3>\
         <p><label>Title <input name=\"title\" value=\"{title}\"></label></p>\
         <p><label>Duration (minutes) <input type=\"number\" name=\"duration\" min=\"{MIN_DURATION}\" step=\"{DURATION_STEP}\" value=\"{duration}\"></label></p>\
         <p><label>Max Uses <input type=\"number\" name=\"max_uses\" min=\"1\" value=\"{max_uses}\"></label></p>\
         <p><label>Expires At <input type=\"date\" name=\"expires_at\" value=\"{expires_at}\"></label></p>\
         <p><label>Max Days in Advance <input type=\"number\" name=\"max_days_in_advance\" min=\"1\" value=\"{max_days}\"></label></p>\
         <h4>Custom Questions</h4><ul>{questions}</ul>\
         <p><label>New Question <input name=\"new_question\"></label> \
         <button class=\"btn btn-outline\" type=\"submit\" name=\"action\" value=\"add_question\">Add</button></p>\
         <p><button class=\"btn\" type=\"submit\" name=\"action\" value=\"create\">Create</button></p>\
         </form></details>",
        title = escape_html(&draft.title),
        duration = draft.duration,
        max_days = draft.max_days_in_advance,
    )
}
