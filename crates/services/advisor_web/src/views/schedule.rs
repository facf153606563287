// --- File: crates/services/advisor_web/src/views/schedule.rs ---
use advisor_booking::calendar::{is_selected, MonthGrid, SlotsView, WEEKDAY_HEADERS};
use advisor_booking::format;
use advisor_booking::wizard::STEP_LABELS;
use advisor_booking::{BookingWizard, Feedback, WizardStep};
use advisor_common::escape_html;
use advisor_common::models::{TimeSlot, UserProfile};
use axum::response::Html;
use chrono::NaiveDate;
use chrono_tz::Tz;

use super::layout::{alert, page};

pub const LINK_LOAD_FAILED: &str = "Failed to load scheduling link";
pub const BOOKED_TITLE: &str = "Meeting Scheduled Successfully!";

pub struct ScheduleView<'a> {
    pub wizard: &'a BookingWizard,
    pub grid: &'a MonthGrid,
    pub date: Option<NaiveDate>,
    pub slots: &'a SlotsView,
    pub flash: &'a [Feedback],
    pub profile: Option<&'a UserProfile>,
    pub tz: Tz,
}

/// Shown when the link itself cannot be loaded.
pub fn link_error(message: &str, profile: Option<&UserProfile>) -> Html<String> {
    let body = format!(
        "<div class=\"card\" style=\"text-align:center\">{}</div>",
        alert(&Feedback::error(message))
    );
    page("Schedule", profile, &[], &body)
}

pub fn render(view: &ScheduleView<'_>) -> Html<String> {
    let link = view.wizard.link();
    let step = view.wizard.step();

    if step == WizardStep::Booked {
        let body = format!(
            "<div class=\"card\" style=\"text-align:center\"><h2>{}</h2>\
             <p class=\"muted\">You will receive a confirmation email shortly.</p></div>",
            BOOKED_TITLE
        );
        return page(&link.title, view.profile, view.flash, &body);
    }

    let content = match step {
        WizardStep::SelectTime => select_time(view),
        WizardStep::EnterDetails => enter_details(view.wizard),
        WizardStep::Confirm | WizardStep::Booked => confirm(view.wizard, view.tz),
    };

    let body = format!(
        "<h1 style=\"text-align:center\">{title}</h1>\
         <p class=\"muted\" style=\"text-align:center\">Schedule Duration: {duration} minutes</p>\
         <div class=\"card\">{stepper}{content}</div>",
        title = escape_html(&link.title),
        duration = link.duration,
        stepper = stepper(step),
    );
    page(&link.title, view.profile, view.flash, &body)
}

fn stepper(step: WizardStep) -> String {
    let items: String = STEP_LABELS
        .iter()
        .enumerate()
        .map(|(index, label)| {
            if index == step.index() {
                format!("<li aria-current=\"step\"><strong>{}</strong></li>", label)
            } else {
                format!("<li class=\"muted\">{}</li>", label)
            }
        })
        .collect();
    format!("<ol style=\"display:flex;gap:32px;justify-content:center\">{}</ol>", items)
}

fn select_time(view: &ScheduleView<'_>) -> String {
    let link_id = escape_html(&view.wizard.link().id);
    let selected = view.wizard.slot();

    let mut html = String::from(
        "<h2>Select a Date and Time</h2><p class=\"muted\">Choose from available time slots</p>\
         <div style=\"display:flex;gap:32px;flex-wrap:wrap\">",
    );
    html.push_str(&month_grid(view.grid));

    html.push_str("<div>");
    if let Some(date) = view.date {
        html.push_str(&format!(
            "<h3>Available Times for {}</h3>",
            date.format("%A, %B %-d, %Y")
        ));
    }
    match view.slots {
        SlotsView::Failed(message) => html.push_str(&alert(&Feedback::error(message.as_str()))),
        SlotsView::Ready(slots) if !slots.is_empty() => {
            html.push_str("<div class=\"grid\">");
            for slot in slots {
                html.push_str(&slot_button(&link_id, slot, selected, view.date, view.tz));
            }
            html.push_str("</div>");
        }
        other => {
            if let Some(notice) = other.notice() {
                html.push_str(&format!("<p class=\"muted\">{}</p>", escape_html(notice)));
            }
        }
    }
    html.push_str("</div></div>");

    let disabled = if selected.is_some() { "" } else { " disabled" };
    html.push_str(&format!(
        "<p style=\"text-align:center\"><button class=\"btn btn-outline\" type=\"button\" disabled>Back</button> \
         <form method=\"post\" action=\"/schedule/{link_id}/next\" style=\"display:inline\">\
         <button class=\"btn\" type=\"submit\"{disabled}>Next</button></form></p>"
    ));
    html
}

fn month_grid(grid: &MonthGrid) -> String {
    let month_param = |date: NaiveDate| date.format("%Y-%m").to_string();

    let previous = match grid.previous_month() {
        Some(month) if grid.can_go_back() => format!(
            "<a href=\"?month={}\" aria-label=\"previous month\">&lsaquo;</a>",
            month_param(month)
        ),
        _ => "<span class=\"muted\">&lsaquo;</span>".to_string(),
    };
    let next = match grid.next_month() {
        Some(month) => format!(
            "<a href=\"?month={}\" aria-label=\"next month\">&rsaquo;</a>",
            month_param(month)
        ),
        None => String::new(),
    };

    let headers: String = WEEKDAY_HEADERS
        .iter()
        .map(|day| format!("<th>{}</th>", day))
        .collect();

    let mut rows = String::new();
    for week in &grid.weeks {
        rows.push_str("<tr>");
        for cell in week {
            match cell {
                None => rows.push_str("<td></td>"),
                Some(cell) => {
                    let day = cell.date.format("%-d");
                    let class = if cell.selected { " class=\"selected\"" } else { "" };
                    let today = if cell.today { " aria-current=\"date\"" } else { "" };
                    if cell.selectable {
                        rows.push_str(&format!(
                            "<td{class}{today}><a href=\"?date={}&amp;month={}\">{day}</a></td>",
                            cell.date.format("%Y-%m-%d"),
                            month_param(cell.date),
                        ));
                    } else {
                        rows.push_str(&format!(
                            "<td{class}{today}><span class=\"muted\" aria-disabled=\"true\">{day}</span></td>"
                        ));
                    }
                }
            }
        }
        rows.push_str("</tr>");
    }

    format!(
        "<div><p>{previous} <strong>{}</strong> {next}</p>\
         <table><thead><tr>{headers}</tr></thead><tbody>{rows}</tbody></table></div>",
        grid.title()
    )
}

fn slot_button(
    link_id: &str,
    slot: &TimeSlot,
    selected: Option<&TimeSlot>,
    date: Option<NaiveDate>,
    tz: Tz,
) -> String {
    let class = if is_selected(slot, selected) {
        "btn selected"
    } else {
        "btn btn-outline"
    };
    let date = date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    format!(
        "<form method=\"post\" action=\"/schedule/{link_id}/slot\">\
         <input type=\"hidden\" name=\"start\" value=\"{start}\">\
         <input type=\"hidden\" name=\"end\" value=\"{end}\">\
         <input type=\"hidden\" name=\"date\" value=\"{date}\">\
         <button class=\"{class}\" type=\"submit\">{label}</button></form>",
        start = slot.start.to_rfc3339(),
        end = slot.end.to_rfc3339(),
        label = format::time(slot.start, tz),
    )
}

fn enter_details(wizard: &BookingWizard) -> String {
    let link_id = escape_html(&wizard.link().id);
    let details = wizard.details();

    let questions: String = details
        .answers
        .iter()
        .enumerate()
        .map(|(index, (question, answer))| {
            format!(
                "<p><label>{}<br><textarea name=\"answer_{}\" rows=\"3\" required>{}</textarea></label></p>",
                escape_html(question),
                index,
                escape_html(answer)
            )
        })
        .collect();

    format!(
        "<h2>Enter Your Details</h2><p class=\"muted\">Please provide your information</p>\
         <form method=\"post\" action=\"/schedule/{link_id}/next\">\
         <p><label>Email<br><input type=\"email\" name=\"email\" value=\"{email}\" required></label></p>\
         <p><label>LinkedIn URL<br><input name=\"linkedin_url\" value=\"{linkedin}\" required></label><br>\
         <small class=\"muted\">Please provide your LinkedIn profile URL</small></p>\
         {questions}\
         <p style=\"text-align:center\">\
         <button class=\"btn btn-outline\" type=\"submit\" formaction=\"/schedule/{link_id}/back\" formnovalidate>Back</button> \
         <button class=\"btn\" type=\"submit\">Next</button></p></form>",
        email = escape_html(&details.email),
        linkedin = escape_html(&details.linkedin_url),
    )
}

fn confirm(wizard: &BookingWizard, tz: Tz) -> String {
    let link = wizard.link();
    let link_id = escape_html(&link.id);
    let details = wizard.details();

    let mut html = String::from(
        "<h2>Confirmation</h2><p class=\"muted\">Review your booking details</p>",
    );
    if let Some(error) = wizard.submit_error() {
        html.push_str(&alert(&Feedback::error(error)));
    }

    if let Some(slot) = wizard.slot() {
        html.push_str(&format!(
            "<div class=\"card\"><h3>Meeting Details</h3><p>Date: {}</p><p>Time: {} - {}</p>\
             <p>Duration: {} minutes</p></div>",
            format::long_date(slot.start, tz),
            format::time(slot.start, tz),
            format::time(slot.end, tz),
            link.duration
        ));
    }

    html.push_str(&format!(
        "<div class=\"card\"><h3>Your Information</h3><p>Email: {}</p><p>LinkedIn: {}</p></div>",
        escape_html(&details.email),
        escape_html(&details.linkedin_url)
    ));

    let pairs = wizard.confirmation_pairs();
    if !pairs.is_empty() {
        html.push_str("<div class=\"card\"><h3>Your Answers</h3><dl>");
        for (question, answer) in pairs {
            html.push_str(&format!(
                "<dt class=\"muted\">{}</dt><dd>{}</dd>",
                escape_html(question),
                escape_html(answer)
            ));
        }
        html.push_str("</dl></div>");
    }

    let (disabled, finish_label) = if wizard.is_submitting() {
        (" disabled", "Submitting...")
    } else {
        ("", "Finish")
    };
    html.push_str(&format!(
        "<p style=\"text-align:center\">\
         <form method=\"post\" action=\"/schedule/{link_id}/back\" style=\"display:inline\">\
         <button class=\"btn btn-outline\" type=\"submit\"{disabled}>Back</button></form> \
         <form method=\"post\" action=\"/schedule/{link_id}/submit\" style=\"display:inline\">\
         <button class=\"btn\" type=\"submit\"{disabled}>{finish_label}</button></form></p>"
    ));
    html
}
