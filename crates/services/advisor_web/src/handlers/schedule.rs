// --- File: crates/services/advisor_web/src/handlers/schedule.rs ---
//! Public booking pages. The invitee's wizard lives in the browser state, keyed by
//! link id, and every step is a form post that redirects back to the page.

use std::collections::HashMap;
use std::sync::Arc;

use advisor_booking::calendar::{
    is_date_selectable, latest_bookable, load_slots, today_in, MonthGrid, SlotsView,
};
use advisor_api::ApiError;
use advisor_booking::format::parse_instant;
use advisor_booking::{BookingWizard, Feedback, WizardError, WizardStep};
use advisor_common::models::TimeSlot;
use axum::{
    extract::{Extension, Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::app_state::AppState;
use crate::browser::BrowserState;
use crate::error::WebError;
use crate::views::schedule::{link_error, render, ScheduleView, LINK_LOAD_FAILED};

fn page_path(link_id: &str) -> String {
    format!("/schedule/{}", link_id)
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ScheduleQuery {
    /// Selected day, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Month shown in the grid, `YYYY-MM`.
    pub month: Option<String>,
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
}

fn parse_month(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|raw| NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d").ok())
}

pub async fn schedule_page(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
    Path(link_id): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, WebError> {
    let api = state.api_for(&browser, &page_path(&link_id));
    let profile = browser.session().profile();

    let link = match api.get_link(&link_id).await {
        Ok(link) => link,
        Err(err) if err.is_unauthorized() => return Err(err.into()),
        Err(err) => {
            warn!("[Schedule] Error fetching scheduling link {}: {}", link_id, err);
            return Ok(link_error(LINK_LOAD_FAILED, profile.as_ref()).into_response());
        }
    };

    let (wizard, flash) = browser.with_ui(|ui| {
        let wizard = ui
            .wizards
            .entry(link_id.clone())
            .or_insert_with(|| BookingWizard::new(link.clone()));
        if wizard.link() != &link {
            debug!("[Schedule] Link {} changed, restarting booking", link_id);
            *wizard = BookingWizard::new(link.clone());
        }
        (wizard.clone(), std::mem::take(&mut ui.flash))
    });

    let today = today_in(state.tz, Utc::now());
    let latest = latest_bookable(today, link.max_days_in_advance);
    let date = parse_date(query.date.as_deref())
        .or_else(|| {
            wizard
                .slot()
                .map(|slot| slot.start.with_timezone(&state.tz).date_naive())
        })
        .filter(|date| is_date_selectable(*date, today, latest));
    let month = parse_month(query.month.as_deref())
        .or(date)
        .unwrap_or(today);
    let grid = MonthGrid::new(month, today, latest, date);

    let slots = if wizard.step() == WizardStep::SelectTime {
        let scope = browser.id().to_string();
        load_slots(&api, &state.scheduler, &scope, &link_id, date).await?
    } else {
        SlotsView::NoDate
    };

    Ok(render(&ScheduleView {
        wizard: &wizard,
        grid: &grid,
        date,
        slots: &slots,
        flash: &flash,
        profile: profile.as_ref(),
        tz: state.tz,
    })
    .into_response())
}

/// Applies `f` to the wizard of `link_id`. `None` when the browser has none.
fn with_wizard<T>(
    browser: &BrowserState,
    link_id: &str,
    f: impl FnOnce(&mut BookingWizard) -> T,
) -> Option<T> {
    browser.with_ui(|ui| ui.wizards.get_mut(link_id).map(f))
}

fn report(browser: &BrowserState, result: Option<Result<(), WizardError>>) {
    if let Some(Err(err)) = result {
        debug!("[Schedule] Step rejected: {}", err);
        browser.push_flash(Feedback::error(err.to_string()));
    }
}

#[derive(Deserialize, Debug)]
pub struct SlotInput {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub date: String,
}

pub async fn select_slot(
    Extension(browser): Extension<Arc<BrowserState>>,
    Path(link_id): Path<String>,
    Form(input): Form<SlotInput>,
) -> Result<Redirect, WebError> {
    let (Some(start), Some(end)) = (parse_instant(&input.start), parse_instant(&input.end)) else {
        return Err(WebError::BadRequest("unreadable time slot".to_string()));
    };

    let result = with_wizard(&browser, &link_id, |wizard| {
        wizard.select_slot(TimeSlot { start, end })
    });
    report(&browser, result);

    let target = match parse_date(Some(&input.date)) {
        Some(date) => format!("{}?date={}", page_path(&link_id), date.format("%Y-%m-%d")),
        None => page_path(&link_id),
    };
    Ok(Redirect::to(&target))
}

/// Copies posted detail fields onto the wizard while it is on the details step.
fn apply_details(wizard: &mut BookingWizard, fields: &HashMap<String, String>) -> Result<(), WizardError> {
    if wizard.step() != WizardStep::EnterDetails || !fields.contains_key("email") {
        return Ok(());
    }

    let mut details = wizard.details().clone();
    let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
    details.email = field("email");
    details.linkedin_url = field("linkedin_url");
    let count = details.answers.len();
    details.set_answers((0..count).map(|index| field(&format!("answer_{}", index))));
    wizard.update_details(details)
}

pub async fn next_step(
    Extension(browser): Extension<Arc<BrowserState>>,
    Path(link_id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Redirect {
    let result = with_wizard(&browser, &link_id, |wizard| {
        apply_details(wizard, &fields)?;
        wizard.advance()
    });
    report(&browser, result);
    Redirect::to(&page_path(&link_id))
}

pub async fn previous_step(
    Extension(browser): Extension<Arc<BrowserState>>,
    Path(link_id): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Redirect {
    let result = with_wizard(&browser, &link_id, |wizard| {
        let saved = apply_details(wizard, &fields);
        wizard.back();
        saved
    });
    report(&browser, result);
    Redirect::to(&page_path(&link_id))
}

/// Books the meeting. The wizard is marked as submitting before the request goes
/// out, so a repeated Finish from a double click or a second tab is a no-op. The
/// request runs as its own task and settles the wizard even if the browser stops
/// waiting. A failure keeps the wizard on the confirmation step, where the page
/// shows the server's message.
pub async fn submit(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
    Path(link_id): Path<String>,
) -> Result<Redirect, WebError> {
    let path = page_path(&link_id);
    let request = match with_wizard(&browser, &link_id, BookingWizard::begin_submit) {
        None => return Ok(Redirect::to(&path)),
        Some(Ok(request)) => request,
        Some(Err(WizardError::SubmitInProgress)) => {
            debug!("[Schedule] Booking on link {} already in flight", link_id);
            return Ok(Redirect::to(&path));
        }
        Some(Err(err)) => {
            browser.push_flash(Feedback::error(err.to_string()));
            return Ok(Redirect::to(&path));
        }
    };

    let api = state.api_for(&browser, &path);
    let booking = tokio::spawn({
        let browser = browser.clone();
        let link_id = link_id.clone();
        async move {
            let outcome = api.create_meeting(&link_id, &request).await;
            with_wizard(&browser, &link_id, |wizard| wizard.finish_submit(outcome))
        }
    });
    let result = booking
        .await
        .map_err(|e| ApiError::InternalError(format!("booking task failed: {}", e)))?;

    match result {
        None | Some(Ok(())) => Ok(Redirect::to(&path)),
        Some(Err(WizardError::SubmitFailed(message))) => {
            debug!("[Schedule] Booking on link {} failed: {}", link_id, message);
            Ok(Redirect::to(&path))
        }
        Some(Err(err @ WizardError::Unauthorized)) => Err(err.into()),
        Some(Err(err)) => {
            browser.push_flash(Feedback::error(err.to_string()));
            Ok(Redirect::to(&path))
        }
    }
}
