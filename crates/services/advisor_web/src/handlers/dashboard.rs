// --- File: crates/services/advisor_web/src/handlers/dashboard.rs ---
//! The signed-in dashboard and its form endpoints. Every route here sits behind the
//! session guard.

use std::sync::Arc;

use advisor_api::AccountProvider;
use advisor_booking::accounts::{connect_target, ConnectedAccounts};
use advisor_booking::events::upcoming_events;
use advisor_booking::links::{create_link, load_links, LinkForm, LOAD_FALLBACK};
use advisor_booking::windows::{SchedulingWindows, WindowForm};
use advisor_common::log_error;
use axum::{
    extract::{Extension, Form, Path, State},
    response::{Html, Redirect},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::app_state::AppState;
use crate::browser::BrowserState;
use crate::error::WebError;
use crate::views::dashboard::{render, DashboardView};

const DASHBOARD_PATH: &str = "/dashboard";

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
) -> Result<Html<String>, WebError> {
    let api = state.api_for(&browser, DASHBOARD_PATH);

    let (accounts, windows, events, links) = tokio::join!(
        ConnectedAccounts::fetch(&api),
        SchedulingWindows::fetch(&api),
        upcoming_events(&api, Utc::now()),
        load_links(&api),
    );
    let accounts = accounts?;
    let windows = windows?;
    let events = events?;
    let links = match links {
        Ok(links) => Ok(links),
        Err(err) if err.is_unauthorized() => return Err(err.into()),
        Err(err) => {
            log_error(&err, "Error fetching scheduling links");
            Err(err.message_or(LOAD_FALLBACK))
        }
    };

    let (flash, expanded, link_draft, window_draft) = browser.with_ui(|ui| {
        (
            std::mem::take(&mut ui.flash),
            ui.expanded_links.clone(),
            ui.link_draft.clone(),
            ui.window_draft,
        )
    });
    let profile = browser.session().profile();
    let origin = state.config.public_origin();

    Ok(render(&DashboardView {
        profile: profile.as_ref(),
        flash: &flash,
        accounts: &accounts,
        windows: &windows,
        window_draft: &window_draft,
        events: &events,
        links: &links,
        link_draft: &link_draft,
        expanded: &expanded,
        origin: &origin,
        tz: state.tz,
    }))
}

fn provider_from(slug: &str) -> Result<AccountProvider, WebError> {
    AccountProvider::from_slug(slug).ok_or_else(|| WebError::NotFound(format!("provider {}", slug)))
}

/// Starts connecting an account with a full-page redirect to the backend.
pub async fn connect_account(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
    Path(provider): Path<String>,
) -> Result<Redirect, WebError> {
    let provider = provider_from(&provider)?;
    let api = state.api_for(&browser, DASHBOARD_PATH);

    let target = connect_target(&api, state.browser_api_url(), provider, &mut |feedback| {
        browser.push_flash(feedback)
    });
    Ok(match target {
        Some(url) => Redirect::to(&url),
        None => Redirect::to(DASHBOARD_PATH),
    })
}

pub async fn disconnect_account(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
    Path((provider, account_id)): Path<(String, String)>,
) -> Result<Redirect, WebError> {
    let provider = provider_from(&provider)?;
    let api = state.api_for(&browser, DASHBOARD_PATH);

    // The redirect reloads the dashboard, which refetches every list; only the
    // feedback outlives this request.
    ConnectedAccounts::default()
        .disconnect(&api, provider, &account_id, &mut |feedback| {
            browser.push_flash(feedback)
        })
        .await?;
    Ok(Redirect::to("/dashboard#accounts"))
}

#[derive(Deserialize, Debug)]
pub struct WindowInput {
    pub weekday: u8,
    pub start_hour: u8,
    pub end_hour: u8,
}

pub async fn create_window(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
    Form(input): Form<WindowInput>,
) -> Result<Redirect, WebError> {
    let form = WindowForm {
        weekday: input.weekday,
        start_hour: input.start_hour,
        end_hour: input.end_hour,
    };
    browser.with_ui(|ui| ui.window_draft = form);

    let api = state.api_for(&browser, DASHBOARD_PATH);
    let added = SchedulingWindows::default()
        .create(&api, &form, &mut |feedback| browser.push_flash(feedback))
        .await?;
    if added {
        browser.with_ui(|ui| ui.window_draft = WindowForm::default());
    }
    Ok(Redirect::to("/dashboard#windows"))
}

pub async fn delete_window(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
    Path(window_id): Path<String>,
) -> Result<Redirect, WebError> {
    let api = state.api_for(&browser, DASHBOARD_PATH);
    // Refetched on the redirected page.
    SchedulingWindows::default()
        .delete(&api, &window_id, &mut |feedback| browser.push_flash(feedback))
        .await?;
    Ok(Redirect::to("/dashboard#windows"))
}

/// Fields of the "create link" form. Numbers arrive as text so that an empty
/// optional field is not a rejection.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct LinkInput {
    pub title: String,
    pub duration: String,
    pub max_uses: String,
    pub expires_at: String,
    pub max_days_in_advance: String,
    pub new_question: String,
    /// `add_question`, `remove_question:<index>` or `create`.
    pub action: String,
}

impl LinkInput {
    /// Copies the typed values onto `draft`. Unreadable numbers keep the draft's value.
    fn apply_to(&self, draft: &mut LinkForm) {
        draft.title = self.title.clone();
        if let Ok(duration) = self.duration.trim().parse() {
            draft.duration = duration;
        }
        draft.max_uses = self.max_uses.trim().parse().ok();
        draft.expires_at = NaiveDate::parse_from_str(self.expires_at.trim(), "%Y-%m-%d").ok();
        if let Ok(days) = self.max_days_in_advance.trim().parse() {
            draft.max_days_in_advance = days;
        }
    }
}

pub async fn link_form(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
    Form(input): Form<LinkInput>,
) -> Result<Redirect, WebError> {
    let mut draft = browser.with_ui(|ui| ui.link_draft.clone());
    input.apply_to(&mut draft);

    if input.action == "add_question" {
        draft.add_question(&input.new_question);
    } else if let Some(index) = input.action.strip_prefix("remove_question:") {
        if let Ok(index) = index.parse() {
            draft.remove_question(index);
        }
    } else {
        let api = state.api_for(&browser, DASHBOARD_PATH);
        // Scratch list; the redirected page refetches the links.
        let mut created = Vec::new();
        let result = create_link(&api, &mut draft, &mut created, state.tz, &mut |feedback| {
            browser.push_flash(feedback)
        })
        .await;
        browser.with_ui(|ui| ui.link_draft = draft);
        result?;
        return Ok(Redirect::to("/dashboard#links"));
    }

    debug!("[Links] Draft now has {} questions", draft.custom_questions.len());
    browser.with_ui(|ui| ui.link_draft = draft);
    Ok(Redirect::to("/dashboard#links"))
}

/// Opens or closes the meetings section of one link card.
pub async fn toggle_link(
    Extension(browser): Extension<Arc<BrowserState>>,
    Path(link_id): Path<String>,
) -> Redirect {
    browser.with_ui(|ui| {
        if !ui.expanded_links.remove(&link_id) {
            ui.expanded_links.insert(link_id.clone());
        }
    });
    Redirect::to(&format!("/dashboard#link-{}", link_id))
}
