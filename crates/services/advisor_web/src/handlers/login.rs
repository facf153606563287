// --- File: crates/services/advisor_web/src/handlers/login.rs ---
use std::sync::Arc;

use advisor_api::accounts::login_url;
use advisor_api::LOGIN_PATH;
use axum::{
    extract::{Extension, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::browser::BrowserState;
use crate::views;

pub const PROFILE_FALLBACK: &str = "Failed to fetch profile";

#[derive(Deserialize, Debug, Default)]
pub struct LoginQuery {
    pub token: Option<String>,
}

/// Login page, and the return point of the backend's OAuth flow.
///
/// With a `token` the token is stored, the profile fetched and stored, and the
/// browser continues to the dashboard. On failure the session is cleared and the
/// error shown.
pub async fn login(
    State(state): State<AppState>,
    Extension(browser): Extension<Arc<BrowserState>>,
    Query(query): Query<LoginQuery>,
) -> Response {
    let google_login = login_url(state.browser_api_url());

    let Some(token) = query.token.filter(|t| !t.trim().is_empty()) else {
        return views::login::render(&google_login, None).into_response();
    };

    let api = state.api_for(&browser, LOGIN_PATH);
    api.session().store_token(&token);

    let result = match api.google_profile().await {
        Ok(profile) => api.session().store_profile(&profile).map(|_| profile),
        Err(err) => Err(err),
    };

    match result {
        Ok(profile) => {
            info!("[Login] Signed in {}", profile.email);
            Redirect::to("/dashboard").into_response()
        }
        Err(err) => {
            warn!("[Login] Failed to fetch profile: {}", err);
            api.session().clear();
            let message = err.message_or(PROFILE_FALLBACK);
            views::login::render(&google_login, Some(&message)).into_response()
        }
    }
}

pub async fn logout(Extension(browser): Extension<Arc<BrowserState>>) -> Redirect {
    browser.reset();
    info!("[Login] Browser {} logged out", browser.id());
    Redirect::to(LOGIN_PATH)
}
