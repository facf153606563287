// --- File: crates/services/advisor_web/src/handlers/home.rs ---
use std::sync::Arc;

use axum::{extract::Extension, response::Html};

use crate::browser::BrowserState;
use crate::views;

pub async fn home(Extension(browser): Extension<Arc<BrowserState>>) -> Html<String> {
    let profile = browser.session().profile();
    views::home::render(profile.as_ref())
}

pub async fn healthz() -> &'static str {
    "ok"
}
