// --- File: crates/services/advisor_web/src/routes.rs ---
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::browser::browser_context;
use crate::guard::require_session;
use crate::handlers::{dashboard, home, login, schedule};

/// Dashboard pages and their form endpoints, all behind the session guard.
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route(
            "/dashboard/accounts/{provider}/connect",
            get(dashboard::connect_account),
        )
        .route(
            "/dashboard/accounts/{provider}/{id}/disconnect",
            post(dashboard::disconnect_account),
        )
        .route("/dashboard/windows", post(dashboard::create_window))
        .route("/dashboard/windows/{id}/delete", post(dashboard::delete_window))
        .route("/dashboard/links", post(dashboard::link_form))
        .route("/dashboard/links/{id}/toggle", post(dashboard::toggle_link))
        .route_layer(middleware::from_fn(require_session))
}

/// Public booking flow.
fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schedule/{id}", get(schedule::schedule_page))
        .route("/schedule/{id}/slot", post(schedule::select_slot))
        .route("/schedule/{id}/next", post(schedule::next_step))
        .route("/schedule/{id}/back", post(schedule::previous_step))
        .route("/schedule/{id}/submit", post(schedule::submit))
}

/// Creates the application router. Every page runs inside a browser context
/// resolved from the signed cookie.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/login", get(login::login))
        .route("/logout", post(login::logout))
        .merge(dashboard_routes())
        .merge(schedule_routes())
        .layer(middleware::from_fn_with_state(state.clone(), browser_context))
        .route("/healthz", get(home::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
