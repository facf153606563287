// --- File: crates/services/advisor_web/src/browser.rs ---
//! Browser identity and per-browser state.
//!
//! Each browser carries a signed cookie with a random id. The id selects a
//! `BrowserState` holding that browser's session store (the `token` and
//! `userProfile` keys) and the transient UI state of its pages. Locks are short and
//! never held across an `.await`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use advisor_api::SessionContext;
use advisor_booking::links::LinkForm;
use advisor_booking::windows::WindowForm;
use advisor_booking::{BookingWizard, Feedback};
use advisor_common::{MemorySessionStore, SessionStore};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use cookie::{Cookie, CookieJar, Key, SameSite};
use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::app_state::AppState;

/// Page state that lives between requests of one browser.
#[derive(Debug)]
pub struct UiState {
    /// Messages shown once on the next rendered page.
    pub flash: Vec<Feedback>,
    /// Links whose meetings section is open.
    pub expanded_links: HashSet<String>,
    pub link_draft: LinkForm,
    pub window_draft: WindowForm,
    /// Booking flows by link id.
    pub wizards: HashMap<String, BookingWizard>,
    pub last_seen: Instant,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            flash: Vec::new(),
            expanded_links: HashSet::new(),
            link_draft: LinkForm::default(),
            window_draft: WindowForm::default(),
            wizards: HashMap::new(),
            last_seen: Instant::now(),
        }
    }
}

#[derive(Debug)]
pub struct BrowserState {
    id: Uuid,
    store: Arc<MemorySessionStore>,
    ui: Mutex<UiState>,
}

impl BrowserState {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            store: Arc::new(MemorySessionStore::new()),
            ui: Mutex::new(UiState::default()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> Arc<dyn SessionStore> {
        self.store.clone()
    }

    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.store())
    }

    /// Runs `f` with the UI state locked.
    pub fn with_ui<T>(&self, f: impl FnOnce(&mut UiState) -> T) -> T {
        let mut ui = self.ui.lock();
        f(&mut *ui)
    }

    pub fn push_flash(&self, feedback: Feedback) {
        self.ui.lock().flash.push(feedback);
    }

    pub fn take_flash(&self) -> Vec<Feedback> {
        std::mem::take(&mut self.ui.lock().flash)
    }

    /// Clears the session and every page state, as on logout.
    pub fn reset(&self) {
        self.session().clear();
        let mut ui = self.ui.lock();
        *ui = UiState::default();
    }

    fn touch(&self) {
        self.ui.lock().last_seen = Instant::now();
    }

    fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.ui.lock().last_seen)
    }
}

/// All known browsers.
#[derive(Clone, Default)]
pub struct BrowserRegistry {
    browsers: Arc<Mutex<HashMap<Uuid, Arc<BrowserState>>>>,
}

impl BrowserRegistry {
    /// State of the browser with `id`, or a fresh one under a new id. The flag is
    /// true when a new id was issued and the cookie must be set.
    pub fn resolve(&self, id: Option<Uuid>) -> (Arc<BrowserState>, bool) {
        let mut browsers = self.browsers.lock();
        if let Some(existing) = id.and_then(|id| browsers.get(&id)) {
            existing.touch();
            return (existing.clone(), false);
        }

        let id = Uuid::new_v4();
        let state = Arc::new(BrowserState::new(id));
        browsers.insert(id, state.clone());
        debug!("[Browser] New browser context {}", id);
        (state, true)
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<BrowserState>> {
        self.browsers.lock().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.browsers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.browsers.lock().is_empty()
    }

    /// Drops browsers idle for longer than `max_idle`. Returns how many were removed.
    pub fn purge_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut browsers = self.browsers.lock();
        let before = browsers.len();
        browsers.retain(|_, state| state.idle_for(now) <= max_idle);
        let removed = before - browsers.len();
        if removed > 0 {
            info!("[Browser] Purged {} idle browser contexts", removed);
        }
        removed
    }
}

/// Idle limit for browser contexts from a timeout in minutes. Saturates instead of
/// overflowing on absurd settings.
pub fn idle_limit(minutes: u64) -> Duration {
    Duration::from_secs(minutes.saturating_mul(60))
}

/// Reads the browser id from the signed cookie `name`. Tampered or unsigned values
/// are ignored.
pub fn read_browser_id(headers: &HeaderMap, key: &Key, name: &str) -> Option<Uuid> {
    let mut jar = CookieJar::new();
    for header_value in headers.get_all(header::COOKIE) {
        let Ok(raw) = header_value.to_str() else {
            continue;
        };
        for pair in raw.split(';') {
            if let Ok(cookie) = Cookie::parse_encoded(pair.trim()) {
                jar.add_original(cookie.into_owned());
            }
        }
    }

    let cookie = jar.signed(key).get(name)?;
    Uuid::parse_str(cookie.value()).ok()
}

/// `Set-Cookie` value carrying the signed browser id.
pub fn browser_cookie(id: Uuid, key: &Key, name: &str, secure: bool) -> Option<HeaderValue> {
    let mut jar = CookieJar::new();
    jar.signed_mut(key).add(
        Cookie::build((name.to_string(), id.to_string()))
            .path("/")
            .http_only(true)
            .secure(secure)
            .same_site(SameSite::Lax),
    );
    let cookie = jar.delta().next()?;
    HeaderValue::from_str(&cookie.encoded().to_string()).ok()
}

/// Middleware resolving the browser context of every request. The context is
/// handed to handlers as an `Extension<Arc<BrowserState>>`.
pub async fn browser_context(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session_config = &state.config.session;
    let known = read_browser_id(
        request.headers(),
        &state.cookie_key,
        &session_config.cookie_name,
    );
    let (browser, issued) = state.browsers.resolve(known);
    request.extensions_mut().insert(browser.clone());

    let mut response = next.run(request).await;

    if issued {
        if let Some(value) = browser_cookie(
            browser.id(),
            &state.cookie_key,
            &session_config.cookie_name,
            session_config.secure_cookie,
        ) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
