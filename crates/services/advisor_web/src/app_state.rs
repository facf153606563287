// --- File: crates/services/advisor_web/src/app_state.rs ---
use std::sync::Arc;

use advisor_api::{ApiClient, ResourceScheduler, SessionContext};
use advisor_booking::format::parse_time_zone;
use advisor_common::{create_client, AdvisorError, Context};
use advisor_config::AppConfig;
use chrono_tz::Tz;
use cookie::Key;
use reqwest::Client;
use tracing::warn;

use crate::browser::{BrowserRegistry, BrowserState};

/// Application state that is shared across all routes.
///
/// Everything here is cheap to clone: the HTTP client and the registry are
/// reference-counted internally, the configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration loaded at startup.
    pub config: Arc<AppConfig>,

    /// Shared connection pool for all backend calls. Each request wraps it in an
    /// `ApiClient` bound to the calling browser's session.
    pub http: Client,

    /// Per-browser session stores and UI state, keyed by the signed cookie id.
    pub browsers: BrowserRegistry,

    /// Keyed fetches; a newer slot request for the same browser and link aborts
    /// the superseded one.
    pub scheduler: ResourceScheduler,

    /// Signs the browser cookie.
    pub cookie_key: Key,

    /// Display zone for "today" and every rendered instant.
    pub tz: Tz,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AdvisorError> {
        let http = create_client(config.api.timeout_secs, true)
            .context("Failed to build the backend HTTP client")?;
        let cookie_key = cookie_key(config.session.cookie_secret.as_deref());
        let tz = parse_time_zone(&config.display.time_zone);

        Ok(Self {
            config: Arc::new(config),
            http,
            browsers: BrowserRegistry::default(),
            scheduler: ResourceScheduler::new(),
            cookie_key,
            tz,
        })
    }

    /// API client acting for `browser`, issued from the page at `location`.
    pub fn api_for(&self, browser: &BrowserState, location: &str) -> ApiClient {
        ApiClient::new(
            self.http.clone(),
            &self.config.api.base_url,
            SessionContext::new(browser.store()),
        )
        .at(location)
    }

    /// Backend address for full-page browser redirects.
    pub fn browser_api_url(&self) -> &str {
        self.config.api.browser_url()
    }
}

/// Signing key from the configured secret. Without a usable secret a random key is
/// generated, so browser cookies do not survive a restart.
fn cookie_key(secret: Option<&str>) -> Key {
    match secret.map(str::as_bytes) {
        Some(bytes) => match Key::try_from(bytes) {
            Ok(key) => key,
            Err(e) => {
                warn!(
                    "[Session] cookie_secret unusable ({}), using a generated key",
                    e
                );
                Key::generate()
            }
        },
        None => {
            warn!("[Session] No cookie_secret configured, using a generated key");
            Key::generate()
        }
    }
}
