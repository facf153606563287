// --- File: crates/advisor_api/src/session.rs ---
//! Session state of one browser: bearer token plus cached user profile.

use crate::error::ApiError;
use advisor_common::models::UserProfile;
use advisor_common::{SessionStore, PROFILE_KEY, TOKEN_KEY};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle over a browser's [`SessionStore`]. Clones share the same store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_token", &self.token().is_some())
            .finish()
    }
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The stored bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.store
            .get_item(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    /// The stored profile. A corrupt entry reads as no profile.
    pub fn profile(&self) -> Option<UserProfile> {
        let raw = self.store.get_item(PROFILE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!("Stored user profile is not valid JSON: {}", err);
                None
            }
        }
    }

    /// Stores a token received from the OAuth return, without any `Bearer ` prefix.
    /// Returns the token as stored.
    pub fn store_token(&self, raw: &str) -> String {
        let token = normalize_token(raw).to_string();
        self.store.set_item(TOKEN_KEY, &token);
        token
    }

    pub fn store_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        let json = serde_json::to_string(profile)?;
        self.store.set_item(PROFILE_KEY, &json);
        Ok(())
    }

    pub fn sign_in(&self, token: &str, profile: &UserProfile) -> Result<(), ApiError> {
        self.store_token(token);
        self.store_profile(profile)
    }

    /// Removes both the token and the profile.
    pub fn clear(&self) {
        debug!("Clearing browser session");
        self.store.remove_item(TOKEN_KEY);
        self.store.remove_item(PROFILE_KEY);
    }

    /// True when both storage keys hold a value.
    pub fn is_present(&self) -> bool {
        self.token().is_some() && self.store.get_item(PROFILE_KEY).is_some()
    }

    /// True when the stored token is a JWT whose `exp` claim lies at or before `now`.
    /// Opaque tokens never expire client-side.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.token()
            .and_then(|token| token_expiry(&token))
            .is_some_and(|exp| exp <= now)
    }
}

/// Strips a leading `Bearer ` and surrounding whitespace.
pub fn normalize_token(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("Bearer ")
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Reads the `exp` claim of a JWT without verifying it.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut parts = token.split('.');
    let (_header, payload, _signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?;
    let seconds = exp.as_i64().or_else(|| exp.as_f64().map(|f| f as i64))?;
    DateTime::from_timestamp(seconds, 0)
}
