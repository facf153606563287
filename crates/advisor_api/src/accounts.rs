// --- File: crates/advisor_api/src/accounts.rs ---
//! Connected Google/HubSpot accounts and the signed-in user's profile.

use crate::client::ApiClient;
use crate::error::ApiError;
use advisor_common::models::{GoogleAccount, HubSpotAccount, UserProfile};
use std::fmt;

/// Third-party account kinds a user can connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountProvider {
    Google,
    HubSpot,
}

impl AccountProvider {
    /// Path segment used by the backend and by dashboard routes.
    pub fn slug(self) -> &'static str {
        match self {
            AccountProvider::Google => "google",
            AccountProvider::HubSpot => "hubspot",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AccountProvider::Google => "Google",
            AccountProvider::HubSpot => "HubSpot",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "google" => Some(AccountProvider::Google),
            "hubspot" => Some(AccountProvider::HubSpot),
            _ => None,
        }
    }
}

impl fmt::Display for AccountProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Full-page URL that starts the OAuth hand-off for `provider`.
///
/// `browser_base` is the backend address as the user's browser sees it.
pub fn connect_url(
    browser_base: &str,
    provider: AccountProvider,
    token: &str,
) -> Result<String, ApiError> {
    let query = serde_urlencoded::to_string([("token", token)])
        .map_err(|err| ApiError::InternalError(format!("failed to encode token: {}", err)))?;
    Ok(format!(
        "{}/api/{}/connect?{}",
        browser_base.trim_end_matches('/'),
        provider.slug(),
        query
    ))
}

/// URL of the backend's Google sign-in flow.
pub fn login_url(browser_base: &str) -> String {
    format!("{}/auth/google/login", browser_base.trim_end_matches('/'))
}

impl ApiClient {
    pub async fn google_accounts(&self) -> Result<Vec<GoogleAccount>, ApiError> {
        let accounts: Option<Vec<GoogleAccount>> = self.get("/api/google/accounts").await?;
        Ok(accounts.unwrap_or_default())
    }

    pub async fn hubspot_accounts(&self) -> Result<Vec<HubSpotAccount>, ApiError> {
        let accounts: Option<Vec<HubSpotAccount>> = self.get("/api/hubspot/accounts").await?;
        Ok(accounts.unwrap_or_default())
    }

    pub async fn disconnect_account(
        &self,
        provider: AccountProvider,
        account_id: &str,
    ) -> Result<(), ApiError> {
        self.delete(&format!("/api/{}/accounts/{}", provider.slug(), account_id))
            .await
    }

    /// Profile of the user owning the current token.
    pub async fn google_profile(&self) -> Result<UserProfile, ApiError> {
        self.get("/api/google/profile").await
    }
}
