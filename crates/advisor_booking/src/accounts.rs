// --- File: crates/advisor_booking/src/accounts.rs ---
//! Connected Google and HubSpot accounts on the dashboard.

use crate::feedback::Feedback;
use advisor_api::accounts::connect_url;
use advisor_api::{AccountProvider, ApiClient, ApiError};
use advisor_common::models::{GoogleAccount, HubSpotAccount};
use advisor_common::log_error;
use tracing::info;

pub const MISSING_TOKEN_MESSAGE: &str = "Authentication token not found";
pub const EMPTY_MESSAGE: &str =
    "No accounts connected. Connect a Google or HubSpot account to get started.";

/// Account lists as last fetched.
///
/// `disconnect` updates the held lists in place after a successful call. A caller
/// that refetches after every mutation, like a page reloaded by a redirect, can
/// start from an empty value and keep only the reported feedback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectedAccounts {
    pub google: Vec<GoogleAccount>,
    pub hubspot: Vec<HubSpotAccount>,
}

impl ConnectedAccounts {
    /// Fetches both lists concurrently. If either request fails the failure is
    /// logged and both lists stay empty; only a rejected session is returned.
    pub async fn fetch(api: &ApiClient) -> Result<Self, ApiError> {
        let (hubspot, google) = tokio::join!(api.hubspot_accounts(), api.google_accounts());

        match (hubspot, google) {
            (Ok(hubspot), Ok(google)) => Ok(Self { google, hubspot }),
            (Err(err), _) | (_, Err(err)) if err.is_unauthorized() => Err(err),
            (Err(err), _) | (_, Err(err)) => {
                log_error(&err, "Error fetching connected accounts");
                Ok(Self::default())
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.google.is_empty() && self.hubspot.is_empty()
    }

    /// Disconnects one account and drops it from the list on success.
    pub async fn disconnect(
        &mut self,
        api: &ApiClient,
        provider: AccountProvider,
        account_id: &str,
        report: &mut impl FnMut(Feedback),
    ) -> Result<(), ApiError> {
        match api.disconnect_account(provider, account_id).await {
            Ok(()) => {
                info!("{} account {} disconnected", provider, account_id);
                match provider {
                    AccountProvider::Google => self.google.retain(|a| a.id != account_id),
                    AccountProvider::HubSpot => self.hubspot.retain(|a| a.id != account_id),
                }
                report(Feedback::success(format!(
                    "{} account disconnected successfully",
                    provider.label()
                )));
                Ok(())
            }
            Err(err) if err.is_unauthorized() => Err(err),
            Err(err) => {
                log_error(&err, &format!("Error disconnecting {} account", provider));
                report(Feedback::error(format!(
                    "Failed to disconnect {} account",
                    provider.label()
                )));
                Ok(())
            }
        }
    }
}

/// Full-page redirect target that starts connecting a `provider` account.
/// Reports an error and returns `None` when no token is stored.
pub fn connect_target(
    api: &ApiClient,
    browser_base: &str,
    provider: AccountProvider,
    report: &mut impl FnMut(Feedback),
) -> Option<String> {
    let Some(token) = api.session().token() else {
        report(Feedback::error(MISSING_TOKEN_MESSAGE));
        return None;
    };
    match connect_url(browser_base, provider, &token) {
        Ok(url) => Some(url),
        Err(err) => {
            log_error(&err, "Error building connect URL");
            report(Feedback::error(MISSING_TOKEN_MESSAGE));
            None
        }
    }
}

/// "Domain: x • Timezone: y"
pub fn hubspot_details(account: &HubSpotAccount) -> String {
    format!(
        "Domain: {} \u{2022} Timezone: {}",
        account.hub_domain, account.hub_timezone
    )
}
