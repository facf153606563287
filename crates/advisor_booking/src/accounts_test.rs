#[cfg(test)]
mod tests {
    use crate::accounts::{connect_target, hubspot_details, MISSING_TOKEN_MESSAGE};
    use crate::feedback::Feedback;
    use advisor_api::{AccountProvider, ApiClient, SessionContext};
    use advisor_common::models::HubSpotAccount;
    use advisor_common::{create_client, MemorySessionStore};
    use std::sync::Arc;

    fn client() -> ApiClient {
        let session = SessionContext::new(Arc::new(MemorySessionStore::new()));
        ApiClient::new(create_client(5, true).unwrap(), "http://backend:8080", session)
    }

    #[test]
    fn test_connect_without_token_reports_error() {
        let api = client();
        let mut reported = Vec::new();

        let target = connect_target(&api, "http://backend:8080", AccountProvider::Google, &mut |f| {
            reported.push(f)
        });

        assert_eq!(target, None);
        assert_eq!(reported, vec![Feedback::error(MISSING_TOKEN_MESSAGE)]);
    }

    #[test]
    fn test_connect_with_token_builds_redirect() {
        let api = client();
        api.session().store_token("tok");
        let mut reported = Vec::new();

        let target = connect_target(&api, "https://api.example.com", AccountProvider::HubSpot, &mut |f| {
            reported.push(f)
        });

        assert_eq!(
            target.as_deref(),
            Some("https://api.example.com/api/hubspot/connect?token=tok")
        );
        assert!(reported.is_empty());
    }

    #[test]
    fn test_hubspot_details_line() {
        let account = HubSpotAccount {
            id: "1".into(),
            hub_name: "Acme".into(),
            hub_domain: "acme.com".into(),
            hub_timezone: "US/Eastern".into(),
            last_synced_at: String::new(),
        };
        assert_eq!(
            hubspot_details(&account),
            "Domain: acme.com \u{2022} Timezone: US/Eastern"
        );
    }
}
