#[cfg(test)]
mod tests {
    use crate::guard::{check_session, GuardOutcome};
    use crate::session::SessionContext;
    use advisor_common::models::UserProfile;
    use advisor_common::{MemorySessionStore, SessionStore, PROFILE_KEY, TOKEN_KEY};
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn session() -> (Arc<MemorySessionStore>, SessionContext) {
        let store = Arc::new(MemorySessionStore::new());
        (store.clone(), SessionContext::new(store))
    }

    #[test]
    fn test_missing_token_redirects() {
        let (store, session) = session();
        store.set_item(PROFILE_KEY, "{}");
        assert_eq!(
            check_session(&session, Utc::now()),
            GuardOutcome::RedirectToLogin
        );
    }

    #[test]
    fn test_missing_profile_redirects() {
        let (store, session) = session();
        store.set_item(TOKEN_KEY, "tok");
        assert_eq!(
            check_session(&session, Utc::now()),
            GuardOutcome::RedirectToLogin
        );
    }

    #[test]
    fn test_complete_session_is_allowed() {
        let (_store, session) = session();
        let profile = UserProfile {
            email: "jane@example.com".into(),
            ..Default::default()
        };
        session.sign_in("tok", &profile).unwrap();

        assert_eq!(
            check_session(&session, Utc::now()),
            GuardOutcome::Allow {
                profile: Some(profile)
            }
        );
    }

    #[test]
    fn test_expired_jwt_redirects_and_clears() {
        let (store, session) = session();
        let exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode("{}"),
            URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp))
        );
        session
            .sign_in(&token, &UserProfile::default())
            .unwrap();

        assert_eq!(
            check_session(&session, Utc::now()),
            GuardOutcome::RedirectToLogin
        );
        assert!(store.is_empty());
    }
}
