use advisor_api::{accounts, AccountProvider, ApiClient, ApiError, SessionContext};
use advisor_common::models::{NewMeeting, NewSchedulingWindow, UserProfile};
use advisor_common::{
    create_client, AdvisorError, HttpStatusCode, MemorySessionStore, SessionStore, PROFILE_KEY,
    TOKEN_KEY,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// Helper function to build a client against the mock backend with a signed-in session
fn signed_in_client(server: &MockServer, token: &str) -> (Arc<MemorySessionStore>, ApiClient) {
    let store = Arc::new(MemorySessionStore::new());
    let session = SessionContext::new(store.clone());
    session
        .sign_in(
            token,
            &UserProfile {
                email: "jane@example.com".into(),
                ..Default::default()
            },
        )
        .unwrap();
    let http = create_client(5, true).unwrap();
    (store, ApiClient::new(http, &server.uri(), session))
}

fn jwt_with_exp(exp: i64) -> String {
    format!(
        "{}.{}.sig",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
        URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp))
    )
}

#[tokio::test]
async fn test_bearer_token_and_json_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scheduling/links"))
        .and(header("Authorization", "Bearer tok-123"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Intro", "duration": 30, "max_days_in_advance": 30,
             "custom_questions": ["Company?"], "is_active": true}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (_store, client) = signed_in_client(&server, "tok-123");
    let links = client.list_links().await.unwrap();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].id, "1");
    assert_eq!(links[0].custom_questions, vec!["Company?"]);
}

#[tokio::test]
async fn test_unauthorized_clears_session_and_redirects_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scheduling/windows"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid token"})))
        .mount(&server)
        .await;

    let (store, client) = signed_in_client(&server, "tok");
    let err = client.at("/dashboard").list_windows().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.navigate_to(), Some("/login"));
    assert_eq!(store.get_item(TOKEN_KEY), None);
    assert_eq!(store.get_item(PROFILE_KEY), None);
}

#[tokio::test]
async fn test_unauthorized_on_login_page_does_not_navigate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/google/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (store, client) = signed_in_client(&server, "tok");
    let err = client.at("/login").google_profile().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.navigate_to(), None);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_expired_jwt_never_reaches_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scheduling/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let expired = jwt_with_exp((Utc::now() - Duration::minutes(5)).timestamp());
    let (store, client) = signed_in_client(&server, &expired);
    let err = client.at("/dashboard").list_links().await.unwrap_err();

    assert_eq!(err.navigate_to(), Some("/login"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scheduling/links/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Link not found"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/scheduling/links/10"))
        .respond_with(ResponseTemplate::new(500).set_body_string("panic"))
        .mount(&server)
        .await;

    let (_store, client) = signed_in_client(&server, "tok");

    let err = client.get_link("9").await.unwrap_err();
    assert_eq!(
        err.message_or("Failed to load scheduling link"),
        "Link not found"
    );
    assert!(matches!(err, ApiError::Status { status_code: 404, .. }));

    let err = client.get_link("10").await.unwrap_err();
    assert_eq!(
        err.message_or("Failed to load scheduling link"),
        "Failed to load scheduling link"
    );
}

#[tokio::test]
async fn test_slots_are_requested_for_the_given_date() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scheduling/links/7/slots"))
        .and(query_param("date", "2025-03-04"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"start": "2025-03-04T09:00:00Z", "end": "2025-03-04T09:30:00Z"},
            {"start": "2025-03-04T10:00:00Z", "end": "2025-03-04T10:30:00Z"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (_store, client) = signed_in_client(&server, "tok");
    let slots = client
        .available_slots("7", NaiveDate::from_ymd_opt(2025, 3, 4).unwrap())
        .await
        .unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(
        slots[0].start,
        Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap()
    );
}

#[tokio::test]
async fn test_null_list_reads_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scheduling/links/7/meetings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let (_store, client) = signed_in_client(&server, "tok");
    assert!(client.list_meetings("7").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_partial_content_events_count_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/google/calendar/events"))
        .respond_with(ResponseTemplate::new(206).set_body_json(json!({
            "events": [{"id": "e1", "summary": "Standup",
                        "start_time": "2025-03-04T09:00:00Z", "end_time": "2025-03-04T09:15:00Z",
                        "status": "confirmed", "calendar_id": "primary"}],
            "total": 1
        })))
        .mount(&server)
        .await;

    let (_store, client) = signed_in_client(&server, "tok");
    let now = Utc::now();
    let response = client
        .calendar_events(now, now + Duration::days(30))
        .await
        .unwrap();

    assert_eq!(response.events.len(), 1);
    assert_eq!(response.events[0].summary, "Standup");
}

#[tokio::test]
async fn test_create_meeting_posts_answers_map() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scheduling/links/3/meetings"))
        .and(body_json(json!({
            "client_email": "a@b.c",
            "linkedin_url": "https://linkedin.com/in/a",
            "start_time": "2025-03-04T09:00:00Z",
            "end_time": "2025-03-04T09:30:00Z",
            "answers": {"Company?": "Acme"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 44})))
        .expect(1)
        .mount(&server)
        .await;

    let (_store, client) = signed_in_client(&server, "tok");
    let start = Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap();
    let mut answers = BTreeMap::new();
    answers.insert("Company?".to_string(), "Acme".to_string());

    client
        .create_meeting(
            "3",
            &NewMeeting {
                client_email: "a@b.c".into(),
                linkedin_url: "https://linkedin.com/in/a".into(),
                start_time: start,
                end_time: start + Duration::minutes(30),
                answers,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_window_create_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/scheduling/windows"))
        .and(body_json(json!({"start_hour": 9, "end_hour": 17, "weekday": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ID": 5, "Weekday": 1, "StartHour": 9, "EndHour": 17, "IsActive": true
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/scheduling/windows/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (_store, client) = signed_in_client(&server, "tok");
    let window = client
        .create_window(&NewSchedulingWindow {
            start_hour: 9,
            end_hour: 17,
            weekday: 1,
        })
        .await
        .unwrap();
    assert_eq!(window.id, "5");
    assert_eq!(window.start_hour, 9);

    client.delete_window(&window.id).await.unwrap();
}

#[tokio::test]
async fn test_disconnect_uses_provider_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/hubspot/accounts/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let (_store, client) = signed_in_client(&server, "tok");
    client
        .disconnect_account(AccountProvider::HubSpot, "12")
        .await
        .unwrap();
}

#[test]
fn test_connect_url_encodes_token() {
    let url = accounts::connect_url("http://backend:8080/", AccountProvider::Google, "a b+c").unwrap();
    assert_eq!(url, "http://backend:8080/api/google/connect?token=a+b%2Bc");
    assert_eq!(
        accounts::login_url("http://backend:8080"),
        "http://backend:8080/auth/google/login"
    );
}

#[tokio::test]
async fn test_request_without_token_has_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/scheduling/links/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1", "title": "Intro", "duration": 15, "max_days_in_advance": 7,
            "custom_questions": []
        })))
        .mount(&server)
        .await;

    let session = SessionContext::new(Arc::new(MemorySessionStore::new()));
    let client = ApiClient::new(create_client(5, true).unwrap(), &server.uri(), session);
    let link = client.get_link("1").await.unwrap();
    assert_eq!(link.duration, 15);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[test]
fn test_api_errors_convert_to_shared_taxonomy() {
    let superseded = AdvisorError::from(ApiError::Superseded);
    assert!(matches!(superseded, AdvisorError::ConflictError(_)));
    assert_eq!(superseded.status_code(), 409);

    let unauthorized = AdvisorError::from(ApiError::Unauthorized { navigate_to: None });
    assert!(matches!(unauthorized, AdvisorError::AuthError(_)));

    let missing = AdvisorError::from(ApiError::MissingToken);
    assert_eq!(missing.to_string(), "Authentication error: Authentication token not found");

    let internal = AdvisorError::from(ApiError::InternalError("task failed".into()));
    assert_eq!(internal.status_code(), 500);
}
