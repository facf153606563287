// --- File: crates/advisor_common/src/http/client.rs ---
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Creates a new HTTP client for talking to the JSON backend.
///
/// # Arguments
///
/// * `timeout_secs` - The timeout in seconds for every request
/// * `follow_redirects` - Whether the client should follow redirects
///
/// Every request carries `Content-Type` and `Accept` set to `application/json`.
pub fn create_client(timeout_secs: u64, follow_redirects: bool) -> Result<Client, ReqwestError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(headers)
        .redirect(if follow_redirects {
            reqwest::redirect::Policy::default()
        } else {
            reqwest::redirect::Policy::none()
        })
        .build()
}
