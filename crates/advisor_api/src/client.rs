// --- File: crates/advisor_api/src/client.rs ---
//! HTTP client for the REST backend.
//!
//! Every request goes through [`ApiClient::send`], which attaches the bearer token
//! and turns a 401 into a cleared session plus a redirect hint.

use crate::error::ApiError;
use crate::guard::LOGIN_PATH;
use crate::session::SessionContext;
use advisor_common::create_client;
use advisor_config::ApiConfig;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Error body sent by the backend on failures.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: Option<String>,
}

/// Backend client bound to one browser session and the page it serves.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
    session: SessionContext,
    location: Arc<str>,
}

impl ApiClient {
    pub fn new(http: Client, base_url: &str, session: SessionContext) -> Self {
        Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            session,
            location: Arc::from("/"),
        }
    }

    /// Builds a client with its own connection pool from the `api` configuration section.
    pub fn from_config(config: &ApiConfig, session: SessionContext) -> Result<Self, ApiError> {
        let http = create_client(config.timeout_secs, true)?;
        Ok(Self::new(http, &config.base_url, session))
    }

    /// Same client, issuing requests on behalf of the page at `path`.
    /// A 401 received while on a `/login` page does not redirect again.
    pub fn at(&self, path: &str) -> Self {
        Self {
            location: Arc::from(path),
            ..self.clone()
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::GET, path)?;
        self.send(request).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(request).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request).await
    }

    /// DELETE; any response body is ignored.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, path)?;
        self.send::<serde_json::Value>(request).await.map(|_| ())
    }

    /// Starts a request, attaching the bearer token.
    /// An expired JWT fails here without contacting the backend.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);

        match self.session.token() {
            Some(_) if self.session.is_expired(Utc::now()) => {
                info!("[Api] Stored token has expired, dropping session");
                Err(self.unauthorized())
            }
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let request = request.build()?;
        let method = request.method().clone();
        let url = request.url().path().to_string();
        debug!("[Api] {} {}", method, url);

        let response = self.http.execute(request).await.map_err(|err| {
            warn!("[Api] {} {} failed: {}", method, url, err);
            ApiError::from(err)
        })?;

        let status = response.status();
        let body_text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            info!("[Api] {} {} returned 401", method, url);
            return Err(self.unauthorized());
        }

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body_text)
                .ok()
                .and_then(|body| body.error);
            warn!(
                "[Api] {} {} failed with status {}: {}",
                method,
                url,
                status,
                message.as_deref().unwrap_or(&body_text)
            );
            return Err(ApiError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        let payload = if body_text.trim().is_empty() {
            "null"
        } else {
            body_text.as_str()
        };
        serde_json::from_str(payload).map_err(|err| {
            warn!("[Api] {} {} returned an unreadable body: {}", method, url, err);
            ApiError::from(err)
        })
    }

    /// Clears the session and decides whether the browser must go to the login page.
    fn unauthorized(&self) -> ApiError {
        self.session.clear();
        let navigate_to = if self.location.contains(LOGIN_PATH) {
            None
        } else {
            Some(LOGIN_PATH.to_string())
        };
        ApiError::Unauthorized { navigate_to }
    }
}
