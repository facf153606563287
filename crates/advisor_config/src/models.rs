// --- File: crates/advisor_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// --- Backend API Config ---
// The REST backend is reached server-side through `base_url`. Browser redirects
// (OAuth hand-off, Google login) go to `public_url` when the backend is exposed
// under a different address.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Backend address as seen from the user's browser.
    pub fn browser_url(&self) -> &str {
        self.public_url.as_deref().unwrap_or(&self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            public_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// --- Browser Session Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    // Signing secret, at least 64 bytes. Use "secret_from_env" to read SESSION_COOKIE_SECRET.
    #[serde(default)]
    pub cookie_secret: Option<String>,
    #[serde(default)]
    pub secure_cookie: bool,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secret: None,
            secure_cookie: false,
            idle_timeout_minutes: default_idle_timeout(),
        }
    }
}

// --- Display Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    /// IANA zone used for "today" and for rendering instants, e.g. "Europe/Zurich".
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Public origin of this front-end, used for shareable booking URLs.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl AppConfig {
    /// Origin used when building share links for scheduling pages.
    pub fn public_origin(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.server.host, self.server.port),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_cookie_name() -> String {
    "advisor_browser".to_string()
}

fn default_idle_timeout() -> u64 {
    120
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
