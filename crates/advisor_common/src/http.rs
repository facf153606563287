// --- File: crates/advisor_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::{AdvisorError, HttpStatusCode};

// Include the client module
pub mod client;

/// Extension trait for AdvisorError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for AdvisorError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = Html(format!(
            "<!DOCTYPE html><html><head><title>Error {code}</title></head>\
             <body><main class=\"error\"><h1>{code}</h1><p>{message}</p>\
             <p><a href=\"/\">Back to home</a></p></main></body></html>",
            code = status_code.as_u16(),
            message = escape_html(&self.to_string()),
        ));

        (status_code, body).into_response()
    }
}

/// Implement IntoResponse for AdvisorError to make it easier to use in Axum handlers.
impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// Escapes text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
