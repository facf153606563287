// --- File: crates/advisor_api/src/calendar.rs ---
use crate::client::ApiClient;
use crate::error::ApiError;
use advisor_common::models::EventsResponse;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct EventsQuery {
    start_time: String,
    end_time: String,
}

impl ApiClient {
    /// Events of the user's connected calendars between `start` and `end`.
    /// A 206 (some calendars failed) still counts as success.
    pub async fn calendar_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<EventsResponse, ApiError> {
        let query = EventsQuery {
            start_time: start.to_rfc3339_opts(SecondsFormat::Millis, true),
            end_time: end.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        let response: Option<EventsResponse> = self
            .get_with_query("/api/google/calendar/events", &query)
            .await?;
        Ok(response.unwrap_or_default())
    }
}
