// --- File: crates/advisor_booking/src/events.rs ---
//! Upcoming events from the connected calendars.

use crate::format;
use advisor_api::{ApiClient, ApiError};
use advisor_common::log_error;
use advisor_common::models::CalendarEvent;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

pub const LOAD_FAILED: &str = "Failed to load calendar events";
pub const EMPTY_MESSAGE: &str = "No upcoming events found";
pub const INVALID_DATE: &str = "Invalid date";

/// Days ahead of now that are listed.
pub const HORIZON_DAYS: i64 = 30;
/// Longer descriptions are cut to this many characters plus "...".
pub const DESCRIPTION_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum EventsView {
    Failed(String),
    Ready(Vec<CalendarEvent>),
}

impl EventsView {
    pub fn notice(&self) -> Option<&str> {
        match self {
            EventsView::Failed(message) => Some(message),
            EventsView::Ready(events) if events.is_empty() => Some(EMPTY_MESSAGE),
            EventsView::Ready(_) => None,
        }
    }
}

/// Events from `now` to `now + 30 days`, earliest first.
pub async fn upcoming_events(api: &ApiClient, now: DateTime<Utc>) -> Result<EventsView, ApiError> {
    match api
        .calendar_events(now, now + Duration::days(HORIZON_DAYS))
        .await
    {
        Ok(response) => {
            let mut events = response.events;
            sort_by_start(&mut events);
            Ok(EventsView::Ready(events))
        }
        Err(err) if err.is_unauthorized() => Err(err),
        Err(err) => {
            log_error(&err, "Error fetching calendar events");
            Ok(EventsView::Failed(LOAD_FAILED.to_string()))
        }
    }
}

/// Sorts by start time; events with unreadable times go last in their original order.
pub fn sort_by_start(events: &mut [CalendarEvent]) {
    events.sort_by_key(|event| match format::parse_instant(&event.start_time) {
        Some(start) => (0, Some(start)),
        None => (1, None),
    });
}

/// "Mar 4, 9:00 AM - 9:30 AM", or "Invalid date".
pub fn time_range(event: &CalendarEvent, tz: Tz) -> String {
    match (
        format::parse_instant(&event.start_time),
        format::parse_instant(&event.end_time),
    ) {
        (Some(start), Some(end)) => format!(
            "{} - {}",
            format::short_date_time(start, tz),
            format::time(end, tz)
        ),
        _ => INVALID_DATE.to_string(),
    }
}

pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let head: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}
