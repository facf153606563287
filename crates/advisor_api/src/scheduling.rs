// --- File: crates/advisor_api/src/scheduling.rs ---
//! Scheduling links, meetings, slots and availability windows.

use crate::client::ApiClient;
use crate::error::ApiError;
use advisor_common::models::{
    Meeting, NewMeeting, NewSchedulingLink, NewSchedulingWindow, SchedulingLink,
    SchedulingWindow, TimeSlot,
};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize)]
struct SlotQuery {
    date: String,
}

impl ApiClient {
    pub async fn list_links(&self) -> Result<Vec<SchedulingLink>, ApiError> {
        let links: Option<Vec<SchedulingLink>> = self.get("/api/scheduling/links").await?;
        Ok(links.unwrap_or_default())
    }

    pub async fn get_link(&self, link_id: &str) -> Result<SchedulingLink, ApiError> {
        self.get(&format!("/api/scheduling/links/{}", link_id)).await
    }

    pub async fn create_link(&self, link: &NewSchedulingLink) -> Result<SchedulingLink, ApiError> {
        self.post("/api/scheduling/links", link).await
    }

    pub async fn list_meetings(&self, link_id: &str) -> Result<Vec<Meeting>, ApiError> {
        let meetings: Option<Vec<Meeting>> = self
            .get(&format!("/api/scheduling/links/{}/meetings", link_id))
            .await?;
        Ok(meetings.unwrap_or_default())
    }

    /// Books a meeting. The response body is not needed by any caller.
    pub async fn create_meeting(&self, link_id: &str, meeting: &NewMeeting) -> Result<(), ApiError> {
        self.post::<serde_json::Value, _>(
            &format!("/api/scheduling/links/{}/meetings", link_id),
            meeting,
        )
        .await
        .map(|_| ())
    }

    /// Free slots of `link_id` on `date`, as computed by the backend.
    pub async fn available_slots(
        &self,
        link_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, ApiError> {
        let query = SlotQuery {
            date: date.format("%Y-%m-%d").to_string(),
        };
        let slots: Option<Vec<TimeSlot>> = self
            .get_with_query(&format!("/api/scheduling/links/{}/slots", link_id), &query)
            .await?;
        Ok(slots.unwrap_or_default())
    }

    pub async fn list_windows(&self) -> Result<Vec<SchedulingWindow>, ApiError> {
        let windows: Option<Vec<SchedulingWindow>> =
            self.get("/api/scheduling/windows").await?;
        Ok(windows.unwrap_or_default())
    }

    pub async fn create_window(
        &self,
        window: &NewSchedulingWindow,
    ) -> Result<SchedulingWindow, ApiError> {
        self.post("/api/scheduling/windows", window).await
    }

    pub async fn delete_window(&self, window_id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/api/scheduling/windows/{}", window_id))
            .await
    }
}
