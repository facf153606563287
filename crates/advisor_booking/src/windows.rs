// --- File: crates/advisor_booking/src/windows.rs ---
//! Weekly availability windows on the dashboard.

use crate::feedback::Feedback;
use advisor_api::{ApiClient, ApiError};
use advisor_common::models::{NewSchedulingWindow, SchedulingWindow};
use advisor_common::log_error;
use tracing::{debug, info};

pub const LOAD_FAILED: &str = "Failed to load scheduling windows";
pub const CREATE_FAILED: &str = "Failed to create scheduling window";
pub const DELETE_FAILED: &str = "Failed to delete scheduling window";

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Highest hour offered by the form.
pub const MAX_HOUR: u8 = 23;

pub fn weekday_name(weekday: u8) -> &'static str {
    WEEKDAYS.get(usize::from(weekday)).copied().unwrap_or("Unknown")
}

/// "9:00 - 17:00"
pub fn hours_label(window: &SchedulingWindow) -> String {
    format!("{}:00 - {}:00", window.start_hour, window.end_hour)
}

/// Values of the "add window" form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowForm {
    pub weekday: u8,
    pub start_hour: u8,
    pub end_hour: u8,
}

impl Default for WindowForm {
    fn default() -> Self {
        Self {
            weekday: 1,
            start_hour: 9,
            end_hour: 17,
        }
    }
}

impl WindowForm {
    /// The submit control is enabled only for a non-empty range of valid hours.
    pub fn can_submit(&self) -> bool {
        self.weekday <= 6
            && self.start_hour <= MAX_HOUR
            && self.end_hour <= MAX_HOUR
            && self.start_hour < self.end_hour
    }

    pub fn to_request(&self) -> Option<NewSchedulingWindow> {
        self.can_submit().then_some(NewSchedulingWindow {
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            weekday: self.weekday,
        })
    }
}

/// Windows as last fetched. `create` and `delete` update the held list in place
/// after a successful call; callers that refetch afterwards may discard it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulingWindows {
    pub windows: Vec<SchedulingWindow>,
    /// Inline error shown above the list.
    pub error: Option<String>,
}

impl SchedulingWindows {
    pub async fn fetch(api: &ApiClient) -> Result<Self, ApiError> {
        match api.list_windows().await {
            Ok(windows) => Ok(Self {
                windows,
                error: None,
            }),
            Err(err) if err.is_unauthorized() => Err(err),
            Err(err) => {
                log_error(&err, "Error fetching scheduling windows");
                Ok(Self {
                    windows: Vec::new(),
                    error: Some(LOAD_FAILED.to_string()),
                })
            }
        }
    }

    /// Creates a window from `form`. An invalid form is never sent; returns whether
    /// a window was added.
    pub async fn create(
        &mut self,
        api: &ApiClient,
        form: &WindowForm,
        report: &mut impl FnMut(Feedback),
    ) -> Result<bool, ApiError> {
        let Some(request) = form.to_request() else {
            debug!("Ignoring window form with start {} >= end {}", form.start_hour, form.end_hour);
            return Ok(false);
        };

        match api.create_window(&request).await {
            Ok(window) => {
                info!(
                    "Scheduling window created for {} {}",
                    weekday_name(window.weekday),
                    hours_label(&window)
                );
                self.windows.push(window);
                Ok(true)
            }
            Err(err) if err.is_unauthorized() => Err(err),
            Err(err) => {
                log_error(&err, "Error creating scheduling window");
                report(Feedback::error(CREATE_FAILED));
                Ok(false)
            }
        }
    }

    pub async fn delete(
        &mut self,
        api: &ApiClient,
        window_id: &str,
        report: &mut impl FnMut(Feedback),
    ) -> Result<(), ApiError> {
        match api.delete_window(window_id).await {
            Ok(()) => {
                self.windows.retain(|window| window.id != window_id);
                Ok(())
            }
            Err(err) if err.is_unauthorized() => Err(err),
            Err(err) => {
                log_error(&err, "Error deleting scheduling window");
                report(Feedback::error(DELETE_FAILED));
                Ok(())
            }
        }
    }
}
