// --- File: crates/advisor_booking/src/links.rs ---
//! Scheduling links with their meetings, and the "create link" form.

use crate::feedback::Feedback;
use advisor_api::{ApiClient, ApiError};
use advisor_common::log_error;
use advisor_common::models::{Meeting, NewSchedulingLink, SchedulingLink};
use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use futures::future::join_all;
use tracing::{info, warn};

pub const LOAD_FALLBACK: &str = "Failed to load data";
pub const CREATED_MESSAGE: &str = "Scheduling link created successfully";
pub const CREATE_FAILED: &str = "Failed to create scheduling link. Please try again.";
pub const COPIED_MESSAGE: &str = "Link copied to clipboard";
pub const NO_MEETINGS_MESSAGE: &str = "No meetings scheduled yet";

pub const MIN_DURATION: u32 = 15;
pub const DURATION_STEP: u32 = 15;
pub const DEFAULT_DURATION: u32 = 30;
pub const DEFAULT_MAX_DAYS_IN_ADVANCE: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct LinkWithMeetings {
    pub link: SchedulingLink,
    pub meetings: Vec<Meeting>,
}

/// Loads every link, then its meetings with one concurrent request per link.
///
/// A failed meetings request yields an empty list for that link. Failure of the
/// link list itself is returned; render it with `message_or(LOAD_FALLBACK)`.
pub async fn load_links(api: &ApiClient) -> Result<Vec<LinkWithMeetings>, ApiError> {
    let links = api.list_links().await?;

    let meetings = join_all(links.iter().map(|link| api.list_meetings(&link.id))).await;

    let mut loaded = Vec::with_capacity(links.len());
    for (link, meetings) in links.into_iter().zip(meetings) {
        let meetings = match meetings {
            Ok(meetings) => meetings,
            Err(err) if err.is_unauthorized() => return Err(err),
            Err(err) => {
                warn!("Failed to fetch meetings for link {}: {}", link.id, err);
                Vec::new()
            }
        };
        loaded.push(LinkWithMeetings { link, meetings });
    }
    Ok(loaded)
}

/// Public booking page of a link.
pub fn share_url(origin: &str, link_id: &str) -> String {
    format!("{}/schedule/{}", origin.trim_end_matches('/'), link_id)
}

/// Values of the "create link" dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkForm {
    pub title: String,
    pub duration: u32,
    pub max_uses: Option<u32>,
    pub expires_at: Option<NaiveDate>,
    pub max_days_in_advance: u32,
    pub custom_questions: Vec<String>,
}

impl Default for LinkForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            duration: DEFAULT_DURATION,
            max_uses: None,
            expires_at: None,
            max_days_in_advance: DEFAULT_MAX_DAYS_IN_ADVANCE,
            custom_questions: Vec::new(),
        }
    }
}

impl LinkForm {
    /// Appends a trimmed question. Blank input is ignored.
    pub fn add_question(&mut self, question: &str) -> bool {
        let question = question.trim();
        if question.is_empty() {
            return false;
        }
        self.custom_questions.push(question.to_string());
        true
    }

    pub fn remove_question(&mut self, index: usize) {
        if index < self.custom_questions.len() {
            self.custom_questions.remove(index);
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty() && self.duration >= MIN_DURATION
    }

    /// Request body; the expiry date is taken as midnight in the display zone.
    pub fn to_request(&self, tz: Tz) -> NewSchedulingLink {
        let expires_at = self.expires_at.and_then(|date| {
            date.and_hms_opt(0, 0, 0)
                .and_then(|midnight| tz.from_local_datetime(&midnight).earliest())
                .map(|local| local.with_timezone(&Utc))
        });
        NewSchedulingLink {
            title: self.title.trim().to_string(),
            duration: self.duration,
            max_uses: self.max_uses.filter(|uses| *uses > 0),
            expires_at,
            max_days_in_advance: self.max_days_in_advance,
            custom_questions: self.custom_questions.clone(),
        }
    }
}

/// Creates a link from `form`.
///
/// On success the link is appended to `links` with no meetings and the form is
/// reset; on failure the form is kept for another try. Returns whether a link was
/// created. `links` may be a scratch list when the caller refetches afterwards.
pub async fn create_link(
    api: &ApiClient,
    form: &mut LinkForm,
    links: &mut Vec<LinkWithMeetings>,
    tz: Tz,
    report: &mut impl FnMut(Feedback),
) -> Result<bool, ApiError> {
    if !form.can_submit() {
        return Ok(false);
    }

    match api.create_link(&form.to_request(tz)).await {
        Ok(link) => {
            info!("Scheduling link {} created", link.id);
            links.push(LinkWithMeetings {
                link,
                meetings: Vec::new(),
            });
            *form = LinkForm::default();
            report(Feedback::success(CREATED_MESSAGE));
            Ok(true)
        }
        Err(err) if err.is_unauthorized() => Err(err),
        Err(err) => {
            log_error(&err, "Failed to create scheduling link");
            report(Feedback::error(CREATE_FAILED));
            Ok(false)
        }
    }
}
