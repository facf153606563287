// --- File: crates/advisor_common/src/models.rs ---
//! Resources exchanged with the REST backend.
//!
//! The backend serialises identifiers as numbers while some routes hand them out as
//! strings, and list fields arrive as `null` when empty. Everything here is read
//! leniently: ids become strings, `null` lists become empty vectors.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The signed-in user, stored as JSON under the `userProfile` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, alias = "ID", deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "picture")]
    pub profile_picture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hubspot_id: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl UserProfile {
    /// Name shown in the header, falling back to the e-mail address.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// First letter of the display name, used when no picture is available.
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingLink {
    #[serde(alias = "ID", deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, alias = "Title")]
    pub title: String,
    /// Meeting length in minutes.
    #[serde(default, alias = "Duration")]
    pub duration: u32,
    #[serde(default, alias = "MaxUses")]
    pub max_uses: Option<u32>,
    #[serde(default, alias = "ExpiresAt")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "MaxDaysInAdvance")]
    pub max_days_in_advance: u32,
    /// Questions every invitee must answer, in display order.
    #[serde(default, alias = "CustomQuestions", deserialize_with = "question_list")]
    pub custom_questions: Vec<String>,
    #[serde(default = "default_true", alias = "IsActive")]
    pub is_active: bool,
}

/// Body of `POST /api/scheduling/links`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSchedulingLink {
    pub title: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub max_days_in_advance: u32,
    pub custom_questions: Vec<String>,
}

/// A recurring weekly availability block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingWindow {
    #[serde(alias = "ID", deserialize_with = "id_string")]
    pub id: String,
    /// 0 = Sunday .. 6 = Saturday
    #[serde(default, alias = "Weekday")]
    pub weekday: u8,
    #[serde(default, alias = "StartHour")]
    pub start_hour: u8,
    #[serde(default, alias = "EndHour")]
    pub end_hour: u8,
    #[serde(default = "default_true", alias = "IsActive")]
    pub is_active: bool,
}

/// Body of `POST /api/scheduling/windows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NewSchedulingWindow {
    pub start_hour: u8,
    pub end_hour: u8,
    pub weekday: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A booking made through a scheduling link, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    #[serde(alias = "ID", deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, alias = "ClientEmail")]
    pub client_email: String,
    #[serde(default, alias = "LinkedInURL")]
    pub linkedin_url: String,
    #[serde(default, alias = "StartTime")]
    pub start_time: String,
    #[serde(default, alias = "EndTime")]
    pub end_time: String,
    /// "question: answer" lines.
    #[serde(default, alias = "Answers", deserialize_with = "null_as_empty")]
    pub answers: Vec<String>,
    /// JSON object serialised as a string; values are rendered as notes.
    #[serde(default, alias = "ContextNotes")]
    pub context_notes: String,
}

impl Meeting {
    /// Values of the context-notes object in key order. Unparsable notes yield nothing.
    pub fn note_values(&self) -> Vec<String> {
        if self.context_notes.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<BTreeMap<String, serde_json::Value>>(&self.context_notes) {
            Ok(map) => map
                .into_values()
                .map(|value| match value {
                    serde_json::Value::String(text) => text,
                    other => other.to_string(),
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

/// Body of `POST /api/scheduling/links/:id/meetings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeeting {
    pub client_email: String,
    pub linkedin_url: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Question text to answer.
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleAccount {
    #[serde(alias = "ID", deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub google_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default)]
    pub last_synced_at: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub calendar_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubSpotAccount {
    #[serde(alias = "ID", deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub hub_name: String,
    #[serde(default)]
    pub hub_domain: String,
    #[serde(default)]
    pub hub_timezone: String,
    #[serde(default)]
    pub last_synced_at: String,
}

/// An event from the user's connected Google calendars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw backend value; may not be a valid timestamp.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub calendar_id: String,
}

/// Envelope of `GET /api/google/calendar/events`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub total: Option<u64>,
}

fn default_true() -> bool {
    true
}

/// Reads an identifier that may be a JSON string or number. `null` becomes "".
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(text)) => text,
        Some(RawId::Unsigned(n)) => n.to_string(),
        Some(RawId::Signed(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Reads a list that the backend may send as `null`.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads custom questions sent either as a list or as a JSON-encoded list string.
pub fn question_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawQuestions {
        List(Vec<String>),
        Encoded(String),
    }

    match Option::<RawQuestions>::deserialize(deserializer)? {
        Some(RawQuestions::List(list)) => Ok(list),
        Some(RawQuestions::Encoded(text)) if text.trim().is_empty() => Ok(Vec::new()),
        Some(RawQuestions::Encoded(text)) => {
            serde_json::from_str(&text).map_err(de::Error::custom)
        }
        None => Ok(Vec::new()),
    }
}
