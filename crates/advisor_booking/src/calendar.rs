// --- File: crates/advisor_booking/src/calendar.rs ---
//! Slot picker: month grid, date rules and slot loading for one link.

use advisor_api::{ApiClient, ApiError, Resource, ResourceKey, ResourceScheduler};
use advisor_common::models::TimeSlot;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

pub const SLOTS_FALLBACK: &str = "Failed to load available time slots";
pub const NO_SLOTS_MESSAGE: &str = "No available time slots for this date";
pub const SELECT_DATE_MESSAGE: &str = "Please select a date";

/// What the slot list shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotsView {
    NoDate,
    Loading,
    Failed(String),
    Ready(Vec<TimeSlot>),
}

impl SlotsView {
    /// Text shown instead of slots, if any.
    pub fn notice(&self) -> Option<&str> {
        match self {
            SlotsView::NoDate => Some(SELECT_DATE_MESSAGE),
            SlotsView::Loading => None,
            SlotsView::Failed(message) => Some(message),
            SlotsView::Ready(slots) if slots.is_empty() => Some(NO_SLOTS_MESSAGE),
            SlotsView::Ready(_) => None,
        }
    }
}

/// Calendar date of `now` in the display zone.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Last bookable date for a link allowing bookings `max_days_in_advance` days ahead.
/// Zero means no limit.
pub fn latest_bookable(today: NaiveDate, max_days_in_advance: u32) -> Option<NaiveDate> {
    if max_days_in_advance == 0 {
        return None;
    }
    today.checked_add_days(Days::new(u64::from(max_days_in_advance)))
}

/// A date can be picked from today on, up to `latest` when given.
pub fn is_date_selectable(date: NaiveDate, today: NaiveDate, latest: Option<NaiveDate>) -> bool {
    date >= today && latest.map_or(true, |latest| date <= latest)
}

/// Slot highlight test: exact start and end equality.
pub fn is_selected(slot: &TimeSlot, selected: Option<&TimeSlot>) -> bool {
    selected.is_some_and(|chosen| chosen.start == slot.start && chosen.end == slot.end)
}

/// Loads the slots of `link_id` on `date`.
///
/// Backend failures become `SlotsView::Failed`. Only a rejected session or a
/// superseded request is returned as an error, because the page must react to those.
pub async fn load_slots(
    api: &ApiClient,
    scheduler: &ResourceScheduler,
    scope: &str,
    link_id: &str,
    date: Option<NaiveDate>,
) -> Result<SlotsView, ApiError> {
    let Some(date) = date else {
        return Ok(SlotsView::NoDate);
    };

    let key = ResourceKey::new(
        scope,
        Resource::Slots {
            link_id: link_id.to_string(),
        },
    );
    let fetch = {
        let api = api.clone();
        let link_id = link_id.to_string();
        async move { api.available_slots(&link_id, date).await }
    };

    match scheduler.load(key, fetch).await {
        Ok(slots) => Ok(SlotsView::Ready(slots)),
        Err(err @ (ApiError::Unauthorized { .. } | ApiError::Superseded)) => Err(err),
        Err(err) => {
            warn!("Loading slots of link {} on {} failed: {}", link_id, date, err);
            Ok(SlotsView::Failed(err.message_or(SLOTS_FALLBACK)))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub selectable: bool,
    pub selected: bool,
    pub today: bool,
}

/// One month laid out in weeks starting on Sunday. Days outside the month are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub first_day: NaiveDate,
    pub weeks: Vec<[Option<DayCell>; 7]>,
    today: NaiveDate,
}

pub const WEEKDAY_HEADERS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

impl MonthGrid {
    /// Grid of the month containing `month`.
    pub fn new(
        month: NaiveDate,
        today: NaiveDate,
        latest: Option<NaiveDate>,
        selected: Option<NaiveDate>,
    ) -> Self {
        let first_day = month.with_day(1).unwrap_or(month);
        let days_in_month = days_in_month(first_day);
        let lead = first_day.weekday().num_days_from_sunday() as usize;

        let mut weeks = Vec::new();
        let mut week: [Option<DayCell>; 7] = [None; 7];
        let mut column = lead;
        for offset in 0..days_in_month {
            let Some(date) = first_day.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            week[column] = Some(DayCell {
                date,
                selectable: is_date_selectable(date, today, latest),
                selected: selected == Some(date),
                today: date == today,
            });
            column += 1;
            if column == 7 {
                weeks.push(week);
                week = [None; 7];
                column = 0;
            }
        }
        if column > 0 {
            weeks.push(week);
        }

        Self {
            first_day,
            weeks,
            today,
        }
    }

    /// "March 2025"
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }

    pub fn previous_month(&self) -> Option<NaiveDate> {
        self.first_day.checked_sub_months(Months::new(1))
    }

    pub fn next_month(&self) -> Option<NaiveDate> {
        self.first_day.checked_add_months(Months::new(1))
    }

    /// Navigating back is pointless once the grid shows the current month.
    pub fn can_go_back(&self) -> bool {
        self.first_day > self.today.with_day(1).unwrap_or(self.today)
    }
}

fn days_in_month(first_day: NaiveDate) -> u32 {
    match first_day.checked_add_months(Months::new(1)) {
        Some(next) => (next - first_day).num_days() as u32,
        None => 31,
    }
}
