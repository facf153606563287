#[cfg(test)]
mod tests {
    use crate::events::*;
    use advisor_common::models::CalendarEvent;
    use chrono_tz::Tz;

    fn event(id: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.into(),
            summary: format!("Event {}", id),
            description: None,
            start_time: start.into(),
            end_time: end.into(),
            location: None,
            status: "confirmed".into(),
            calendar_id: "primary".into(),
        }
    }

    #[test]
    fn test_sort_by_start_puts_unreadable_last() {
        let mut events = vec![
            event("late", "2025-03-05T09:00:00Z", "2025-03-05T10:00:00Z"),
            event("broken", "soon", "later"),
            event("early", "2025-03-04T09:00:00Z", "2025-03-04T10:00:00Z"),
        ];
        sort_by_start(&mut events);

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late", "broken"]);
    }

    #[test]
    fn test_time_range() {
        let ok = event("1", "2025-03-04T09:00:00Z", "2025-03-04T09:30:00Z");
        assert_eq!(time_range(&ok, Tz::UTC), "Mar 4, 9:00 AM - 9:30 AM");

        let broken = event("2", "2025-03-04T09:00:00Z", "");
        assert_eq!(time_range(&broken, Tz::UTC), INVALID_DATE);
    }

    #[test]
    fn test_truncate_description() {
        let short = "Quarterly review";
        assert_eq!(truncate_description(short), short);

        let exact = "x".repeat(100);
        assert_eq!(truncate_description(&exact), exact);

        let long = "y".repeat(150);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.len(), 103);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_notices() {
        assert_eq!(EventsView::Ready(vec![]).notice(), Some(EMPTY_MESSAGE));
        assert_eq!(
            EventsView::Failed(LOAD_FAILED.into()).notice(),
            Some(LOAD_FAILED)
        );
    }
}
