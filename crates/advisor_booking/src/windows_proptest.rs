#[cfg(test)]
mod tests {
    use crate::windows::*;
    use advisor_common::models::SchedulingWindow;
    use proptest::prelude::*;

    #[test]
    fn test_form_defaults_and_labels() {
        let form = WindowForm::default();
        assert_eq!((form.weekday, form.start_hour, form.end_hour), (1, 9, 17));
        assert!(form.can_submit());

        assert_eq!(weekday_name(0), "Sunday");
        assert_eq!(weekday_name(6), "Saturday");
        assert_eq!(weekday_name(9), "Unknown");

        let window = SchedulingWindow {
            id: "1".into(),
            weekday: 1,
            start_hour: 9,
            end_hour: 17,
            is_active: true,
        };
        assert_eq!(hours_label(&window), "9:00 - 17:00");
    }

    proptest! {
        // The form only produces a request for a non-empty hour range
        #[test]
        fn test_request_only_for_valid_range(
            weekday in 0u8..7,
            start_hour in 0u8..=23,
            end_hour in 0u8..=23,
        ) {
            let form = WindowForm { weekday, start_hour, end_hour };
            let request = form.to_request();

            prop_assert_eq!(form.can_submit(), start_hour < end_hour);
            prop_assert_eq!(request.is_some(), start_hour < end_hour);
            if let Some(request) = request {
                prop_assert_eq!(request.start_hour, start_hour);
                prop_assert_eq!(request.end_hour, end_hour);
                prop_assert_eq!(request.weekday, weekday);
            }
        }
    }
}
