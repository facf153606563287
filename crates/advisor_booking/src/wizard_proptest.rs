#[cfg(test)]
mod tests {
    use crate::wizard::{BookingWizard, WizardStep};
    use advisor_common::models::{SchedulingLink, TimeSlot};
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn link(questions: Vec<String>) -> SchedulingLink {
        SchedulingLink {
            id: "1".into(),
            title: "Call".into(),
            duration: 30,
            max_uses: None,
            expires_at: None,
            max_days_in_advance: 30,
            custom_questions: questions,
            is_active: true,
        }
    }

    fn slot() -> TimeSlot {
        let start = Utc.with_ymd_and_hms(2025, 6, 2, 10, 0, 0).unwrap();
        TimeSlot {
            start,
            end: start + Duration::minutes(30),
        }
    }

    // Text that is either blank or has visible content.
    fn field() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("   ".to_string()),
            "[a-z]{1,8}",
            " [a-z]{1,8} ",
        ]
    }

    proptest! {
        // Confirm is reachable exactly when every field has non-blank content
        #[test]
        fn test_confirm_requires_complete_details(
            email in field(),
            linkedin in field(),
            answers in prop::collection::vec(field(), 0..5),
        ) {
            let questions: Vec<String> = (0..answers.len()).map(|i| format!("Question {}?", i)).collect();
            let mut wizard = BookingWizard::new(link(questions));
            wizard.select_slot(slot()).unwrap();
            wizard.advance().unwrap();

            let mut details = wizard.details().clone();
            details.email = email.clone();
            details.linkedin_url = linkedin.clone();
            details.set_answers(answers.clone());
            wizard.update_details(details).unwrap();

            let complete = !email.trim().is_empty()
                && !linkedin.trim().is_empty()
                && answers.iter().all(|a| !a.trim().is_empty());

            prop_assert_eq!(wizard.advance().is_ok(), complete);
            let expected = if complete { WizardStep::Confirm } else { WizardStep::EnterDetails };
            prop_assert_eq!(wizard.step(), expected);
        }

        // Review shows exactly one pair per question, in link order
        #[test]
        fn test_confirmation_pairs_match_questions(count in 0usize..6) {
            let questions: Vec<String> = (0..count).map(|i| format!("Q{}", i)).collect();
            let mut wizard = BookingWizard::new(link(questions.clone()));
            wizard.select_slot(slot()).unwrap();
            wizard.advance().unwrap();

            let mut details = wizard.details().clone();
            details.email = "a@b.c".into();
            details.linkedin_url = "https://linkedin.com/in/a".into();
            details.set_answers((0..count).map(|i| format!("A{}", i)));
            wizard.update_details(details).unwrap();
            wizard.advance().unwrap();

            let pairs = wizard.confirmation_pairs();
            prop_assert_eq!(pairs.len(), count);
            for (i, (question, answer)) in pairs.iter().enumerate() {
                prop_assert_eq!(question.to_string(), format!("Q{}", i));
                prop_assert_eq!(answer.to_string(), format!("A{}", i));
            }
        }
    }
}
