#[cfg(test)]
mod tests {
    use crate::wizard::{BookingWizard, InviteeDetails, WizardError, WizardState, WizardStep};
    use advisor_api::ApiError;
    use advisor_common::models::{SchedulingLink, TimeSlot};
    use chrono::{Duration, TimeZone, Utc};

    fn link(questions: &[&str]) -> SchedulingLink {
        SchedulingLink {
            id: "42".into(),
            title: "Intro call".into(),
            duration: 30,
            max_uses: None,
            expires_at: None,
            max_days_in_advance: 30,
            custom_questions: questions.iter().map(|q| q.to_string()).collect(),
            is_active: true,
        }
    }

    fn slot(hour: u32) -> TimeSlot {
        let start = Utc.with_ymd_and_hms(2025, 3, 4, hour, 0, 0).unwrap();
        TimeSlot {
            start,
            end: start + Duration::minutes(30),
        }
    }

    fn filled(wizard: &BookingWizard, answers: &[&str]) -> InviteeDetails {
        let mut details = wizard.details().clone();
        details.email = "jane@example.com".into();
        details.linkedin_url = "https://linkedin.com/in/jane".into();
        details.set_answers(answers.iter().copied());
        details
    }

    #[test]
    fn test_answers_start_empty_in_link_order() {
        let wizard = BookingWizard::new(link(&["Company?", "Role?"]));
        assert_eq!(wizard.step(), WizardStep::SelectTime);
        assert_eq!(
            wizard.details().answers,
            vec![
                ("Company?".to_string(), String::new()),
                ("Role?".to_string(), String::new())
            ]
        );
    }

    #[test]
    fn test_cannot_advance_without_slot() {
        let mut wizard = BookingWizard::new(link(&[]));
        assert_eq!(wizard.advance(), Err(WizardError::NoSlotSelected));
        assert_eq!(wizard.step(), WizardStep::SelectTime);
    }

    #[test]
    fn test_select_slot_replaces_previous_selection() {
        let mut wizard = BookingWizard::new(link(&[]));
        wizard.select_slot(slot(9)).unwrap();
        wizard.select_slot(slot(10)).unwrap();
        assert_eq!(wizard.slot(), Some(&slot(10)));
    }

    #[test]
    fn test_details_are_validated_in_order() {
        let mut wizard = BookingWizard::new(link(&["Company?"]));
        wizard.select_slot(slot(9)).unwrap();
        wizard.advance().unwrap();

        let mut details = wizard.details().clone();
        details.email = "   ".into();
        wizard.update_details(details.clone()).unwrap();
        assert_eq!(wizard.advance(), Err(WizardError::MissingEmail));

        details.email = "jane@example.com".into();
        wizard.update_details(details.clone()).unwrap();
        assert_eq!(wizard.advance(), Err(WizardError::MissingProfileUrl));

        details.linkedin_url = "https://linkedin.com/in/jane".into();
        wizard.update_details(details.clone()).unwrap();
        assert_eq!(
            wizard.advance(),
            Err(WizardError::UnansweredQuestion("Company?".into()))
        );

        details.set_answers(["Acme"]);
        wizard.update_details(details).unwrap();
        assert_eq!(wizard.advance(), Ok(()));
        assert_eq!(wizard.step(), WizardStep::Confirm);
    }

    #[test]
    fn test_back_keeps_entered_data() {
        let mut wizard = BookingWizard::new(link(&["Company?"]));
        wizard.select_slot(slot(9)).unwrap();
        wizard.advance().unwrap();
        let details = filled(&wizard, &["Acme"]);
        wizard.update_details(details.clone()).unwrap();
        wizard.advance().unwrap();

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::EnterDetails);
        assert_eq!(wizard.details(), &details);

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::SelectTime);
        assert_eq!(wizard.slot(), Some(&slot(9)));
        assert_eq!(wizard.details(), &details);

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::SelectTime);
    }

    #[test]
    fn test_transitions_rejected_in_wrong_step() {
        let mut wizard = BookingWizard::new(link(&[]));
        assert!(matches!(
            wizard.update_details(InviteeDetails::default()),
            Err(WizardError::InvalidStep(_))
        ));

        wizard.select_slot(slot(9)).unwrap();
        wizard.advance().unwrap();
        assert!(matches!(
            wizard.select_slot(slot(10)),
            Err(WizardError::InvalidStep(_))
        ));
        assert!(matches!(
            wizard.meeting_request(),
            Err(WizardError::InvalidStep(_))
        ));
    }

    #[test]
    fn test_confirmation_lists_every_question_in_order() {
        let questions = ["Company?", "Role?", "Goals?"];
        let mut wizard = BookingWizard::new(link(&questions));
        wizard.select_slot(slot(9)).unwrap();
        wizard.advance().unwrap();
        let details = filled(&wizard, &["Acme", "CTO", "Grow"]);
        wizard.update_details(details).unwrap();
        wizard.advance().unwrap();

        assert_eq!(
            wizard.confirmation_pairs(),
            vec![("Company?", "Acme"), ("Role?", "CTO"), ("Goals?", "Grow")]
        );

        let request = wizard.meeting_request().unwrap();
        assert_eq!(request.start_time, slot(9).start);
        assert_eq!(request.end_time, slot(9).end);
        assert_eq!(request.answers.len(), 3);
        assert_eq!(request.answers["Role?"], "CTO");
        assert!(matches!(wizard.state(), WizardState::Confirm { error: None, .. }));
    }

    fn confirmed(questions: &[&str], answers: &[&str]) -> BookingWizard {
        let mut wizard = BookingWizard::new(link(questions));
        wizard.select_slot(slot(9)).unwrap();
        wizard.advance().unwrap();
        let details = filled(&wizard, answers);
        wizard.update_details(details).unwrap();
        wizard.advance().unwrap();
        wizard
    }

    #[test]
    fn test_second_submit_while_in_flight_is_refused() {
        let mut wizard = confirmed(&["Company?"], &["Acme"]);

        let request = wizard.begin_submit().unwrap();
        assert_eq!(request.client_email, "jane@example.com");
        assert!(wizard.is_submitting());
        assert_eq!(wizard.begin_submit(), Err(WizardError::SubmitInProgress));

        // Back is ignored until the request settles.
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::Confirm);

        wizard.finish_submit(Ok(())).unwrap();
        assert_eq!(wizard.step(), WizardStep::Booked);
        assert!(!wizard.is_submitting());
    }

    #[test]
    fn test_failed_submit_allows_retry() {
        let mut wizard = confirmed(&[], &[]);
        wizard.begin_submit().unwrap();

        let err = wizard
            .finish_submit(Err(ApiError::Status {
                status_code: 409,
                message: Some("Slot taken".into()),
            }))
            .unwrap_err();

        assert_eq!(err, WizardError::SubmitFailed("Slot taken".into()));
        assert_eq!(wizard.submit_error(), Some("Slot taken"));
        assert!(!wizard.is_submitting());
        assert!(wizard.begin_submit().is_ok());
        assert_eq!(wizard.submit_error(), None);
    }
}
