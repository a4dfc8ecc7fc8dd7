use agenda_core::{
    AgendaError, AppointmentId, AppointmentStatus, ConfirmRequest, CurrentUser, PanelAction,
    PanelConfig, PanelState, SectionKind, TimeSlot,
};
use chrono::{DateTime, TimeZone, Utc};

fn at(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis).unwrap()
}

fn fresh() -> PanelState {
    PanelState::new(PanelConfig::default()).expect("Cấu hình mặc định phải hợp lệ")
}

fn filled(reason: &str, date: &str, time: TimeSlot) -> PanelState {
    fresh()
        .apply(PanelAction::OpenDialog)
        .apply(PanelAction::ChangeReason(reason.to_string()))
        .apply(PanelAction::ChangeDate(date.to_string()))
        .apply(PanelAction::SelectTime(time))
}

fn confirm(millis: i64, user: Option<CurrentUser>) -> PanelAction {
    PanelAction::Confirm(ConfirmRequest::new(at(millis), user))
}

#[test]
fn initial_state_is_empty_with_seed() {
    let state = fresh();
    assert!(!state.dialog_open());
    assert!(!state.show_cancelled());
    assert_eq!(state.created().len(), 0);
    assert_eq!(state.in_progress().len(), 1);
    assert!(!state.confirm_enabled());
    assert_eq!(state.form().reason, "");
    assert_eq!(state.form().date, None);
    assert_eq!(state.form().time, None);
}

#[test]
fn unknown_locale_rejects_construction() {
    let config = PanelConfig {
        locale: "zz_ZZ".to_string(),
        ..PanelConfig::default()
    };
    assert_eq!(
        PanelState::new(config),
        Err(AgendaError::UnsupportedLocale("zz_ZZ".to_string()))
    );
}

#[test]
fn confirm_scenario_without_user() {
    let state = filled("Fiebre", "2025-11-09", TimeSlot::H10).apply(confirm(1_762_646_400_000, None));

    let created = state.created();
    assert_eq!(created.len(), 1);
    let appointment = &created[0];
    assert_eq!(appointment.date.as_str(), "09 NOV 2025");
    assert_eq!(appointment.time.label(), "10:00 AM");
    assert_eq!(appointment.doctor, "Dr. Usuario");
    assert_eq!(appointment.reason, "Fiebre");
    assert_eq!(appointment.diagnosis, "Pendiente de consulta");
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.id.as_str(), "1762646400000");

    assert!(!state.dialog_open());
    assert_eq!(state.form().reason, "");
    assert_eq!(state.form().date, None);
    assert_eq!(state.form().time, None);
}

#[test]
fn confirm_uses_current_user_name() {
    let user = CurrentUser {
        name: "Dra. Ana Torres".to_string(),
        email: Some("ana@example.org".to_string()),
    };
    let state = filled("Dolor de cabeza", "2025-12-01", TimeSlot::H15).apply(confirm(10, Some(user)));
    assert_eq!(state.created()[0].doctor, "Dra. Ana Torres");
}

#[test]
fn reason_is_trimmed() {
    let state = filled("  Tos seca \n", "2025-11-09", TimeSlot::H08).apply(confirm(10, None));
    assert_eq!(state.created()[0].reason, "Tos seca");
}

#[test]
fn incomplete_confirm_is_noop_and_keeps_dialog_open() {
    let cases = [
        filled("   ", "2025-11-09", TimeSlot::H10),
        filled("Fiebre", "2025-11-09", TimeSlot::H10).apply(PanelAction::ChangeDate(String::new())),
        filled("Fiebre", "2025-11-09", TimeSlot::H10)
            .apply(PanelAction::ChangeDate("2025-11-10".to_string())),
        fresh().apply(PanelAction::OpenDialog),
    ];

    for state in cases {
        let next = state.apply(confirm(42, None));
        assert_eq!(next, state);
        assert!(next.dialog_open());
        assert_eq!(next.created().len(), 0);
    }
}

#[test]
fn try_confirm_reports_first_missing_field() {
    let state = fresh().apply(PanelAction::OpenDialog);
    let request = ConfirmRequest::new(at(1), None);
    assert_eq!(state.try_confirm(&request), Err(AgendaError::MissingReason));

    let state = state.apply(PanelAction::ChangeReason("Fiebre".to_string()));
    assert_eq!(state.try_confirm(&request), Err(AgendaError::MissingDate));

    let state = state.apply(PanelAction::ChangeDate("2025-11-09".to_string()));
    assert_eq!(state.try_confirm(&request), Err(AgendaError::MissingTime));
}

#[test]
fn invalid_date_input_leaves_date_unset() {
    let state = filled("Fiebre", "2025-13-40", TimeSlot::H10);
    assert_eq!(state.form().date, None);
    assert!(!state.confirm_enabled());
}

#[test]
fn cancel_dialog_keeps_form_fields() {
    let state = filled("Fiebre", "2025-11-09", TimeSlot::H11).apply(PanelAction::CancelDialog);
    assert!(!state.dialog_open());
    assert_eq!(state.form().reason, "Fiebre");
    assert!(state.form().date.is_some());
    assert_eq!(state.form().time, Some(TimeSlot::H11));

    let reopened = state.apply(PanelAction::OpenDialog);
    assert!(reopened.dialog_open());
    assert_eq!(reopened.form(), state.form());
}

#[test]
fn selecting_a_slot_replaces_previous_choice() {
    let state = filled("Fiebre", "2025-11-09", TimeSlot::H10).apply(PanelAction::SelectTime(TimeSlot::H16));
    assert_eq!(state.form().time, Some(TimeSlot::H16));
}

#[test]
fn consecutive_confirms_get_distinct_ordered_ids() {
    let first = filled("Fiebre", "2025-11-09", TimeSlot::H10).apply(confirm(5_000, None));
    let second = first
        .apply(PanelAction::OpenDialog)
        .apply(PanelAction::ChangeReason("Control".to_string()))
        .apply(PanelAction::ChangeDate("2025-11-10".to_string()))
        .apply(PanelAction::SelectTime(TimeSlot::H12))
        .apply(confirm(5_000, None));

    let reasons: Vec<&str> = second.scheduled().map(|a| a.reason.as_str()).collect();
    assert_eq!(reasons, ["Fiebre", "Control"]);

    let ids: Vec<&str> = second.created().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["5000", "5001"]);
}

#[test]
fn clock_going_backwards_still_yields_unique_ids() {
    let first = filled("A", "2025-11-09", TimeSlot::H10).apply(confirm(9_000, None));
    let second = first
        .apply(PanelAction::ChangeReason("B".to_string()))
        .apply(PanelAction::ChangeDate("2025-11-09".to_string()))
        .apply(PanelAction::SelectTime(TimeSlot::H10))
        .apply(confirm(1_000, None));
    assert_eq!(second.created()[1].id.as_str(), "9001");
}

#[test]
fn toggle_show_cancelled_controls_cancelled_section() {
    let state = fresh();
    let kinds: Vec<SectionKind> = state.sections().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, [SectionKind::Scheduled, SectionKind::InProgress]);

    let toggled = state.apply(PanelAction::ToggleShowCancelled);
    assert!(toggled.show_cancelled());
    let kinds: Vec<SectionKind> = toggled.sections().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        [SectionKind::Scheduled, SectionKind::InProgress, SectionKind::Cancelled]
    );

    assert!(!toggled.apply(PanelAction::ToggleShowCancelled).show_cancelled());
}

#[test]
fn cancelling_moves_appointment_between_views() {
    let state = filled("Fiebre", "2025-11-09", TimeSlot::H10)
        .apply(confirm(7, None))
        .apply(PanelAction::ToggleShowCancelled);
    let id = AppointmentId::new("7");

    let cancelled = state.apply(PanelAction::CancelAppointment(id.clone()));
    assert_eq!(cancelled.created().len(), 1);
    assert_eq!(cancelled.scheduled().count(), 0);
    let ids: Vec<&AppointmentId> = cancelled.cancelled().map(|a| &a.id).collect();
    assert_eq!(ids, [&id]);

    assert_eq!(
        cancelled.try_cancel(&id),
        Err(AgendaError::AlreadyCancelled(id.clone()))
    );
}

#[test]
fn cancel_rejects_unknown_and_seed_ids() {
    let state = fresh();
    let unknown = AppointmentId::new("nope");
    assert_eq!(
        state.try_cancel(&unknown),
        Err(AgendaError::UnknownAppointment(unknown.clone()))
    );

    let seed_id = state.in_progress()[0].id.clone();
    assert_eq!(
        state.try_cancel(&seed_id),
        Err(AgendaError::NotCancellable(seed_id.clone()))
    );
    assert_eq!(state.apply(PanelAction::CancelAppointment(seed_id)), state);
}

#[test]
fn in_progress_list_never_changes() {
    let initial = fresh();
    let seed = initial.in_progress().to_vec();

    let mut state = initial;
    for n in 0..5 {
        state = state
            .apply(PanelAction::OpenDialog)
            .apply(PanelAction::ChangeReason(format!("Motivo {n}")))
            .apply(PanelAction::ChangeDate("2025-11-09".to_string()))
            .apply(PanelAction::SelectTime(TimeSlot::ALL[n]))
            .apply(confirm(n as i64, None))
            .apply(PanelAction::ToggleShowCancelled);
    }
    let state = state.apply(PanelAction::CancelAppointment(AppointmentId::new("2")));

    assert_eq!(state.created().len(), 5);
    assert_eq!(state.in_progress(), seed.as_slice());
}

#[test]
fn state_survives_json_round_trip() {
    let state = filled("Fiebre", "2025-11-09", TimeSlot::H10)
        .apply(confirm(3_000, None))
        .apply(PanelAction::CancelAppointment(AppointmentId::new("3000")))
        .apply(PanelAction::ToggleShowCancelled)
        .apply(PanelAction::OpenDialog)
        .apply(PanelAction::ChangeReason("Control".to_string()))
        .apply(PanelAction::ChangeDate("2025-11-10".to_string()))
        .apply(PanelAction::SelectTime(TimeSlot::H17));

    let json = serde_json::to_value(&state).expect("Không serialize state");
    let restored: PanelState = serde_json::from_value(json).expect("Không đọc lại được state");
    assert_eq!(restored, state);

    let next = restored.apply(confirm(3_000, None));
    let ids: Vec<&str> = next.created().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["3000", "3001"]);
}

#[test]
fn restored_state_with_unknown_locale_is_rejected() {
    let state = filled("Fiebre", "2025-11-09", TimeSlot::H10);
    let mut json = serde_json::to_value(&state).unwrap();
    json["config"]["locale"] = serde_json::Value::from("zz_ZZ");

    let restored = serde_json::from_value::<PanelState>(json);
    let err = restored.expect_err("Locale lạ phải bị từ chối");
    assert!(err.to_string().contains("zz_ZZ"));
}

#[test]
fn restored_state_without_last_id_continues_after_existing_ids() {
    let state = filled("Fiebre", "2025-11-09", TimeSlot::H10).apply(confirm(8_000, None));
    let mut json = serde_json::to_value(&state).unwrap();
    json.as_object_mut().unwrap().remove("last_issued_id");

    let restored: PanelState = serde_json::from_value(json).unwrap();
    let next = restored
        .apply(PanelAction::ChangeReason("Tos".to_string()))
        .apply(PanelAction::ChangeDate("2025-11-09".to_string()))
        .apply(PanelAction::SelectTime(TimeSlot::H11))
        .apply(confirm(1_000, None));
    assert_eq!(next.created()[1].id.as_str(), "8001");
}

#[test]
fn reconfigure_swaps_config_and_keeps_appointments() {
    let state = filled("Fiebre", "2025-11-09", TimeSlot::H10).apply(confirm(1, None));
    let config = PanelConfig {
        default_doctor: "Dr. Guardia".to_string(),
        locale: "en_US".to_string(),
        ..PanelConfig::default()
    };

    let next = state.apply(PanelAction::Reconfigure(config.clone()));
    assert_eq!(next.config(), &config);
    assert_eq!(next.created(), state.created());

    let next = next
        .apply(PanelAction::ChangeReason("Tos".to_string()))
        .apply(PanelAction::ChangeDate("2026-03-01".to_string()))
        .apply(PanelAction::SelectTime(TimeSlot::H09))
        .apply(confirm(2, None));
    assert_eq!(next.created()[1].doctor, "Dr. Guardia");
    assert_eq!(next.created()[1].date.as_str(), "01 MAR 2026");
}

#[test]
fn reconfigure_with_unknown_locale_is_ignored() {
    let state = fresh();
    let config = PanelConfig {
        locale: "zz_ZZ".to_string(),
        ..PanelConfig::default()
    };
    assert_eq!(state.apply(PanelAction::Reconfigure(config)), state);
}
