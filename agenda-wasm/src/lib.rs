//! Bridge WASM <-> JavaScript trung lập framework cho panel đặt lịch.
//!
//! Trang nhúng giữ `PanelState` dưới dạng object JS và gửi từng hành động qua
//! [`apply_action`]; mọi quy tắc (reset giờ, điều kiện xác nhận) nằm ở `agenda-core`.

use agenda_core::{
    AgendaError, AppointmentForm, AppointmentId, ConfirmRequest, CurrentUser, PanelAction,
    PanelConfig, PanelSection, PanelState, TimeSlot,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsPanelConfig {
    #[serde(default)]
    default_doctor: Option<String>,
    #[serde(default)]
    pending_diagnosis: Option<String>,
    #[serde(default)]
    locale: Option<String>,
}

impl From<JsPanelConfig> for PanelConfig {
    fn from(cfg: JsPanelConfig) -> Self {
        let mut base = PanelConfig::default();
        if let Some(doctor) = cfg.default_doctor {
            base.default_doctor = doctor;
        }
        if let Some(diagnosis) = cfg.pending_diagnosis {
            base.pending_diagnosis = diagnosis;
        }
        if let Some(locale) = cfg.locale {
            base.locale = locale;
        }
        base
    }
}

/// Hành động gửi từ JS, phân biệt bằng trường `type`.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsPanelAction {
    OpenDialog,
    CancelDialog,
    ChangeReason {
        value: String,
    },
    ChangeDate {
        value: String,
    },
    SelectTime {
        slot: TimeSlot,
    },
    Confirm {
        #[serde(default)]
        current_user: Option<CurrentUser>,
        #[serde(default)]
        now_ms: Option<i64>,
    },
    ToggleShowCancelled,
    CancelAppointment {
        id: AppointmentId,
    },
    Reconfigure {
        config: JsPanelConfig,
    },
}

impl JsPanelAction {
    fn into_action(
        self,
        fallback_now: impl FnOnce() -> DateTime<Utc>,
    ) -> Result<PanelAction, String> {
        let action = match self {
            JsPanelAction::OpenDialog => PanelAction::OpenDialog,
            JsPanelAction::CancelDialog => PanelAction::CancelDialog,
            JsPanelAction::ChangeReason { value } => PanelAction::ChangeReason(value),
            JsPanelAction::ChangeDate { value } => PanelAction::ChangeDate(value),
            JsPanelAction::SelectTime { slot } => PanelAction::SelectTime(slot),
            JsPanelAction::Confirm {
                current_user,
                now_ms,
            } => {
                let now = match now_ms {
                    Some(millis) => Utc
                        .timestamp_millis_opt(millis)
                        .single()
                        .ok_or_else(|| format!("Mốc thời gian không hợp lệ: {millis}"))?,
                    None => fallback_now(),
                };
                PanelAction::Confirm(ConfirmRequest::new(now, current_user))
            }
            JsPanelAction::ToggleShowCancelled => PanelAction::ToggleShowCancelled,
            JsPanelAction::CancelAppointment { id } => PanelAction::CancelAppointment(id),
            JsPanelAction::Reconfigure { config } => {
                PanelAction::Reconfigure(PanelConfig::from(config))
            }
        };
        Ok(action)
    }
}

/// Dữ liệu đã tính sẵn để trang nhúng render.
#[derive(Serialize)]
struct PanelView<'a> {
    dialog_open: bool,
    show_cancelled: bool,
    confirm_enabled: bool,
    form: &'a AppointmentForm,
    sections: Vec<PanelSection<'a>>,
}

impl<'a> From<&'a PanelState> for PanelView<'a> {
    fn from(state: &'a PanelState) -> Self {
        Self {
            dialog_open: state.dialog_open(),
            show_cancelled: state.show_cancelled(),
            confirm_enabled: state.confirm_enabled(),
            form: state.form(),
            sections: state.sections(),
        }
    }
}

#[wasm_bindgen]
pub fn initial_state(config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let cfg = match config {
        Some(js_cfg) => {
            let cfg: JsPanelConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            PanelConfig::from(cfg)
        }
        None => PanelConfig::default(),
    };

    let state = PanelState::new(cfg).map_err(|err| JsValue::from_str(&format_agenda_error(err)))?;
    serialize_state(&state)
}

#[wasm_bindgen]
pub fn apply_action(state: JsValue, action: JsValue) -> Result<JsValue, JsValue> {
    let state = deserialize_state(state)?;
    let action: JsPanelAction = from_value(action)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được hành động: {err}")))?;
    let action = action
        .into_action(Utc::now)
        .map_err(|err| JsValue::from_str(&err))?;

    serialize_state(&state.apply(action))
}

#[wasm_bindgen]
pub fn panel_view(state: JsValue) -> Result<JsValue, JsValue> {
    let state = deserialize_state(state)?;
    to_value(&PanelView::from(&state))
        .map_err(|err| JsValue::from_str(&format!("Không serialize view: {err}")))
}

#[wasm_bindgen]
pub fn time_slots() -> Result<JsValue, JsValue> {
    to_value(&TimeSlot::ALL)
        .map_err(|err| JsValue::from_str(&format!("Không serialize khung giờ: {err}")))
}

/// Định dạng ngày ISO (`YYYY-MM-DD`) thành `DD MON YYYY`.
#[wasm_bindgen]
pub fn format_display_date(iso_date: &str, locale: Option<String>) -> Result<String, JsValue> {
    let date = agenda_core::date::parse_input_date(iso_date)
        .ok_or_else(|| JsValue::from_str(&format!("Ngày không hợp lệ: {iso_date}")))?;
    let locale_name = locale.unwrap_or_else(|| PanelConfig::default().locale);
    let locale = agenda_core::date::resolve_locale(&locale_name)
        .map_err(|err| JsValue::from_str(&format_agenda_error(err)))?;
    Ok(agenda_core::format_display_date(date, locale).to_string())
}

fn deserialize_state(state: JsValue) -> Result<PanelState, JsValue> {
    from_value(state).map_err(|err| JsValue::from_str(&format!("Không đọc được state: {err}")))
}

fn serialize_state(state: &PanelState) -> Result<JsValue, JsValue> {
    to_value(state).map_err(|err| JsValue::from_str(&format!("Không serialize state: {err}")))
}

fn format_agenda_error(err: AgendaError) -> String {
    format!("Agenda error: {err}")
}
