//! Trạng thái panel đặt lịch và các phép chuyển trạng thái.
//!
//! `PanelState` là giá trị bất biến: mỗi hành động của người dùng đi qua
//! [`PanelState::apply`] và trả về trạng thái mới.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::appointment::in_progress_seed;
use crate::date::{format_display_date, parse_input_date};
use crate::{
    AgendaError, Appointment, AppointmentId, AppointmentStatus, CurrentUser, PanelConfig,
    TimeSlot,
};

/// Ba trường của hộp thoại tạo lịch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentForm {
    pub reason: String,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
}

impl AppointmentForm {
    /// Đủ điều kiện xác nhận: có lý do (sau khi trim), ngày và khung giờ.
    pub fn is_complete(&self) -> bool {
        self.validated().is_ok()
    }

    fn validated(&self) -> Result<(NaiveDate, TimeSlot, &str), AgendaError> {
        let reason = self.reason.trim();
        if reason.is_empty() {
            return Err(AgendaError::MissingReason);
        }
        let date = self.date.ok_or(AgendaError::MissingDate)?;
        let time = self.time.ok_or(AgendaError::MissingTime)?;
        Ok((date, time, reason))
    }
}

/// Ngữ cảnh lúc bấm xác nhận.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmRequest {
    pub now: DateTime<Utc>,
    pub current_user: Option<CurrentUser>,
}

impl ConfirmRequest {
    pub fn new(now: DateTime<Utc>, current_user: Option<CurrentUser>) -> Self {
        Self { now, current_user }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    OpenDialog,
    CancelDialog,
    ChangeReason(String),
    /// Giá trị thô của ô nhập ngày (`YYYY-MM-DD` hoặc rỗng).
    ChangeDate(String),
    SelectTime(TimeSlot),
    Confirm(ConfirmRequest),
    ToggleShowCancelled,
    CancelAppointment(AppointmentId),
    /// Thay cấu hình khi trang nhúng đổi props; giữ nguyên danh sách lịch.
    Reconfigure(PanelConfig),
}

/// Nhóm hiển thị trên panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Scheduled,
    InProgress,
    Cancelled,
}

impl SectionKind {
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Scheduled => "Consultas agendadas",
            SectionKind::InProgress => "Consultas iniciadas",
            SectionKind::Cancelled => "Consultas canceladas",
        }
    }

    pub fn empty_label(self) -> &'static str {
        match self {
            SectionKind::Scheduled => "No tienes consultas agendadas.",
            SectionKind::InProgress => "No hay consultas en curso.",
            SectionKind::Cancelled => "No hay consultas canceladas.",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PanelSection<'a> {
    pub kind: SectionKind,
    pub appointments: Vec<&'a Appointment>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "StoredPanelState")]
pub struct PanelState {
    show_cancelled: bool,
    scheduled: Vec<Appointment>,
    in_progress: Vec<Appointment>,
    dialog_open: bool,
    form: AppointmentForm,
    config: PanelConfig,
    last_issued_id: Option<i64>,
}

/// State đọc lại từ bên ngoài (JS, file), chưa qua kiểm tra.
#[derive(Deserialize)]
struct StoredPanelState {
    show_cancelled: bool,
    scheduled: Vec<Appointment>,
    in_progress: Vec<Appointment>,
    dialog_open: bool,
    form: AppointmentForm,
    config: PanelConfig,
    #[serde(default)]
    last_issued_id: Option<i64>,
}

impl TryFrom<StoredPanelState> for PanelState {
    type Error = AgendaError;

    fn try_from(stored: StoredPanelState) -> Result<Self, Self::Error> {
        stored.config.date_locale()?;
        // Mã mới phải lớn hơn mọi mã số đã có trong danh sách.
        let last_issued_id = stored
            .scheduled
            .iter()
            .filter_map(|appointment| appointment.id.as_str().parse::<i64>().ok())
            .chain(stored.last_issued_id)
            .max();
        Ok(Self {
            show_cancelled: stored.show_cancelled,
            scheduled: stored.scheduled,
            in_progress: stored.in_progress,
            dialog_open: stored.dialog_open,
            form: stored.form,
            config: stored.config,
            last_issued_id,
        })
    }
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            show_cancelled: false,
            scheduled: Vec::new(),
            in_progress: in_progress_seed(),
            dialog_open: false,
            form: AppointmentForm::default(),
            config: PanelConfig::default(),
            last_issued_id: None,
        }
    }
}

impl PanelState {
    /// Tạo panel mới; trả lỗi nếu locale trong cấu hình không hợp lệ.
    pub fn new(config: PanelConfig) -> Result<Self, AgendaError> {
        config.date_locale()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Áp dụng một hành động. Hành động bị từ chối trả về bản sao không đổi.
    pub fn apply(&self, action: PanelAction) -> PanelState {
        let mut next = self.clone();
        match action {
            PanelAction::OpenDialog => next.dialog_open = true,
            PanelAction::CancelDialog => next.dialog_open = false,
            PanelAction::ChangeReason(text) => next.form.reason = text,
            PanelAction::ChangeDate(raw) => {
                next.form.date = parse_input_date(&raw);
                // Khung giờ chỉ có nghĩa theo ngày đã chọn.
                next.form.time = None;
            }
            PanelAction::SelectTime(slot) => next.form.time = Some(slot),
            PanelAction::ToggleShowCancelled => next.show_cancelled = !next.show_cancelled,
            PanelAction::Confirm(request) => {
                return self.try_confirm(&request).unwrap_or_else(|err| {
                    debug!(error = %err, "bỏ qua xác nhận lịch khám");
                    next
                });
            }
            PanelAction::CancelAppointment(id) => {
                return self.try_cancel(&id).unwrap_or_else(|err| {
                    debug!(error = %err, "bỏ qua hủy lịch khám");
                    next
                });
            }
            PanelAction::Reconfigure(config) => match config.date_locale() {
                Ok(_) => next.config = config,
                Err(err) => debug!(error = %err, "bỏ qua cấu hình mới"),
            },
        }
        next
    }

    /// Xác nhận có kiểm tra: thêm lịch mới, đóng hộp thoại và xoá form.
    pub fn try_confirm(&self, request: &ConfirmRequest) -> Result<PanelState, AgendaError> {
        let (date, time, reason) = self.form.validated()?;
        let locale = self.config.date_locale()?;

        let id_millis = self.next_id_millis(request.now);
        let doctor = match &request.current_user {
            Some(user) => user.name.clone(),
            None => self.config.default_doctor.clone(),
        };
        let appointment = Appointment {
            id: AppointmentId::from_millis(id_millis),
            date: format_display_date(date, locale),
            time,
            doctor,
            reason: reason.to_string(),
            diagnosis: self.config.pending_diagnosis.clone(),
            status: AppointmentStatus::Scheduled,
        };
        info!(
            id = %appointment.id,
            date = %appointment.date,
            time = %appointment.time,
            "đã tạo lịch khám"
        );

        let mut next = self.clone();
        next.scheduled.push(appointment);
        next.last_issued_id = Some(id_millis);
        next.dialog_open = false;
        next.form = AppointmentForm::default();
        Ok(next)
    }

    /// Hủy một lịch đã đặt. Lịch vẫn nằm trong danh sách, chỉ đổi trạng thái.
    pub fn try_cancel(&self, id: &AppointmentId) -> Result<PanelState, AgendaError> {
        if self.in_progress.iter().any(|appointment| &appointment.id == id) {
            return Err(AgendaError::NotCancellable(id.clone()));
        }
        let index = self
            .scheduled
            .iter()
            .position(|appointment| &appointment.id == id)
            .ok_or_else(|| AgendaError::UnknownAppointment(id.clone()))?;
        if self.scheduled[index].status == AppointmentStatus::Cancelled {
            return Err(AgendaError::AlreadyCancelled(id.clone()));
        }

        let mut next = self.clone();
        next.scheduled[index].status = AppointmentStatus::Cancelled;
        info!(id = %id, "đã hủy lịch khám");
        Ok(next)
    }

    // Mã tăng nghiêm ngặt kể cả khi hai lần xác nhận cùng một mili giây.
    fn next_id_millis(&self, now: DateTime<Utc>) -> i64 {
        let now = now.timestamp_millis();
        match self.last_issued_id {
            Some(last) if now <= last => last + 1,
            _ => now,
        }
    }

    pub fn confirm_enabled(&self) -> bool {
        self.form.is_complete()
    }

    pub fn show_cancelled(&self) -> bool {
        self.show_cancelled
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn form(&self) -> &AppointmentForm {
        &self.form
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Toàn bộ lịch do người dùng tạo, theo thứ tự thêm vào (kể cả đã hủy).
    pub fn created(&self) -> &[Appointment] {
        &self.scheduled
    }

    pub fn scheduled(&self) -> impl Iterator<Item = &Appointment> {
        self.created_with(AppointmentStatus::Scheduled)
    }

    pub fn cancelled(&self) -> impl Iterator<Item = &Appointment> {
        self.created_with(AppointmentStatus::Cancelled)
    }

    pub fn in_progress(&self) -> &[Appointment] {
        &self.in_progress
    }

    fn created_with(&self, status: AppointmentStatus) -> impl Iterator<Item = &Appointment> {
        self.scheduled
            .iter()
            .filter(move |appointment| appointment.status == status)
    }

    /// Góc nhìn hợp nhất để render: đã đặt, đang khám, rồi đã hủy nếu bật công tắc.
    pub fn sections(&self) -> Vec<PanelSection<'_>> {
        let mut sections = vec![
            PanelSection {
                kind: SectionKind::Scheduled,
                appointments: self.scheduled().collect(),
            },
            PanelSection {
                kind: SectionKind::InProgress,
                appointments: self.in_progress.iter().collect(),
            },
        ];
        if self.show_cancelled {
            sections.push(PanelSection {
                kind: SectionKind::Cancelled,
                appointments: self.cancelled().collect(),
            });
        }
        sections
    }
}
