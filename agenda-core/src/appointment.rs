use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{DisplayDate, TimeSlot};

/// Mã định danh lịch khám, sinh từ mốc thời gian khi xác nhận.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AppointmentId(String);

impl AppointmentId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub(crate) fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trạng thái vòng đời của lịch khám.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    InProgress,
    Cancelled,
}

/// Một lịch khám ("consulta").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub date: DisplayDate,
    pub time: TimeSlot,
    pub doctor: String,
    pub reason: String,
    pub diagnosis: String,
    pub status: AppointmentStatus,
}

/// Người dùng đang đăng nhập do trang nhúng truyền vào. Chỉ `name` được dùng.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Danh sách "đang khám" cố định, chỉ để hiển thị ban đầu.
pub fn in_progress_seed() -> Vec<Appointment> {
    vec![Appointment {
        id: AppointmentId::new("seed-in-progress-1"),
        date: DisplayDate::new("05 NOV 2025"),
        time: TimeSlot::H09,
        doctor: "Dra. Laura Méndez".to_string(),
        reason: "Control de presión arterial".to_string(),
        diagnosis: "Hipertensión leve en seguimiento".to_string(),
        status: AppointmentStatus::InProgress,
    }]
}
