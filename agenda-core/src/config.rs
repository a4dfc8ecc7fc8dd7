use chrono::Locale;
use serde::{Deserialize, Serialize};

use crate::date::resolve_locale;
use crate::AgendaError;

/// Cấu hình hiển thị của panel đặt lịch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelConfig {
    /// Tên bác sĩ dùng khi không có người dùng đăng nhập.
    pub default_doctor: String,
    /// Chẩn đoán gán sẵn cho lịch mới tạo.
    pub pending_diagnosis: String,
    /// Locale POSIX để định dạng ngày (ví dụ `es_ES`).
    pub locale: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_doctor: "Dr. Usuario".to_string(),
            pending_diagnosis: "Pendiente de consulta".to_string(),
            locale: "es_ES".to_string(),
        }
    }
}

impl PanelConfig {
    pub fn date_locale(&self) -> Result<Locale, AgendaError> {
        resolve_locale(&self.locale)
    }
}
