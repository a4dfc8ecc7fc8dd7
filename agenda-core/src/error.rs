use crate::appointment::AppointmentId;

/// Lỗi chung của panel đặt lịch khám.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgendaError {
    #[error("Chưa nhập lý do khám")]
    MissingReason,
    #[error("Chưa chọn ngày khám")]
    MissingDate,
    #[error("Chưa chọn khung giờ")]
    MissingTime,
    #[error("Khung giờ không hợp lệ: {0}")]
    UnknownSlot(String),
    #[error("Locale không được hỗ trợ: {0}")]
    UnsupportedLocale(String),
    #[error("Chuỗi ngày hiển thị sai định dạng: {0}")]
    MalformedDisplayDate(String),
    #[error("Không tìm thấy lịch khám {0}")]
    UnknownAppointment(AppointmentId),
    #[error("Lịch khám {0} không thể hủy")]
    NotCancellable(AppointmentId),
    #[error("Lịch khám {0} đã bị hủy trước đó")]
    AlreadyCancelled(AppointmentId),
}
