//! Định dạng ngày hiển thị trên thẻ lịch khám (`DD MON YYYY`).

use std::fmt;

use chrono::{Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::AgendaError;

const DISPLAY_FORMAT: &str = "%d %b %Y";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Chuỗi ngày đã định dạng sẵn, chỉ tạo một lần khi xác nhận lịch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DisplayDate(String);

/// Ba thành phần ngày dùng để dàn thẻ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts<'a> {
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
}

impl DisplayDate {
    /// Dùng cho dữ liệu viết tay (seed); không kiểm tra định dạng.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn parts(&self) -> Result<DateParts<'_>, AgendaError> {
        let mut tokens = self.0.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next(), tokens.next()) {
            (Some(day), Some(month), Some(year), None) => Ok(DateParts { day, month, year }),
            _ => Err(AgendaError::MalformedDisplayDate(self.0.clone())),
        }
    }
}

impl fmt::Display for DisplayDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tra bảng locale của chrono theo tên POSIX (`es_ES`, `en_US`...).
pub fn resolve_locale(name: &str) -> Result<Locale, AgendaError> {
    Locale::try_from(name.trim()).map_err(|_| AgendaError::UnsupportedLocale(name.to_string()))
}

/// Đọc giá trị từ ô nhập ngày (`YYYY-MM-DD`). Chuỗi rỗng hoặc sai định dạng coi như chưa chọn.
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, ISO_FORMAT).ok()
}

pub fn format_input_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Định dạng ngày theo locale rồi chuẩn hoá: tháng viết hoa, bỏ dấu chấm cuối.
pub fn format_display_date(date: NaiveDate, locale: Locale) -> DisplayDate {
    // Ngày lịch thuần, không quy đổi múi giờ.
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let localized = midnight
        .format_localized(DISPLAY_FORMAT, locale)
        .to_string();
    DisplayDate(normalize_localized(&localized))
}

fn normalize_localized(localized: &str) -> String {
    localized
        .split_whitespace()
        .map(|token| token.trim_end_matches('.').to_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}
