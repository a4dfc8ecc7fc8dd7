use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AgendaError;

/// Khung giờ khám cố định, mỗi khung một tiếng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeSlot {
    #[serde(rename = "08:00 AM")]
    H08,
    #[serde(rename = "09:00 AM")]
    H09,
    #[serde(rename = "10:00 AM")]
    H10,
    #[serde(rename = "11:00 AM")]
    H11,
    #[serde(rename = "12:00 PM")]
    H12,
    #[serde(rename = "01:00 PM")]
    H13,
    #[serde(rename = "02:00 PM")]
    H14,
    #[serde(rename = "03:00 PM")]
    H15,
    #[serde(rename = "04:00 PM")]
    H16,
    #[serde(rename = "05:00 PM")]
    H17,
    #[serde(rename = "06:00 PM")]
    H18,
}

impl TimeSlot {
    /// Toàn bộ khung giờ theo thứ tự hiển thị.
    pub const ALL: [TimeSlot; 11] = [
        TimeSlot::H08,
        TimeSlot::H09,
        TimeSlot::H10,
        TimeSlot::H11,
        TimeSlot::H12,
        TimeSlot::H13,
        TimeSlot::H14,
        TimeSlot::H15,
        TimeSlot::H16,
        TimeSlot::H17,
        TimeSlot::H18,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TimeSlot::H08 => "08:00 AM",
            TimeSlot::H09 => "09:00 AM",
            TimeSlot::H10 => "10:00 AM",
            TimeSlot::H11 => "11:00 AM",
            TimeSlot::H12 => "12:00 PM",
            TimeSlot::H13 => "01:00 PM",
            TimeSlot::H14 => "02:00 PM",
            TimeSlot::H15 => "03:00 PM",
            TimeSlot::H16 => "04:00 PM",
            TimeSlot::H17 => "05:00 PM",
            TimeSlot::H18 => "06:00 PM",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = AgendaError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.label() == value)
            .ok_or_else(|| AgendaError::UnknownSlot(value.to_string()))
    }
}
