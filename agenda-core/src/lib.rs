//! Logic lõi của panel đặt lịch khám cho bệnh nhân.

mod appointment;
mod config;
pub mod date;
mod error;
mod panel;
mod slot;

pub use appointment::{
    in_progress_seed, Appointment, AppointmentId, AppointmentStatus, CurrentUser,
};
pub use config::PanelConfig;
pub use date::{format_display_date, DateParts, DisplayDate};
pub use error::AgendaError;
pub use panel::{
    AppointmentForm, ConfirmRequest, PanelAction, PanelSection, PanelState, SectionKind,
};
pub use slot::TimeSlot;
