use agenda_core::{
    ConfirmRequest, CurrentUser, PanelAction, PanelConfig, PanelSection, PanelState, TimeSlot,
};
use anyhow::{anyhow, Context};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Một lượt đặt lịch: `YYYY-MM-DD|HH:MM AM|lý do`.
#[derive(Debug, Clone)]
struct Booking {
    date: String,
    time: TimeSlot,
    reason: String,
}

fn parse_booking(value: &str) -> Result<Booking, String> {
    let mut fields = value.splitn(3, '|');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(date), Some(time), Some(reason)) => Ok(Booking {
            date: date.trim().to_string(),
            time: time.parse().map_err(|err| format!("{err}"))?,
            reason: reason.to_string(),
        }),
        _ => Err(format!("Cần dạng NGÀY|GIỜ|LÝ DO, nhận được {value:?}")),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "agenda-cli",
    about = "Mô phỏng panel đặt lịch khám và in danh sách lịch."
)]
struct Args {
    /// Lượt đặt lịch, dạng `2025-11-09|10:00 AM|Fiebre`. Có thể lặp lại.
    #[arg(short, long = "book", value_parser = parse_booking)]
    bookings: Vec<Booking>,
    /// Hủy lượt đặt lịch thứ N (đếm từ 1).
    #[arg(short, long = "cancel")]
    cancel: Vec<usize>,
    /// Tên bác sĩ đang đăng nhập.
    #[arg(long)]
    doctor: Option<String>,
    /// Tên bác sĩ mặc định khi không đăng nhập.
    #[arg(long)]
    default_doctor: Option<String>,
    /// Locale định dạng ngày (ví dụ `es_ES`, `en_US`).
    #[arg(long)]
    locale: Option<String>,
    /// Hiển thị cả nhóm lịch đã hủy.
    #[arg(long)]
    show_cancelled: bool,
    /// In kết quả dạng JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = PanelConfig::default();
    if let Some(doctor) = args.default_doctor.clone() {
        config.default_doctor = doctor;
    }
    if let Some(locale) = args.locale.clone() {
        config.locale = locale;
    }
    let mut state = PanelState::new(config).context("Cấu hình panel không hợp lệ")?;

    let current_user = args.doctor.clone().map(|name| CurrentUser { name, email: None });

    for (index, booking) in args.bookings.iter().enumerate() {
        let filled = state
            .apply(PanelAction::OpenDialog)
            .apply(PanelAction::ChangeReason(booking.reason.clone()))
            .apply(PanelAction::ChangeDate(booking.date.clone()))
            .apply(PanelAction::SelectTime(booking.time));
        let request = ConfirmRequest::new(Utc::now(), current_user.clone());
        state = filled
            .try_confirm(&request)
            .with_context(|| format!("Lượt đặt lịch #{} bị từ chối", index + 1))?;
    }

    for number in &args.cancel {
        let id = number
            .checked_sub(1)
            .and_then(|index| state.created().get(index))
            .map(|appointment| appointment.id.clone())
            .ok_or_else(|| anyhow!("Không có lượt đặt lịch #{number}"))?;
        state = state
            .try_cancel(&id)
            .with_context(|| format!("Không hủy được lượt #{number}"))?;
    }

    if args.show_cancelled {
        state = state.apply(PanelAction::ToggleShowCancelled);
    }

    let sections = state.sections();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&sections)?);
    } else {
        for section in &sections {
            print_section(section);
        }
    }

    Ok(())
}

fn print_section(section: &PanelSection<'_>) {
    println!("{} ({})", section.kind.title(), section.appointments.len());
    if section.appointments.is_empty() {
        println!("  {}", section.kind.empty_label());
    }
    for appointment in &section.appointments {
        println!(
            "  [{}] {} {} | {} | {} | {}",
            appointment.id,
            appointment.date,
            appointment.time,
            appointment.doctor,
            appointment.reason,
            appointment.diagnosis
        );
    }
}
