// Display formatting - fixed pt-BR locale, fixed dashboard timezone
use crate::domain::reading::{DASHBOARD_TZ, Timestamp};
use chrono::{DateTime, Locale, TimeZone, Utc};

pub const UNAVAILABLE: &str = "N/D";
pub const INVALID_DATE: &str = "Data inválida";
pub const DATE_UNAVAILABLE: &str = "Data não disponível";

const LOCALE: Locale = Locale::pt_BR;

/// Chart x-axis tick, time of day only. Empty for non-finite input.
pub fn axis_tick_label(time_ms: f64) -> String {
    local_time(time_ms)
        .map(|at| at.format("%H:%M").to_string())
        .unwrap_or_default()
}

pub fn tooltip_time_label(time_ms: f64) -> String {
    local_time(time_ms)
        .map(|at| at.format("%d/%m/%Y, %H:%M:%S").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// e.g. `10 de maio de 2024, 12:30:00`
pub fn latest_timestamp_label(timestamp: &Timestamp) -> String {
    match timestamp {
        Timestamp::Missing => DATE_UNAVAILABLE.to_string(),
        Timestamp::Invalid => INVALID_DATE.to_string(),
        Timestamp::At(at) => at
            .with_timezone(&DASHBOARD_TZ)
            .format_localized("%-d de %B de %Y, %H:%M:%S", LOCALE)
            .to_string(),
    }
}

pub fn distance_label(distance: Option<f64>) -> String {
    format_number(distance, 0, " cm")
}

pub fn level_label(level: Option<f64>) -> String {
    format_number(level, 0, "%")
}

pub fn tooltip_value_label(distance: Option<f64>) -> String {
    format_number(distance, 1, " cm")
}

fn format_number(value: Option<f64>, decimals: usize, suffix: &str) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let scale = 10f64.powi(decimals as i32);
            // round half away from zero, and never print "-0"
            let rounded = (v * scale).round() / scale + 0.0;
            format!("{:.*}{}", decimals, rounded, suffix)
        }
        None => UNAVAILABLE.to_string(),
    }
}

fn local_time(time_ms: f64) -> Option<DateTime<chrono_tz::Tz>> {
    if !time_ms.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(time_ms as i64)
        .single()
        .map(|at| at.with_timezone(&DASHBOARD_TZ))
}
