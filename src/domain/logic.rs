// src/domain/logic.rs

use crate::domain::permit::BusinessPermit;
use crate::domain::status::{PaymentStatus, PermitStatus};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};

/// Parses a date as the store sends it and returns the calendar date in local time.
///
/// Accepts plain `YYYY-MM-DD`, RFC 3339 timestamps (converted to the local
/// timezone before taking the date) and naive `YYYY-MM-DDTHH:MM:SS` values.
pub fn parse_store_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Long display form used on screen and in exports: "February 5, 2025".
/// Values that don't parse as dates are shown unchanged.
pub fn display_date(raw: &str) -> String {
    match parse_store_date(raw) {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// True when the occupancy fee was paid during `current_year`.
pub fn is_paid_this_year(permit: &BusinessPermit, current_year: i32) -> bool {
    permit.payment_status_occupancy == PaymentStatus::Paid
        && permit
            .last_payment_date_occupancy
            .as_deref()
            .and_then(parse_store_date)
            .map(|d| d.year() == current_year)
            .unwrap_or(false)
}

/// Background tone for a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    Green,
    Yellow,
    Red,
    Plain,
}

impl RowTone {
    pub fn css_class(self) -> &'static str {
        match self {
            RowTone::Green => "row-green",
            RowTone::Yellow => "row-yellow",
            RowTone::Red => "row-red",
            RowTone::Plain => "row-plain",
        }
    }
}

pub fn status_tone(status: PermitStatus) -> RowTone {
    match status {
        PermitStatus::Approved => RowTone::Green,
        PermitStatus::Pending => RowTone::Yellow,
        PermitStatus::Rejected => RowTone::Red,
    }
}

/// Occupancy rows are green once paid for the current year, red otherwise.
pub fn payment_tone(permit: &BusinessPermit, current_year: i32) -> RowTone {
    if is_paid_this_year(permit, current_year) {
        RowTone::Green
    } else {
        RowTone::Red
    }
}
