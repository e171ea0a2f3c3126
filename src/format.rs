//! Display helpers shared by the OT, payroll, student and schedule views.
//!
//! Durations arrive from the backend in several shapes (an interval object,
//! an `HH:MM[:SS]` string, or an approved breakdown). Everything here is
//! total: malformed input produces a sentinel string, never an error.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::models::parse_calendar_date;

pub const NOT_AVAILABLE: &str = "N/A";
pub const FORMAT_ERROR: &str = "Lỗi định dạng";

/// Vietnam has no daylight saving time, so a fixed offset is exact.
const VN_UTC_OFFSET_HOURS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationStyle {
    /// `2 giờ 15 phút`
    #[default]
    Long,
    /// `2h 15p`
    Compact,
}

impl DurationStyle {
    pub fn render(self, hours: u32, minutes: u32) -> String {
        match self {
            DurationStyle::Long => format!("{} giờ {} phút", hours, minutes),
            DurationStyle::Compact => format!("{}h {}p", hours, minutes),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationParts {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<u32>,
}

impl DurationParts {
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds: None,
        }
    }

    /// `None` when the total does not fit in a `u32`.
    pub fn total_minutes(&self) -> Option<u32> {
        clock_minutes(self.hours, self.minutes)
    }

    pub fn from_minutes(total: u32) -> Self {
        Self::new(total / 60, total % 60)
    }
}

/// One row of an approved OT breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownSegment {
    pub role_key: String,
    pub duration: DurationValue,
    #[serde(default = "unit_multiplier", deserialize_with = "crate::models::de_number")]
    pub multiplier: f64,
}

fn unit_multiplier() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Breakdown(Vec<BreakdownSegment>),
    Parts(DurationParts),
    Text(String),
}

impl DurationValue {
    /// Whole minutes represented by the value, `None` when it cannot be read.
    pub fn total_minutes(&self) -> Option<u32> {
        match self {
            DurationValue::Parts(parts) => parts.total_minutes(),
            DurationValue::Text(text) => parse_clock_text(text).and_then(|(h, m)| clock_minutes(h, m)),
            DurationValue::Breakdown(segments) => segments
                .iter()
                .try_fold(0u32, |total, s| total.checked_add(s.duration.total_minutes()?)),
        }
    }
}

pub fn format_duration(value: Option<&DurationValue>, style: DurationStyle) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(DurationValue::Parts(parts)) => style.render(parts.hours, parts.minutes),
        Some(DurationValue::Text(text)) if text.trim().is_empty() => NOT_AVAILABLE.to_string(),
        Some(DurationValue::Text(text)) => match parse_clock_text(text) {
            Some((hours, minutes)) => style.render(hours, minutes),
            None => FORMAT_ERROR.to_string(),
        },
        Some(DurationValue::Breakdown(segments)) if segments.is_empty() => NOT_AVAILABLE.to_string(),
        Some(DurationValue::Breakdown(segments)) => segments
            .iter()
            .map(|segment| {
                format!(
                    "{}: {} (x{})",
                    segment.role_key,
                    format_duration(Some(&segment.duration), style),
                    segment.multiplier
                )
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn clock_minutes(hours: u32, minutes: u32) -> Option<u32> {
    hours.checked_mul(60)?.checked_add(minutes)
}

/// `HH:MM[:SS]`, seconds ignored. Missing parts count as zero.
fn parse_clock_text(text: &str) -> Option<(u32, u32)> {
    let mut parts = text.trim().split(':');
    let hours = parts.next().filter(|p| !p.is_empty()).unwrap_or("0");
    let minutes = parts.next().unwrap_or("0");
    Some((hours.trim().parse().ok()?, minutes.trim().parse().ok()?))
}

/// Reads back a string produced by [`DurationStyle::render`] in either style.
pub fn parse_display(text: &str) -> Option<(u32, u32)> {
    let text = text.trim();

    if let Some(rest) = text.strip_suffix(" phút") {
        let (hours, minutes) = rest.split_once(" giờ ")?;
        return Some((hours.trim().parse().ok()?, minutes.trim().parse().ok()?));
    }

    let rest = text.strip_suffix('p')?;
    let (hours, minutes) = rest.split_once("h ")?;
    Some((hours.trim().parse().ok()?, minutes.trim().parse().ok()?))
}

/// Whole years between `birth` and `today`, counting a birthday only once
/// its month and day have been reached.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn age(birth: NaiveDate) -> i32 {
    age_on(birth, Local::now().date_naive())
}

/// Wall-clock time in Asia/Ho_Chi_Minh.
pub fn format_clock_vn(timestamp: &DateTime<Utc>) -> String {
    (timestamp.naive_utc() + TimeDelta::hours(VN_UTC_OFFSET_HOURS))
        .format("%H:%M:%S")
        .to_string()
}

pub fn format_date(raw: &str) -> String {
    match parse_calendar_date(raw) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

/// `1500000.0` renders as `1.500.000 ₫`.
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{} ₫", sign, grouped)
}
