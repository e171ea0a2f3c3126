pub mod attendance;
pub mod class;
pub mod ot_request;
pub mod parent;
pub mod payroll;
pub mod report;
pub mod schedule;
pub mod shift;
pub mod staff;
pub mod student;

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};

pub use attendance::{CheckType, ManualAttendanceRequest, ManualStaffAttendance, StaffAttendance, StudentSession};
pub use class::{ClassEntity, ClassPayload, ClassRef, ClassSession, UpdateSessionRequest};
pub use ot_request::{OtRequest, OtStatus};
pub use parent::{NewParent, Parent, ParentPayload};
pub use payroll::{DailyPay, PayBlock, PayrollQuery, StaffPayroll};
pub use report::{LinkKind, PdfFilePayload, ReportFile, ReportLink, ReportQuery, ScratchProject, StudentReport, StudentReportPayload};
pub use schedule::{SessionAssignment, SessionAssignmentRow, ShiftChange, ShiftRangeAssignment, StaffAssignmentRequest, StaffRef, StaffSchedule};
pub use shift::{Shift, ShiftPayload};
pub use staff::{Role, RolePayload, Staff, StaffPayload, User, UserPayload};
pub use student::{Student, StudentPayload};

/// Envelope used by the endpoints that honour `page`/`limit`.
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: Option<usize>,
}

/// List endpoints answer with either a bare array or a `{ data, total }`
/// envelope depending on whether paging parameters were sent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Items(Vec<T>),
    Paged(Paged<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Items(items) => items,
            Listing::Paged(paged) => paged.data,
        }
    }

    pub fn into_paged(self) -> Paged<T> {
        match self {
            Listing::Items(items) => Paged {
                total: Some(items.len()),
                data: items,
            },
            Listing::Paged(paged) => paged,
        }
    }
}

/// Reads the calendar part of either `YYYY-MM-DD` or a full ISO timestamp.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Reads `HH:MM` or `HH:MM:SS`.
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            RawNumber::Number(n) => Ok(n),
            RawNumber::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a number, got {:?}", s))),
        }
    }
}

/// Decimal columns come back from the backend as either JSON numbers or strings.
pub(crate) fn de_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    RawNumber::deserialize(deserializer)?.into_f64()
}

pub(crate) fn de_opt_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Option::<RawNumber>::deserialize(deserializer)?
        .map(RawNumber::into_f64)
        .transpose()
}

pub(crate) fn de_rates<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error> {
    let raw = Option::<BTreeMap<String, RawNumber>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(key, value)| value.into_f64().map(|rate| (key, rate)))
        .collect()
}
