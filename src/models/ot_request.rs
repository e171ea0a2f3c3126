use std::fmt;

use serde::{Deserialize, Serialize};

use super::attendance::StaffAttendance;
use super::schedule::{StaffRef, StaffSchedule};
use crate::format::{BreakdownSegment, DurationValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtStatus {
    Pending,
    Approved,
    Rejected,
}

impl OtStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtStatus::Pending => "pending",
            OtStatus::Approved => "approved",
            OtStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for OtStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtRequest {
    pub id: i64,
    pub staff_id: i64,
    #[serde(default)]
    pub staff: Option<StaffRef>,
    pub date: String,
    /// Excess time detected by the backend.
    #[serde(default)]
    pub detected_duration: Option<DurationValue>,
    pub status: OtStatus,
    #[serde(default)]
    pub breakdown: Option<Vec<BreakdownSegment>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub attendances: Vec<StaffAttendance>,
    #[serde(default)]
    pub schedules: Vec<StaffSchedule>,
}

impl OtRequest {
    pub fn staff_name(&self) -> &str {
        self.staff.as_ref().map(|s| s.full_name.as_str()).unwrap_or("N/A")
    }
}
