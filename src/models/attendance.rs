use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckType {
    #[serde(rename = "check-in")]
    CheckIn,
    #[serde(rename = "check-out")]
    CheckOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAttendance {
    pub id: i64,
    #[serde(default)]
    pub staff_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: CheckType,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualStaffAttendance {
    pub staff_id: i64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: CheckType,
}

/// Class session a student may be marked present for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSession {
    pub id: i64,
    #[serde(default)]
    pub subject_name: Option<String>,
    pub session_date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualAttendanceRequest {
    pub student_id: i64,
    pub session_ids: Vec<i64>,
}

impl ManualAttendanceRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.session_ids.is_empty() {
            return Err(AppError::Validation("Select at least one session to mark attendance.".to_string()));
        }
        Ok(())
    }
}
