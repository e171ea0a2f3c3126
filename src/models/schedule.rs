use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::class::ClassSession;
use super::shift::Shift;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRef {
    pub id: i64,
    pub full_name: String,
}

/// Assignment of a staff member to a class session or to a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffSchedule {
    pub id: i64,
    pub staff_id: i64,
    #[serde(default)]
    pub staff: Option<StaffRef>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub class_session_id: Option<i64>,
    #[serde(default)]
    pub class_session: Option<ClassSession>,
    #[serde(default)]
    pub shift_id: Option<i64>,
    #[serde(default)]
    pub shift: Option<Shift>,
    #[serde(default)]
    pub role_key: Option<String>,
}

impl StaffSchedule {
    pub fn staff_name(&self) -> &str {
        self.staff.as_ref().map(|s| s.full_name.as_str()).unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAssignmentRequest {
    pub staff_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_session_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub role_key: String,
}

/// Weekdays are numbered from Sunday = 0 to Saturday = 6.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRangeAssignment {
    pub staff_id: i64,
    pub shift_id: i64,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub days_of_week: Vec<u8>,
}

impl ShiftRangeAssignment {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.days_of_week.is_empty() {
            return Err(AppError::Validation("Please fill in all fields, including at least one weekday.".to_string()));
        }
        if let Some(day) = self.days_of_week.iter().find(|d| **d > 6) {
            return Err(AppError::Validation(format!("Weekday {} is out of range 0-6.", day)));
        }
        if self.from_date > self.to_date {
            return Err(AppError::Validation("The start date must not be after the end date.".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAssignmentRow {
    pub staff_id: i64,
    pub role_key: String,
}

/// Full replacement of the staff assigned to one class session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAssignment {
    pub class_session_id: i64,
    pub assignments: Vec<SessionAssignmentRow>,
}

impl SessionAssignment {
    /// Rows still missing a staff member or a role-key are dropped.
    pub fn from_rows<I>(class_session_id: i64, rows: I) -> Self
    where
        I: IntoIterator<Item = (Option<i64>, Option<String>)>,
    {
        let assignments = rows
            .into_iter()
            .filter_map(|(staff_id, role_key)| match (staff_id, role_key) {
                (Some(staff_id), Some(role_key)) if !role_key.trim().is_empty() => Some(SessionAssignmentRow {
                    staff_id,
                    role_key: role_key.trim().to_string(),
                }),
                _ => None,
            })
            .collect();

        Self {
            class_session_id,
            assignments,
        }
    }
}

/// Moves an existing shift assignment onto another shift.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftChange {
    pub shift_id: i64,
}
