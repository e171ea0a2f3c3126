use chrono::{DateTime, Utc};

use crate::format::{NOT_AVAILABLE, format_clock_vn};
use crate::models::{CheckType, StaffAttendance, StaffSchedule};

pub const PART_TIME_ROLE_KEY: &str = "part-time";
const MISSING_CLOCK: &str = "??:??";

/// What one staff member's day looked like, for reviewing detected OT.
/// Display only: the authoritative OT duration comes from the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySummary {
    pub has_attendance: bool,
    pub first_check_in: Option<DateTime<Utc>>,
    pub last_check_out: Option<DateTime<Utc>>,
    /// Distinct role-keys in schedule order.
    pub role_keys: Vec<String>,
    pub assignment_lines: Vec<String>,
}

impl DaySummary {
    /// `HH:MM:SS - HH:MM:SS` in Vietnam time.
    pub fn check_in_out(&self) -> String {
        if !self.has_attendance {
            return NOT_AVAILABLE.to_string();
        }
        let clock = |ts: Option<DateTime<Utc>>| ts.map(|t| format_clock_vn(&t)).unwrap_or_else(|| MISSING_CLOCK.to_string());
        format!("{} - {}", clock(self.first_check_in), clock(self.last_check_out))
    }

    /// More than one role applied, so the OT may deserve several pay rows.
    pub fn needs_split(&self) -> bool {
        self.role_keys.len() > 1
    }
}

pub fn summarize_day(attendances: &[StaffAttendance], schedules: &[StaffSchedule]) -> DaySummary {
    let first_check_in = attendances
        .iter()
        .filter(|a| a.kind == CheckType::CheckIn)
        .map(|a| a.timestamp)
        .min();
    let last_check_out = attendances
        .iter()
        .filter(|a| a.kind == CheckType::CheckOut)
        .map(|a| a.timestamp)
        .max();

    let mut role_keys: Vec<String> = Vec::new();
    let mut assignment_lines = Vec::new();

    for schedule in schedules {
        let role_key = if let Some(session) = &schedule.class_session {
            let role = schedule.role_key.clone().unwrap_or_default();
            let class_name = session
                .class
                .as_ref()
                .and_then(|c| c.class_name.as_deref())
                .unwrap_or("Lớp học");
            assignment_lines.push(format!("[{}] {} ({})", role, class_name, session.start_time));
            role
        } else if let Some(shift) = &schedule.shift {
            let role = schedule
                .role_key
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| PART_TIME_ROLE_KEY.to_string());
            assignment_lines.push(format!("[{}] {} ({} - {})", role, shift.name, shift.start_time, shift.end_time));
            role
        } else {
            continue;
        };

        if !role_key.is_empty() && !role_keys.contains(&role_key) {
            role_keys.push(role_key);
        }
    }

    DaySummary {
        has_attendance: !attendances.is_empty(),
        first_check_in,
        last_check_out,
        role_keys,
        assignment_lines,
    }
}
