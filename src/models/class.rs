use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntity {
    pub id: i64,
    pub class_name: String,
    pub class_code: String,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub total_sessions: Option<u32>,
    #[serde(default)]
    pub schedule_days: Option<Vec<String>>,
    #[serde(default)]
    pub schedule_time: Option<String>,
}

/// Class as embedded inside sessions, students and reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub class_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: i64,
    pub session_date: String,
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub class: Option<ClassRef>,
}

/// Body for both creating and editing a class.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload {
    pub class_name: String,
    pub class_code: String,
    pub academic_year: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub total_sessions: Option<i64>,
    pub schedule_days: Option<Vec<String>>,
    pub schedule_time: Option<String>,
}

impl ClassPayload {
    /// A schedule is considered requested as soon as any scheduling field is set.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();

        if self.class_name.trim().is_empty() {
            problems.push("Class name is required.".to_string());
        }
        if self.class_code.trim().is_empty() {
            problems.push("Class code is required.".to_string());
        }

        let days = self.schedule_days.as_deref().unwrap_or_default();
        let has_schedule = self.start_date.is_some()
            || self.total_sessions.is_some()
            || !days.is_empty()
            || self.schedule_time.as_deref().is_some_and(|t| !t.is_empty());

        if has_schedule {
            if !self.total_sessions.is_some_and(|n| n > 0) {
                problems.push("Total sessions must be a positive integer.".to_string());
            }
            if days.is_empty() {
                problems.push("Choose at least one day of the week.".to_string());
            }
            for day in days {
                if day.parse::<Weekday>().is_err() {
                    problems.push(format!("Unknown day of the week: {}", day));
                }
            }
            match self.schedule_time.as_deref() {
                None | Some("") => problems.push("Class time is required.".to_string()),
                Some(time) if super::parse_clock(time).is_none() => {
                    problems.push(format!("Class time must be HH:MM, got {}", time))
                }
                Some(_) => {}
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join(" ")))
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub session_date: NaiveDate,
    pub start_time: String,
}

impl UpdateSessionRequest {
    pub fn new(session_date: NaiveDate, start_time: NaiveTime) -> Self {
        Self {
            session_date,
            start_time: start_time.format("%H:%M:00").to_string(),
        }
    }
}
