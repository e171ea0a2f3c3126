use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_OT_MULTIPLIER: f64 = 1.5;

fn default_ot_multiplier() -> f64 {
    DEFAULT_OT_MULTIPLIER
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: i64,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub break_duration: Option<String>,
    #[serde(default = "default_ot_multiplier", deserialize_with = "super::de_number")]
    pub ot_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftPayload {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub break_duration: String,
    pub ot_multiplier: f64,
}

impl Default for ShiftPayload {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            break_duration: "00:00:00".to_string(),
            ot_multiplier: DEFAULT_OT_MULTIPLIER,
        }
    }
}

impl ShiftPayload {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Shift name is required.".to_string()));
        }
        let start = super::parse_clock(&self.start_time);
        let end = super::parse_clock(&self.end_time);
        match (start, end) {
            (Some(start), Some(end)) if start < end => {}
            (Some(_), Some(_)) => {
                return Err(AppError::Validation("Shift must end after it starts.".to_string()));
            }
            _ => {
                return Err(AppError::Validation("Shift start and end must be HH:MM.".to_string()));
            }
        }
        if super::parse_clock(&self.break_duration).is_none() {
            return Err(AppError::Validation("Break duration must be HH:MM:SS.".to_string()));
        }
        if !(self.ot_multiplier.is_finite() && self.ot_multiplier > 0.0) {
            return Err(AppError::Validation("OT multiplier must be a positive number.".to_string()));
        }
        Ok(())
    }
}
