use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct PayrollQuery {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub staff_id: Option<i64>,
}

impl PayrollQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.from_date > self.to_date {
            return Err(AppError::Validation("The start date must not be after the end date.".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayBlock {
    #[serde(rename = "type")]
    pub kind: String,
    /// Minutes worked in this block.
    #[serde(deserialize_with = "super::de_number")]
    pub duration: f64,
    #[serde(deserialize_with = "super::de_number")]
    pub pay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPay {
    pub date: String,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub blocks: Vec<PayBlock>,
    #[serde(deserialize_with = "super::de_number")]
    pub daily_pay: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPayroll {
    pub staff_id: i64,
    pub full_name: String,
    #[serde(deserialize_with = "super::de_number")]
    pub total_pay: f64,
    #[serde(default)]
    pub daily_breakdown: Vec<DailyPay>,
}
