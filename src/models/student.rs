use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::class::ClassRef;
use super::parent::{NewParent, Parent};
use crate::error::AppError;
use crate::format;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassRef>,
    #[serde(default)]
    pub parent: Option<Parent>,
}

impl Student {
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.date_of_birth.as_deref().and_then(super::parse_calendar_date)
    }

    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date().map(|birth| format::age_on(birth, today))
    }

    pub fn class_codes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().filter_map(|c| c.class_code.as_deref())
    }
}

/// Body for `POST /students`, `POST /students/create-with-parent` and
/// `PATCH /students/:id`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i32>,
    pub gender: String,
    pub class_ids: Vec<i64>,
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_parent: Option<NewParent>,
}

impl StudentPayload {
    pub fn new(full_name: impl Into<String>, date_of_birth: NaiveDate, gender: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            full_name: full_name.into(),
            date_of_birth: Some(date_of_birth),
            age: Some(format::age_on(date_of_birth, today)),
            gender: gender.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();

        if self.full_name.trim().is_empty() {
            problems.push("Full name is required.".to_string());
        }
        if self.date_of_birth.is_none() {
            problems.push("Date of birth is required.".to_string());
        }
        if self.age.is_some_and(|age| age < 0) {
            problems.push("Date of birth is not valid.".to_string());
        }
        if self.gender.trim().is_empty() {
            problems.push("Gender is required.".to_string());
        }
        if let Some(parent) = &self.new_parent {
            if let Err(AppError::Validation(msg)) = parent.validate() {
                problems.push(msg);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join(" ")))
        }
    }
}
