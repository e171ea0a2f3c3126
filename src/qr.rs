use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

const STUDENT_PREFIX: &str = "student_id:";
const STAFF_PREFIX: &str = "staff_id:";

/// Who a printed QR code identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrSubject {
    Student(i64),
    Staff(i64),
}

impl QrSubject {
    pub fn payload(&self) -> String {
        self.to_string()
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        let (prefix, ctor): (&str, fn(i64) -> QrSubject) = if raw.starts_with(STUDENT_PREFIX) {
            (STUDENT_PREFIX, QrSubject::Student)
        } else if raw.starts_with(STAFF_PREFIX) {
            (STAFF_PREFIX, QrSubject::Staff)
        } else {
            return Err(AppError::Validation(format!("Unrecognised QR code: {}", raw)));
        };

        raw[prefix.len()..]
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(ctor)
            .ok_or_else(|| AppError::Validation(format!("QR code carries an invalid id: {}", raw)))
    }
}

impl fmt::Display for QrSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QrSubject::Student(id) => write!(f, "{}{}", STUDENT_PREFIX, id),
            QrSubject::Staff(id) => write!(f, "{}{}", STAFF_PREFIX, id),
        }
    }
}

impl FromStr for QrSubject {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
