use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::error::AppError;
use crate::format::{BreakdownSegment, DurationParts, DurationValue, clock_minutes};
use crate::models::{OtRequest, OtStatus};
use crate::schedule::DaySummary;

/// One pay row entered by the approving admin.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub role_key: String,
    pub hours: u32,
    pub minutes: u32,
    pub multiplier: f64,
}

impl BreakdownRow {
    pub fn new(role_key: impl Into<String>, hours: u32, minutes: u32, multiplier: f64) -> Self {
        Self {
            role_key: role_key.into(),
            hours,
            minutes,
            multiplier,
        }
    }

    pub fn total_minutes(&self) -> Option<u32> {
        clock_minutes(self.hours, self.minutes)
    }

    fn effective_multiplier(&self) -> f64 {
        if self.multiplier.is_finite() && self.multiplier > 0.0 {
            self.multiplier
        } else {
            1.0
        }
    }

    fn into_segment(self) -> BreakdownSegment {
        let multiplier = self.effective_multiplier();
        BreakdownSegment {
            duration: DurationValue::Parts(DurationParts::new(self.hours, self.minutes)),
            role_key: self.role_key.trim().to_string(),
            multiplier,
        }
    }
}

/// Rows the edit form starts with: the whole detected duration on the first
/// role-key seen that day.
pub fn initial_rows(request: &OtRequest, summary: &DaySummary) -> Vec<BreakdownRow> {
    let detected = request
        .detected_duration
        .as_ref()
        .and_then(DurationValue::total_minutes)
        .unwrap_or(0);
    let parts = DurationParts::from_minutes(detected);
    let role_key = summary.role_keys.first().cloned().unwrap_or_default();

    vec![BreakdownRow::new(role_key, parts.hours, parts.minutes, 1.0)]
}

#[derive(Debug, Clone)]
pub enum OtDecision {
    Approve {
        rows: Vec<BreakdownRow>,
        notes: Option<String>,
    },
    Reject {
        notes: Option<String>,
    },
}

/// Body of `PATCH /ot-requests/:id/status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtStatusUpdate {
    pub status: OtStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<BreakdownSegment>>,
}

/// A decision that passed validation and is ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedDecision {
    pub update: OtStatusUpdate,
    pub entered_minutes: u32,
    pub detected_minutes: Option<u32>,
}

impl PreparedDecision {
    /// Whether the entered rows add up to the detected duration. Only
    /// meaningful for approvals; unknown detected time counts as balanced.
    pub fn is_balanced(&self) -> bool {
        match (self.update.status, self.detected_minutes) {
            (OtStatus::Approved, Some(detected)) => detected == self.entered_minutes,
            _ => true,
        }
    }
}

/// Checks an admin decision against the staff member's pay rates and builds
/// the status update. Nothing here touches the network.
pub fn prepare_decision(
    request: &OtRequest,
    rates: &BTreeMap<String, f64>,
    decision: OtDecision,
) -> Result<PreparedDecision, AppError> {
    let detected_minutes = request
        .detected_duration
        .as_ref()
        .and_then(DurationValue::total_minutes);

    let (rows, notes) = match decision {
        OtDecision::Reject { notes } => {
            return Ok(PreparedDecision {
                update: OtStatusUpdate {
                    status: OtStatus::Rejected,
                    notes: clean_notes(notes),
                    breakdown: None,
                },
                entered_minutes: 0,
                detected_minutes,
            });
        }
        OtDecision::Approve { rows, notes } => (rows, notes),
    };

    if rows.is_empty() {
        return Err(AppError::Validation("Add at least one pay row before approving.".to_string()));
    }

    for row in &rows {
        let role_key = row.role_key.trim();
        if role_key.is_empty() {
            return Err(AppError::Validation("Please choose a pay rate for every row.".to_string()));
        }
        if !rates.contains_key(role_key) {
            return Err(AppError::Validation(format!(
                "{} has no pay rate for role {}.",
                request.staff_name(),
                role_key
            )));
        }
        if row.minutes >= 60 {
            return Err(AppError::Validation(format!("Minutes must be below 60, got {}.", row.minutes)));
        }
    }

    let entered_minutes = rows
        .iter()
        .try_fold(0u32, |total, row| total.checked_add(row.total_minutes()?))
        .ok_or_else(|| AppError::Validation("The entered OT duration is too large.".to_string()))?;

    if let Some(detected) = detected_minutes {
        if detected != entered_minutes {
            warn!(
                ot_request_id = request.id,
                detected, entered = entered_minutes, "OT breakdown does not add up to the detected duration"
            );
        }
    }

    Ok(PreparedDecision {
        update: OtStatusUpdate {
            status: OtStatus::Approved,
            notes: clean_notes(notes),
            breakdown: Some(rows.into_iter().map(BreakdownRow::into_segment).collect()),
        },
        entered_minutes,
        detected_minutes,
    })
}

fn clean_notes(notes: Option<String>) -> Option<String> {
    notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}
