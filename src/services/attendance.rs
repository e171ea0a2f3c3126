use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Value, json};
use tracing::info;

use crate::client::dto::QrScanRequest;
use crate::client::{ApiRequest, ApiTransport, execute, fetch, fetch_list};
use crate::error::AppError;
use crate::models::{ManualAttendanceRequest, ManualStaffAttendance, StaffAttendance, StudentSession};
use crate::qr::QrSubject;

pub struct AttendanceService {
    api: Arc<dyn ApiTransport>,
}

impl AttendanceService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn student_sessions(&self, student_id: i64) -> Result<Vec<StudentSession>, AppError> {
        fetch_list(
            self.api.as_ref(),
            ApiRequest::get(format!("/attendances/student-class-sessions/{}", student_id)),
        )
        .await
    }

    pub async fn mark_manual(&self, request: &ManualAttendanceRequest) -> Result<(), AppError> {
        request.validate()?;
        execute(self.api.as_ref(), ApiRequest::post("/attendances/manual", request)?).await?;
        info!(
            "Marked student {} present for {} sessions",
            request.student_id,
            request.session_ids.len()
        );
        Ok(())
    }

    /// Student check-in from a scanned code. The backend's reply is shown as-is.
    pub async fn scan_student(&self, qr_code_data: &str) -> Result<Option<Value>, AppError> {
        if !matches!(QrSubject::parse(qr_code_data)?, QrSubject::Student(_)) {
            return Err(AppError::Validation("This QR code does not belong to a student.".to_string()));
        }
        let body = QrScanRequest {
            qr_code_data: qr_code_data.trim(),
            confirm: None,
        };
        self.api.send(ApiRequest::post("/attendances/qr-scan", &body)?).await
    }

    /// Staff check-in/out. Without `confirm` the backend may answer with a
    /// question instead of recording the scan.
    pub async fn scan_staff(&self, qr_code_data: &str, confirm: bool) -> Result<Option<Value>, AppError> {
        if !matches!(QrSubject::parse(qr_code_data)?, QrSubject::Staff(_)) {
            return Err(AppError::Validation("This QR code does not belong to a staff member.".to_string()));
        }
        let body = QrScanRequest {
            qr_code_data: qr_code_data.trim(),
            confirm: Some(confirm),
        };
        self.api.send(ApiRequest::post("/staff-attendances/scan", &body)?).await
    }

    pub async fn staff_by_date(&self, staff_id: Option<i64>, date: NaiveDate) -> Result<Vec<StaffAttendance>, AppError> {
        let request = ApiRequest::get("/staff-attendances")
            .query_opt("staffId", staff_id)
            .query("date", date.format("%Y-%m-%d"));
        fetch_list(self.api.as_ref(), request).await
    }

    pub async fn create_manual(&self, record: &ManualStaffAttendance) -> Result<StaffAttendance, AppError> {
        let created = fetch(self.api.as_ref(), ApiRequest::post("/staff-attendances/manual", record)?).await?;
        info!("Recorded manual {:?} for staff {}", record.kind, record.staff_id);
        Ok(created)
    }

    /// Only the timestamp of a manual record can be corrected.
    pub async fn update_manual(&self, id: i64, timestamp: DateTime<Utc>) -> Result<(), AppError> {
        let body = json!({ "timestamp": timestamp });
        execute(self.api.as_ref(), ApiRequest::patch(format!("/staff-attendances/manual/{}", id), &body)?).await?;
        info!("Corrected staff attendance {}", id);
        Ok(())
    }

    pub async fn delete_manual(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/staff-attendances/manual/{}", id))).await?;
        info!("Deleted staff attendance {}", id);
        Ok(())
    }
}
