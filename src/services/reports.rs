use std::sync::Arc;

use tracing::info;

use crate::client::dto::{FileUpload, UploadedFile};
use crate::client::{ApiRequest, ApiTransport, execute, fetch};
use crate::error::AppError;
use crate::models::{Listing, Paged, ReportQuery, StudentReport, StudentReportPayload};

pub struct ReportService {
    api: Arc<dyn ApiTransport>,
}

impl ReportService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &ReportQuery) -> Result<Paged<StudentReport>, AppError> {
        let request = ApiRequest::get("/student-reports")
            .query("page", query.page.max(1))
            .query("limit", query.limit.max(1))
            .query_opt("search", Some(query.search.trim()))
            .query_opt("classId", query.class_id);
        let listing: Listing<StudentReport> = fetch(self.api.as_ref(), request).await?;
        Ok(listing.into_paged())
    }

    pub async fn create(&self, payload: StudentReportPayload) -> Result<StudentReport, AppError> {
        let payload = payload.normalized();
        payload.validate()?;
        let created: StudentReport = fetch(self.api.as_ref(), ApiRequest::post("/student-reports", &payload)?).await?;
        info!("Created report {} for student {}", created.id, payload.student_id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, payload: StudentReportPayload) -> Result<StudentReport, AppError> {
        let payload = payload.normalized();
        payload.validate()?;
        let updated = fetch(
            self.api.as_ref(),
            ApiRequest::patch(format!("/student-reports/{}", id), &payload)?,
        )
        .await?;
        info!("Updated report {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/student-reports/{}", id))).await?;
        info!("Deleted report {}", id);
        Ok(())
    }

    /// Uploads a PDF and returns the URL it is stored under.
    pub async fn upload_pdf(&self, file: FileUpload) -> Result<String, AppError> {
        if file.bytes.is_empty() {
            return Err(AppError::Validation(format!("{} is empty.", file.file_name)));
        }
        let name = file.file_name.clone();
        let uploaded: UploadedFile = fetch(self.api.as_ref(), ApiRequest::upload("/student-reports/upload-pdf", file)).await?;
        info!("Uploaded {} to {}", name, uploaded.secure_url);
        Ok(uploaded.secure_url)
    }
}
