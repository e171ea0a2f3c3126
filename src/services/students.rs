use std::sync::Arc;

use tracing::info;

use crate::client::{ApiRequest, ApiTransport, execute, fetch, fetch_list};
use crate::error::AppError;
use crate::listing::{Page, StudentFilter};
use crate::models::{Student, StudentPayload};

pub struct StudentService {
    api: Arc<dyn ApiTransport>,
}

impl StudentService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Student>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/students")).await
    }

    pub async fn page(&self, filter: &StudentFilter, page: usize) -> Result<Page<Student>, AppError> {
        let students = self.list().await?;
        Ok(filter.page(&students, page))
    }

    pub async fn create(&self, payload: &StudentPayload) -> Result<Student, AppError> {
        payload.validate()?;
        let created: Student = fetch(self.api.as_ref(), ApiRequest::post("/students", payload)?).await?;
        info!("Created student {} ({})", created.full_name, created.id);
        Ok(created)
    }

    /// Creates the student together with a new or existing parent.
    pub async fn create_with_parent(&self, payload: &StudentPayload) -> Result<Student, AppError> {
        payload.validate()?;
        if payload.new_parent.is_none() && payload.parent_id.is_none() {
            return Err(AppError::Validation("Choose an existing parent or enter a new one.".to_string()));
        }
        let created: Student =
            fetch(self.api.as_ref(), ApiRequest::post("/students/create-with-parent", payload)?).await?;
        info!("Created student {} with parent", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, payload: &StudentPayload) -> Result<Student, AppError> {
        payload.validate()?;
        let updated = fetch(self.api.as_ref(), ApiRequest::patch(format!("/students/{}", id), payload)?).await?;
        info!("Updated student {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/students/{}", id))).await?;
        info!("Deleted student {}", id);
        Ok(())
    }
}
