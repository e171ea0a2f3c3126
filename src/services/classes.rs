use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::client::{ApiRequest, ApiTransport, execute, fetch, fetch_list};
use crate::error::AppError;
use crate::listing::{Page, PAGE_SIZE, filter_and_paginate};
use crate::models::{ClassEntity, ClassPayload, UpdateSessionRequest};

pub struct ClassService {
    api: Arc<dyn ApiTransport>,
}

impl ClassService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<ClassEntity>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/classes")).await
    }

    /// One page of the class screen, filtered by code or name.
    pub async fn page(&self, search: &str, page: usize) -> Result<Page<ClassEntity>, AppError> {
        let classes = self.list().await?;
        Ok(filter_and_paginate(&classes, search, page, PAGE_SIZE))
    }

    pub async fn create(&self, payload: &ClassPayload) -> Result<ClassEntity, AppError> {
        payload.validate()?;
        let created: ClassEntity = fetch(self.api.as_ref(), ApiRequest::post("/classes", payload)?).await?;
        info!("Created class {} ({})", created.class_code, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, payload: &ClassPayload) -> Result<ClassEntity, AppError> {
        payload.validate()?;
        let updated = fetch(self.api.as_ref(), ApiRequest::patch(format!("/classes/{}", id), payload)?).await?;
        info!("Updated class {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/classes/{}", id))).await?;
        info!("Deleted class {}", id);
        Ok(())
    }

    /// Generated sessions of one class. The shape is rendered as-is.
    pub async fn schedule(&self, class_id: i64) -> Result<Value, AppError> {
        fetch(self.api.as_ref(), ApiRequest::get(format!("/class-sessions/schedule/{}", class_id))).await
    }

    /// Students by sessions attendance grid of one class.
    pub async fn attendance_matrix(&self, class_id: i64) -> Result<Value, AppError> {
        fetch(self.api.as_ref(), ApiRequest::get(format!("/classes/{}/attendance-matrix", class_id))).await
    }

    pub async fn update_session(&self, session_id: i64, change: &UpdateSessionRequest) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::patch(format!("/class-sessions/{}", session_id), change)?).await?;
        info!("Moved class session {} to {} {}", session_id, change.session_date, change.start_time);
        Ok(())
    }
}
