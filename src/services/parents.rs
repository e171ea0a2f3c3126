use std::sync::Arc;

use tracing::info;

use crate::client::{ApiRequest, ApiTransport, execute, fetch, fetch_list};
use crate::error::AppError;
use crate::listing::{Page, PAGE_SIZE, filter_and_paginate};
use crate::models::{Parent, ParentPayload, Student};

pub struct ParentService {
    api: Arc<dyn ApiTransport>,
}

impl ParentService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Parent>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/parents")).await
    }

    pub async fn page(&self, search: &str, page: usize) -> Result<Page<Parent>, AppError> {
        let parents = self.list().await?;
        Ok(filter_and_paginate(&parents, search, page, PAGE_SIZE))
    }

    pub async fn create(&self, payload: &ParentPayload) -> Result<Parent, AppError> {
        if payload.full_name.as_deref().is_none_or(|n| n.trim().is_empty()) {
            return Err(AppError::Validation("Parent name is required.".to_string()));
        }
        let created: Parent = fetch(self.api.as_ref(), ApiRequest::post("/parents", payload)?).await?;
        info!("Created parent {} ({})", created.full_name, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, payload: &ParentPayload) -> Result<Parent, AppError> {
        let updated = fetch(self.api.as_ref(), ApiRequest::patch(format!("/parents/{}", id), payload)?).await?;
        info!("Updated parent {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/parents/{}", id))).await?;
        info!("Deleted parent {}", id);
        Ok(())
    }

    pub async fn students_of(&self, parent_id: i64) -> Result<Vec<Student>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get(format!("/parents/{}/students", parent_id))).await
    }
}
