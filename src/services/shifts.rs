use std::sync::Arc;

use tracing::info;

use crate::client::{ApiRequest, ApiTransport, execute, fetch, fetch_list};
use crate::error::AppError;
use crate::listing::{Page, PAGE_SIZE, filter_and_paginate};
use crate::models::{Shift, ShiftPayload};

pub struct ShiftService {
    api: Arc<dyn ApiTransport>,
}

impl ShiftService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Shift>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/shifts")).await
    }

    pub async fn page(&self, search: &str, page: usize) -> Result<Page<Shift>, AppError> {
        let shifts = self.list().await?;
        Ok(filter_and_paginate(&shifts, search, page, PAGE_SIZE))
    }

    pub async fn create(&self, payload: &ShiftPayload) -> Result<Shift, AppError> {
        payload.validate()?;
        let created: Shift = fetch(self.api.as_ref(), ApiRequest::post("/shifts", payload)?).await?;
        info!("Created shift {} ({})", created.name, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, payload: &ShiftPayload) -> Result<Shift, AppError> {
        payload.validate()?;
        let updated = fetch(self.api.as_ref(), ApiRequest::patch(format!("/shifts/{}", id), payload)?).await?;
        info!("Updated shift {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/shifts/{}", id))).await?;
        info!("Deleted shift {}", id);
        Ok(())
    }
}
