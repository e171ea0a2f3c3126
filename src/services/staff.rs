use std::sync::Arc;

use tracing::info;

use crate::client::{ApiRequest, ApiTransport, execute, fetch, fetch_list};
use crate::error::AppError;
use crate::listing::{Page, PAGE_SIZE, filter_and_paginate};
use crate::models::{Staff, StaffPayload};

pub struct StaffService {
    api: Arc<dyn ApiTransport>,
}

impl StaffService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Staff>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/staffs")).await
    }

    /// One page of the staff screen. The whole collection is fetched and
    /// filtered locally, the backend's own paging is not used.
    pub async fn page(&self, search: &str, page: usize) -> Result<Page<Staff>, AppError> {
        let staff = self.list().await?;
        Ok(filter_and_paginate(&staff, search, page, PAGE_SIZE))
    }

    pub async fn get(&self, id: i64) -> Result<Staff, AppError> {
        fetch(self.api.as_ref(), ApiRequest::get(format!("/staffs/{}", id))).await
    }

    pub async fn create(&self, payload: &StaffPayload) -> Result<Staff, AppError> {
        validate(payload)?;
        let created: Staff = fetch(self.api.as_ref(), ApiRequest::post("/staffs", payload)?).await?;
        info!("Created staff {} ({})", created.full_name, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, payload: &StaffPayload) -> Result<Staff, AppError> {
        validate(payload)?;
        let updated = fetch(self.api.as_ref(), ApiRequest::patch(format!("/staffs/{}", id), payload)?).await?;
        info!("Updated staff {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/staffs/{}", id))).await?;
        info!("Deleted staff {}", id);
        Ok(())
    }
}

fn validate(payload: &StaffPayload) -> Result<(), AppError> {
    if payload.full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required.".to_string()));
    }
    if let Some((role, rate)) = payload.rates.iter().find(|(_, rate)| !(rate.is_finite() && **rate >= 0.0)) {
        return Err(AppError::Validation(format!("Rate for {} must be a non-negative number, got {}.", role, rate)));
    }
    Ok(())
}
