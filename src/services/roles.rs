use std::sync::Arc;

use tracing::info;

use crate::client::{ApiRequest, ApiTransport, execute, fetch, fetch_list};
use crate::error::AppError;
use crate::listing::{Page, PAGE_SIZE, filter_and_paginate};
use crate::models::{Role, RolePayload};

pub struct RoleService {
    api: Arc<dyn ApiTransport>,
}

impl RoleService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<Role>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/roles")).await
    }

    pub async fn page(&self, search: &str, page: usize) -> Result<Page<Role>, AppError> {
        let roles = self.list().await?;
        Ok(filter_and_paginate(&roles, search, page, PAGE_SIZE))
    }

    pub async fn create(&self, payload: &RolePayload) -> Result<Role, AppError> {
        payload.validate()?;
        let created: Role = fetch(self.api.as_ref(), ApiRequest::post("/roles", payload)?).await?;
        info!("Created role {} ({})", created.key, created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, payload: &RolePayload) -> Result<Role, AppError> {
        payload.validate()?;
        let updated = fetch(self.api.as_ref(), ApiRequest::patch(format!("/roles/{}", id), payload)?).await?;
        info!("Updated role {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/roles/{}", id))).await?;
        info!("Deleted role {}", id);
        Ok(())
    }
}
