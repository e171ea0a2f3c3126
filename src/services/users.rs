use std::sync::Arc;

use tracing::info;

use crate::client::{ApiRequest, ApiTransport, execute, fetch, fetch_list};
use crate::error::AppError;
use crate::listing::{Page, PAGE_SIZE, filter_and_paginate};
use crate::models::{User, UserPayload};

pub struct UserService {
    api: Arc<dyn ApiTransport>,
}

impl UserService {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        fetch_list(self.api.as_ref(), ApiRequest::get("/users")).await
    }

    pub async fn page(&self, search: &str, page: usize) -> Result<Page<User>, AppError> {
        let users = self.list().await?;
        Ok(filter_and_paginate(&users, search, page, PAGE_SIZE))
    }

    pub async fn create(&self, payload: &UserPayload) -> Result<User, AppError> {
        if payload.email.trim().is_empty() || payload.password.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::Validation("Email and password are required for a new user.".to_string()));
        }
        let created: User = fetch(self.api.as_ref(), ApiRequest::post("/users", payload)?).await?;
        info!("Created user {} ({})", created.email, created.id);
        Ok(created)
    }

    /// A missing password leaves the current one unchanged.
    pub async fn update(&self, id: i64, payload: &UserPayload) -> Result<User, AppError> {
        if payload.email.trim().is_empty() {
            return Err(AppError::Validation("Email is required.".to_string()));
        }
        let updated = fetch(self.api.as_ref(), ApiRequest::patch(format!("/users/{}", id), payload)?).await?;
        info!("Updated user {}", id);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        execute(self.api.as_ref(), ApiRequest::delete(format!("/users/{}", id))).await?;
        info!("Deleted user {}", id);
        Ok(())
    }
}
