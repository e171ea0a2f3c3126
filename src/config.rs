use std::env;

use crate::error::AppError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SESSION_DB_URL: &str = "sqlite://center_admin.db?mode=rwc";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub session_db_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            base_url: normalize_base_url(&base_url.into())?,
            session_db_url: DEFAULT_SESSION_DB_URL.to_string(),
        })
    }

    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let session_db_url =
            env::var("SESSION_DB_URL").unwrap_or_else(|_| DEFAULT_SESSION_DB_URL.to_string());

        Ok(Self {
            base_url: normalize_base_url(&base_url)?,
            session_db_url,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, AppError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "API_BASE_URL must start with http:// or https://, got {:?}",
            raw
        )));
    }
    Ok(trimmed.to_string())
}
