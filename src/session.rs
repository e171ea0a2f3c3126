use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

use crate::client::dto::TokenPair;
use crate::db::repository::{self, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use crate::error::AppError;

/// Tokens currently held by the client. Either side may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<SessionTokens, AppError>;
    async fn save(&self, tokens: &TokenPair) -> Result<(), AppError>;
    async fn clear(&self) -> Result<(), AppError>;
}

/// Durable token storage backed by the local session database.
pub struct SqliteTokenStore {
    db: SqlitePool,
}

impl SqliteTokenStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn load(&self) -> Result<SessionTokens, AppError> {
        Ok(SessionTokens {
            access_token: repository::fetch_value(&self.db, ACCESS_TOKEN_KEY).await?,
            refresh_token: repository::fetch_value(&self.db, REFRESH_TOKEN_KEY).await?,
        })
    }

    /// Both tokens are written in one transaction.
    async fn save(&self, tokens: &TokenPair) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;
        repository::upsert_value(&mut *tx, ACCESS_TOKEN_KEY, &tokens.access_token).await?;
        repository::upsert_value(&mut *tx, REFRESH_TOKEN_KEY, &tokens.refresh_token).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;
        let removed_access = repository::delete_value(&mut *tx, ACCESS_TOKEN_KEY).await?;
        let removed_refresh = repository::delete_value(&mut *tx, REFRESH_TOKEN_KEY).await?;
        tx.commit().await?;
        if removed_access || removed_refresh {
            info!("Stored session tokens cleared");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<SessionTokens>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(access_token: Option<&str>, refresh_token: Option<&str>) -> Self {
        Self {
            tokens: Mutex::new(SessionTokens {
                access_token: access_token.map(str::to_string),
                refresh_token: refresh_token.map(str::to_string),
            }),
        }
    }

    pub fn snapshot(&self) -> SessionTokens {
        self.lock().clone()
    }

    /// Poisoning is ignored: every write replaces whole fields.
    fn lock(&self) -> MutexGuard<'_, SessionTokens> {
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<SessionTokens, AppError> {
        Ok(self.snapshot())
    }

    async fn save(&self, tokens: &TokenPair) -> Result<(), AppError> {
        let mut guard = self.lock();
        guard.access_token = Some(tokens.access_token.clone());
        guard.refresh_token = Some(tokens.refresh_token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.lock() = SessionTokens::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn test_poisoned_memory_store_still_saves_and_clears() {
        let store = Arc::new(MemoryTokenStore::with_tokens(Some("old"), Some("old-refresh")));
        let holder = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = holder.tokens.lock().unwrap();
            panic!("panicked while holding the token lock");
        })
        .join();
        assert!(store.tokens.is_poisoned());

        store
            .save(&TokenPair {
                access_token: "new".to_string(),
                refresh_token: "new-refresh".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(store.snapshot().access_token.as_deref(), Some("new"));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), SessionTokens::default());
    }
}
