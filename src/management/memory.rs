use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Credential, CredentialStore, StoreError};

/// In-process store for local runs without a database. Nothing survives a
/// restart.
#[derive(Default)]
pub struct MemoryCredentialStore {
    rows: RwLock<HashMap<String, Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, user_id: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self.rows.read().await.get(user_id).cloned())
    }

    async fn replace_access_token(
        &self,
        user_id: &str,
        access_token: &str,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.get_mut(user_id) else {
            return Err(StoreError::NotFound(user_id.to_string()));
        };

        row.access_token = access_token.to_string();
        row.updated_at = Some(Utc::now());
        Ok(())
    }

    async fn upsert(
        &self,
        user_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<(), StoreError> {
        let credential = Credential {
            id: user_id.to_string(),
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        self.rows
            .write()
            .await
            .insert(user_id.to_string(), credential);
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<(), StoreError> {
        self.rows.write().await.remove(user_id);
        Ok(())
    }
}
