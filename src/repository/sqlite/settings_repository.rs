use sqlx::SqlitePool;

use crate::error::{CatalogError, Result};

/// Single-row settings table (id = 1) holding the stored API credential.
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_api_key(&self) -> Result<Option<String>> {
        let key: Option<Option<String>> =
            sqlx::query_scalar("SELECT api_key FROM settings WHERE id = 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    CatalogError::persistence(format!("failed to read api key: {e}"))
                })?;

        Ok(key.flatten().filter(|k| !k.is_empty()))
    }

    pub async fn set_api_key(&self, api_key: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO settings (id, api_key, updated_at) \
             VALUES (1, ?, datetime('now')) \
             ON CONFLICT(id) DO UPDATE SET api_key = ?, updated_at = datetime('now')",
        )
        .bind(api_key)
        .bind(api_key)
        .execute(&self.pool)
        .await
        .map_err(|e| CatalogError::persistence(format!("failed to store api key: {e}")))?;

        Ok(())
    }
}
