//! Repository for the `kv_store` table.

use portfolio_core::types::Timestamp;

use crate::models::kv::KvEntry;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "key, value, updated_at";

/// Provides get/set/remove over string keys.
pub struct KvRepo;

impl KvRepo {
    /// Fetch the value stored under `key`, if any.
    pub async fn get(pool: &DbPool, key: &str) -> Result<Option<String>, sqlx::Error> {
        Ok(Self::get_entry(pool, key).await?.map(|entry| entry.value))
    }

    /// Fetch the full row stored under `key`, if any.
    pub async fn get_entry(pool: &DbPool, key: &str) -> Result<Option<KvEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM kv_store WHERE key = $1");
        sqlx::query_as::<_, KvEntry>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or overwrite the value under `key`.
    pub async fn set(
        pool: &DbPool,
        key: &str,
        value: &str,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES ($1, $2, $3)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove `key`. Returns `true` if a row was deleted.
    pub async fn remove(pool: &DbPool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
