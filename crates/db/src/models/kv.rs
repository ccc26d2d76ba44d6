//! Key-value entry model.

use portfolio_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `kv_store` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct KvEntry {
    pub key: String,
    pub value: String,
    pub updated_at: Timestamp,
}
