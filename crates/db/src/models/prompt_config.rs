//! Prompt configuration entity model.

use newsdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `prompt_configs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptConfig {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub version: String,
    pub is_active: bool,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
