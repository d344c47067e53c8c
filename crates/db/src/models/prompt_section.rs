//! Prompt section entity model and DTOs.

use newsdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `prompt_sections` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptSection {
    pub id: DbId,
    pub config_id: DbId,
    pub section_key: String,
    pub section_name: String,
    pub section_description: Option<String>,
    pub prompt_text: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for replacing a section's text.
#[derive(Debug, Deserialize)]
pub struct UpdatePromptSection {
    pub prompt_text: String,
}
