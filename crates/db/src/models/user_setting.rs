//! Per-user prompt setting entity model.

use newsdesk_core::settings::RawSettings;
use newsdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_prompt_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserPromptSetting {
    pub id: DbId,
    pub user_id: String,
    pub config_id: DbId,
    pub rule_key: String,
    pub setting_value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Rule key -> saved value.
pub fn to_raw_settings(rows: &[UserPromptSetting]) -> RawSettings {
    rows.iter()
        .map(|r| (r.rule_key.clone(), r.setting_value.clone()))
        .collect()
}
