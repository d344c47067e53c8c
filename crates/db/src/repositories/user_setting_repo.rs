//! Repository for the `user_prompt_settings` table.

use newsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_setting::UserPromptSetting;

/// Column list for `user_prompt_settings` queries.
const COLUMNS: &str =
    "id, user_id, config_id, rule_key, setting_value, created_at, updated_at";

/// Provides access to per-user setting rows.
pub struct UserSettingRepo;

impl UserSettingRepo {
    /// All saved settings of a user for one configuration.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
        config_id: DbId,
    ) -> Result<Vec<UserPromptSetting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_prompt_settings \
             WHERE user_id = $1 AND config_id = $2 \
             ORDER BY rule_key ASC"
        );
        sqlx::query_as::<_, UserPromptSetting>(&query)
            .bind(user_id)
            .bind(config_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or replace a single setting value.
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        config_id: DbId,
        rule_key: &str,
        setting_value: &str,
    ) -> Result<UserPromptSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_prompt_settings (user_id, config_id, rule_key, setting_value) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, config_id, rule_key) \
             DO UPDATE SET setting_value = EXCLUDED.setting_value \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserPromptSetting>(&query)
            .bind(user_id)
            .bind(config_id)
            .bind(rule_key)
            .bind(setting_value)
            .fetch_one(pool)
            .await
    }
}
