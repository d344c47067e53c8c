//! Repository for the `prompt_sections` table.

use newsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt_section::PromptSection;

/// Column list for `prompt_sections` queries.
const COLUMNS: &str = "\
    id, config_id, section_key, section_name, section_description, \
    prompt_text, display_order, is_active, created_at, updated_at";

/// Provides access to configuration sections.
pub struct PromptSectionRepo;

impl PromptSectionRepo {
    /// Active sections of a configuration, in display order.
    pub async fn list_active_for_config(
        pool: &PgPool,
        config_id: DbId,
    ) -> Result<Vec<PromptSection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_sections \
             WHERE config_id = $1 AND is_active = true \
             ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, PromptSection>(&query)
            .bind(config_id)
            .fetch_all(pool)
            .await
    }

    /// Find an active section by key.
    pub async fn find_by_key(
        pool: &PgPool,
        config_id: DbId,
        section_key: &str,
    ) -> Result<Option<PromptSection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_sections \
             WHERE config_id = $1 AND section_key = $2 AND is_active = true"
        );
        sqlx::query_as::<_, PromptSection>(&query)
            .bind(config_id)
            .bind(section_key)
            .fetch_optional(pool)
            .await
    }

    /// Replace an active section's text. Returns `None` when no such active
    /// section exists.
    pub async fn update_text(
        pool: &PgPool,
        config_id: DbId,
        section_key: &str,
        prompt_text: &str,
    ) -> Result<Option<PromptSection>, sqlx::Error> {
        let query = format!(
            "UPDATE prompt_sections SET prompt_text = $3 \
             WHERE config_id = $1 AND section_key = $2 AND is_active = true \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PromptSection>(&query)
            .bind(config_id)
            .bind(section_key)
            .bind(prompt_text)
            .fetch_optional(pool)
            .await
    }
}
