//! Repository for the `prompt_configs` table.

use newsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt_config::PromptConfig;

/// Column list for `prompt_configs` queries.
const COLUMNS: &str =
    "id, name, description, version, is_active, is_default, created_at, updated_at";

/// Read access to prompt configurations.
pub struct PromptConfigRepo;

impl PromptConfigRepo {
    /// The configuration currently in use.
    ///
    /// Among active configurations the default one wins, then the most
    /// recently updated.
    pub async fn find_active(pool: &PgPool) -> Result<Option<PromptConfig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_configs \
             WHERE is_active = true \
             ORDER BY is_default DESC, updated_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, PromptConfig>(&query)
            .fetch_optional(pool)
            .await
    }

    /// Find a configuration by ID, active or not.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PromptConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompt_configs WHERE id = $1");
        sqlx::query_as::<_, PromptConfig>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
