//! Repository for the `prompt_rules` and `prompt_rule_options` tables.

use newsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt_rule::{PromptRule, PromptRuleOption};

/// Column list for `prompt_rules` queries.
const COLUMNS: &str = "\
    id, config_id, rule_key, rule_name, rule_type, rule_category, \
    default_value, validation_rules, display_order, is_active, created_at, updated_at";

/// Provides access to configuration rules and their options.
pub struct PromptRuleRepo;

impl PromptRuleRepo {
    /// Active rules of a configuration, ordered by category then display order.
    pub async fn list_active_for_config(
        pool: &PgPool,
        config_id: DbId,
    ) -> Result<Vec<PromptRule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_rules \
             WHERE config_id = $1 AND is_active = true \
             ORDER BY rule_category ASC, display_order ASC, id ASC"
        );
        sqlx::query_as::<_, PromptRule>(&query)
            .bind(config_id)
            .fetch_all(pool)
            .await
    }

    /// Active options of every active rule in a configuration, ordered by
    /// rule key then display order.
    pub async fn list_options_for_config(
        pool: &PgPool,
        config_id: DbId,
    ) -> Result<Vec<PromptRuleOption>, sqlx::Error> {
        sqlx::query_as::<_, PromptRuleOption>(
            "SELECT o.id, o.rule_id, r.rule_key, o.option_key, o.option_label, \
                    o.option_description, o.display_order \
             FROM prompt_rule_options o \
             JOIN prompt_rules r ON r.id = o.rule_id \
             WHERE r.config_id = $1 AND r.is_active = true AND o.is_active = true \
             ORDER BY r.rule_key ASC, o.display_order ASC, o.id ASC",
        )
        .bind(config_id)
        .fetch_all(pool)
        .await
    }
}
