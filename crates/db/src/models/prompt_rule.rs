//! Prompt rule and rule option entity models.

use newsdesk_core::settings::RawSettings;
use newsdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `prompt_rules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptRule {
    pub id: DbId,
    pub config_id: DbId,
    pub rule_key: String,
    pub rule_name: String,
    /// One of `boolean`, `select`, `number`, `text`.
    pub rule_type: String,
    pub rule_category: String,
    pub default_value: String,
    pub validation_rules: Option<serde_json::Value>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `prompt_rule_options`, joined with its rule key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PromptRuleOption {
    pub id: DbId,
    pub rule_id: DbId,
    pub rule_key: String,
    pub option_key: String,
    pub option_label: String,
    pub option_description: Option<String>,
    pub display_order: i32,
}

/// Rule key -> default value for a set of rules.
pub fn rule_defaults(rules: &[PromptRule]) -> RawSettings {
    rules
        .iter()
        .map(|r| (r.rule_key.clone(), r.default_value.clone()))
        .collect()
}
