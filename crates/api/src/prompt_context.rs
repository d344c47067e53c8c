//! Per-request view of the active prompt configuration.
//!
//! Loads the active configuration with its sections, rules and the caller's
//! saved settings, then resolves typed settings and the effective template
//! set from them. Nothing is cached between requests.

use newsdesk_core::error::CoreError;
use newsdesk_core::settings::{PromptSettings, RawSettings};
use newsdesk_core::templates::PromptTemplates;
use newsdesk_db::models::prompt_config::PromptConfig;
use newsdesk_db::models::prompt_rule::{rule_defaults, PromptRule};
use newsdesk_db::models::prompt_section::PromptSection;
use newsdesk_db::models::user_setting::to_raw_settings;
use newsdesk_db::repositories::{
    PromptConfigRepo, PromptRuleRepo, PromptSectionRepo, UserSettingRepo,
};
use newsdesk_db::DbPool;

use crate::error::AppResult;

/// The active configuration, or `NotConfigured`.
pub async fn active_config(pool: &DbPool) -> AppResult<PromptConfig> {
    let config = PromptConfigRepo::find_active(pool).await?.ok_or_else(|| {
        CoreError::NotConfigured("No active prompt configuration".to_string())
    })?;
    Ok(config)
}

/// Everything needed to build a prompt for one user.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub config: PromptConfig,
    pub sections: Vec<PromptSection>,
    pub rules: Vec<PromptRule>,
    /// The user's saved values for this configuration.
    pub saved: RawSettings,
}

impl PromptContext {
    pub async fn load(pool: &DbPool, user_id: &str) -> AppResult<Self> {
        let config = active_config(pool).await?;
        let sections = PromptSectionRepo::list_active_for_config(pool, config.id).await?;
        let rules = PromptRuleRepo::list_active_for_config(pool, config.id).await?;
        let saved_rows = UserSettingRepo::list_for_user(pool, user_id, config.id).await?;

        Ok(Self {
            config,
            sections,
            rules,
            saved: to_raw_settings(&saved_rows),
        })
    }

    pub fn rule_defaults(&self) -> RawSettings {
        rule_defaults(&self.rules)
    }

    /// Typed settings: request values, then saved values, then rule defaults.
    pub fn resolve_settings(&self, request: &RawSettings) -> Result<PromptSettings, CoreError> {
        let defaults = self.rule_defaults();
        PromptSettings::resolve(&[request, &self.saved, &defaults])
    }

    /// `base` with this configuration's section texts applied.
    pub fn templates(&self, base: &PromptTemplates) -> PromptTemplates {
        base.with_section_overrides(
            self.sections
                .iter()
                .map(|s| (s.section_key.as_str(), s.prompt_text.as_str())),
        )
    }
}
