//! Handlers for the prompt configuration: full config and export, per-user
//! settings, section texts and prompt preview.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use newsdesk_core::assembly::build_prompt;
use newsdesk_core::config_export::{group_by, key_by, ConfigData, ExportEnvelope};
use newsdesk_core::error::CoreError;
use newsdesk_core::settings::{effective_settings, normalize_setting, raw_from_json, RawSettings};
use newsdesk_core::types::DbId;
use newsdesk_db::models::prompt_config::PromptConfig;
use newsdesk_db::models::prompt_rule::{PromptRule, PromptRuleOption};
use newsdesk_db::models::prompt_section::{PromptSection, UpdatePromptSection};
use newsdesk_db::repositories::{PromptRuleRepo, PromptSectionRepo, UserSettingRepo};
use newsdesk_db::DbPool;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::identity::CurrentUser;
use crate::prompt_context::{active_config, PromptContext};
use crate::response::DataResponse;
use crate::state::AppState;

/// Full configuration document returned by `/config` and `/export`.
pub type PromptConfigData = ConfigData<PromptConfig, PromptSection, PromptRule, PromptRuleOption>;

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Body of `PUT /prompts/settings`.
#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    pub settings: serde_json::Map<String, serde_json::Value>,
}

/// A user's effective settings for the active configuration.
#[derive(Debug, Serialize)]
pub struct UserSettingsResponse {
    pub config_id: DbId,
    pub settings: RawSettings,
}

/// Body of `POST /prompts/preview`.
#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub news_text: String,
    #[serde(default)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub config_id: DbId,
    pub prompt: String,
    /// Settings the prompt was built with.
    pub settings: serde_json::Value,
}

// ---------------------------------------------------------------------------
// GET /prompts/config, GET /prompts/export
// ---------------------------------------------------------------------------

async fn load_config_data(pool: &DbPool) -> AppResult<PromptConfigData> {
    let config = active_config(pool).await?;
    let sections = PromptSectionRepo::list_active_for_config(pool, config.id).await?;
    let rules = PromptRuleRepo::list_active_for_config(pool, config.id).await?;
    let options = PromptRuleRepo::list_options_for_config(pool, config.id).await?;

    let rule_options = group_by(
        rules.iter().map(|r| r.rule_key.as_str()),
        options,
        |o| o.rule_key.as_str(),
    );

    Ok(ConfigData {
        config,
        sections: key_by(sections, |s| s.section_key.as_str()),
        rules: key_by(rules, |r| r.rule_key.as_str()),
        rule_options,
    })
}

/// The active configuration with its sections, rules and rule options.
pub async fn get_config(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = load_config_data(&state.pool).await?;
    Ok(Json(DataResponse { data }))
}

/// The active configuration wrapped with its export timestamp.
pub async fn export_config(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = load_config_data(&state.pool).await?;
    tracing::info!(config_id = data.config.id, "Exporting prompt configuration");

    Ok(Json(DataResponse {
        data: ExportEnvelope::new(data, chrono::Utc::now()),
    }))
}

// ---------------------------------------------------------------------------
// GET / PUT /prompts/settings
// ---------------------------------------------------------------------------

/// Every rule key with the caller's saved value, or the rule default.
pub async fn get_settings(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let ctx = PromptContext::load(&state.pool, &user_id).await?;
    let settings = effective_settings(&ctx.saved, &ctx.rule_defaults());

    Ok(Json(DataResponse {
        data: UserSettingsResponse {
            config_id: ctx.config.id,
            settings,
        },
    }))
}

/// Save setting values, one row per key.
///
/// All values are validated before any row is written. Keys must belong to
/// an active rule of the configuration.
pub async fn save_settings(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SaveSettingsRequest>,
) -> AppResult<impl IntoResponse> {
    let ctx = PromptContext::load(&state.pool, &user_id).await?;
    let defaults = ctx.rule_defaults();

    let mut normalized: BTreeMap<String, String> = BTreeMap::new();
    for (key, value) in raw_from_json(&input.settings)? {
        if !defaults.contains_key(&key) {
            return Err(CoreError::Validation(format!(
                "Setting '{key}' is not enabled in the active configuration"
            ))
            .into());
        }
        let value = normalize_setting(&key, &value)?;
        normalized.insert(key, value);
    }

    for (key, value) in &normalized {
        UserSettingRepo::upsert(&state.pool, &user_id, ctx.config.id, key, value).await?;
    }

    tracing::info!(
        user_id = %user_id,
        config_id = ctx.config.id,
        count = normalized.len(),
        "Saved prompt settings"
    );

    let mut saved = ctx.saved;
    saved.extend(normalized);

    Ok(Json(DataResponse {
        data: UserSettingsResponse {
            config_id: ctx.config.id,
            settings: effective_settings(&saved, &defaults),
        },
    }))
}

// ---------------------------------------------------------------------------
// GET / PUT /prompts/sections/{key}
// ---------------------------------------------------------------------------

pub async fn get_section(
    State(state): State<AppState>,
    Path(section_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let config = active_config(&state.pool).await?;
    let section = PromptSectionRepo::find_by_key(&state.pool, config.id, &section_key)
        .await?
        .ok_or_else(|| CoreError::NotFoundKey {
            entity: "PromptSection",
            key: section_key.clone(),
        })?;
    Ok(Json(DataResponse { data: section }))
}

/// Replace a section's text. An empty text drops the block from prompts.
pub async fn update_section(
    State(state): State<AppState>,
    Path(section_key): Path<String>,
    AppJson(input): AppJson<UpdatePromptSection>,
) -> AppResult<impl IntoResponse> {
    let config = active_config(&state.pool).await?;
    let section =
        PromptSectionRepo::update_text(&state.pool, config.id, &section_key, &input.prompt_text)
            .await?
            .ok_or_else(|| CoreError::NotFoundKey {
                entity: "PromptSection",
                key: section_key.clone(),
            })?;

    tracing::info!(
        config_id = config.id,
        section_key = %section.section_key,
        chars = section.prompt_text.chars().count(),
        "Updated prompt section"
    );
    Ok(Json(DataResponse { data: section }))
}

// ---------------------------------------------------------------------------
// POST /prompts/preview
// ---------------------------------------------------------------------------

/// Build the complete prompt without calling the AI or recording anything.
pub async fn preview_prompt(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<PreviewRequest>,
) -> AppResult<impl IntoResponse> {
    let request_settings = raw_from_json(&input.settings)?;

    let ctx = PromptContext::load(&state.pool, &user_id).await?;
    let settings = ctx.resolve_settings(&request_settings)?;
    let templates = ctx.templates(&state.templates);
    let prompt = build_prompt(&templates, &settings, input.news_text.trim());

    Ok(Json(DataResponse {
        data: PreviewResponse {
            config_id: ctx.config.id,
            prompt,
            settings: settings.snapshot(),
        },
    }))
}
