//! Handlers for article processing and processing history.

use std::time::Instant;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use newsdesk_ai::rewrite_article;
use newsdesk_core::article::validate_article_text;
use newsdesk_core::assembly::build_prompt;
use newsdesk_core::error::CoreError;
use newsdesk_core::pagination::{clamp_limit, clamp_offset, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT};
use newsdesk_core::settings::raw_from_json;
use newsdesk_core::types::DbId;
use newsdesk_db::models::processing_history::CreateProcessingRecord;
use newsdesk_db::repositories::ProcessingHistoryRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::identity::CurrentUser;
use crate::prompt_context::PromptContext;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Body of `POST /news/process`.
#[derive(Debug, Deserialize)]
pub struct ProcessNewsRequest {
    #[serde(default)]
    pub news_text: String,
    /// Per-request setting overrides, keyed by camelCase rule key.
    #[serde(default)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// POST /news/process
// ---------------------------------------------------------------------------

/// Rewrite an article.
///
/// The article and settings are validated before anything is written. The
/// submission is then recorded as `pending`, moved to `processing`, and
/// finished as `completed` or `failed` depending on the AI call. A failed
/// call answers 502 with the record id.
///
/// The record is finished only if this future runs to completion. When the
/// request timeout fires or the client disconnects during the AI call, the
/// future is dropped and the record stays `processing`.
pub async fn process_news(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ProcessNewsRequest>,
) -> AppResult<impl IntoResponse> {
    let article = validate_article_text(&input.news_text)?;
    let request_settings = raw_from_json(&input.settings)?;

    let ctx = PromptContext::load(&state.pool, &user_id).await?;
    let settings = ctx.resolve_settings(&request_settings)?;
    let templates = ctx.templates(&state.templates);
    let prompt = build_prompt(&templates, &settings, article);

    let record = ProcessingHistoryRepo::create_pending(
        &state.pool,
        &CreateProcessingRecord {
            user_id: user_id.clone(),
            config_id: Some(ctx.config.id),
            original_text: article.to_string(),
            prompt_text: Some(prompt.clone()),
            settings_used: settings.snapshot(),
        },
    )
    .await?;
    let record_id = record.id;

    ProcessingHistoryRepo::mark_processing(&state.pool, record_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Record {record_id} left pending before processing"))
        })?;

    tracing::info!(
        record_id,
        user_id = %user_id,
        config_id = ctx.config.id,
        prompt_chars = prompt.chars().count(),
        "Processing article"
    );

    let started = Instant::now();
    let outcome = rewrite_article(state.generator.as_ref(), article, &prompt).await;
    let elapsed_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);

    match outcome {
        Ok(processed_text) => {
            let record = ProcessingHistoryRepo::complete(
                &state.pool,
                record_id,
                &processed_text,
                elapsed_ms,
            )
            .await?
            .ok_or_else(|| {
                AppError::InternalError(format!("Record {record_id} was finished concurrently"))
            })?;

            tracing::info!(record_id, elapsed_ms, "Article processed");
            Ok(Json(DataResponse { data: record }))
        }
        Err(err) => {
            let message = err.to_string();
            tracing::warn!(record_id, elapsed_ms, error = %message, "Article processing failed");

            let recorded =
                ProcessingHistoryRepo::fail(&state.pool, record_id, &message, elapsed_ms).await?;
            if recorded.is_none() {
                tracing::warn!(record_id, "Record was finished concurrently, failure not recorded");
            }
            Err(AppError::Processing { record_id, message })
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// GET /news/history -- the caller's records, newest first.
pub async fn list_history(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
    let offset = clamp_offset(params.offset);

    let entries = ProcessingHistoryRepo::list_for_user(&state.pool, &user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /news/history/{id}
pub async fn get_history_entry(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = ProcessingHistoryRepo::find_for_user(&state.pool, id, &user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ProcessingRecord",
            id,
        })?;
    Ok(Json(DataResponse { data: entry }))
}

/// POST /news/history/{id}/read
pub async fn mark_read(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let updated = ProcessingHistoryRepo::mark_read(&state.pool, id, &user_id).await?;
    if !updated {
        return Err(CoreError::NotFound {
            entity: "ProcessingRecord",
            id,
        }
        .into());
    }

    tracing::debug!(record_id = id, user_id = %user_id, "Marked record as read");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /news/statistics
pub async fn statistics(
    CurrentUser(user_id): CurrentUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let stats = ProcessingHistoryRepo::statistics_for_user(&state.pool, &user_id).await?;
    Ok(Json(DataResponse { data: stats }))
}
