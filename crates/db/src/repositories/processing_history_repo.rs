//! Repository for the `processing_history` table.
//!
//! Status updates carry a SQL guard built from the transition table in
//! `newsdesk_core::processing`, so a terminal row is never modified. A guarded
//! update that matches nothing returns `Ok(None)`.

use newsdesk_core::processing::{source_statuses_for, ProcessingStatus};
use newsdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::processing_history::{
    CreateProcessingRecord, HistoryEntry, ProcessingRecord, ProcessingStatistics,
};

/// Column list for `processing_history` queries.
const COLUMNS: &str = "\
    id, user_id, config_id, original_text, prompt_text, settings_used, \
    processed_text, processing_status, error_message, processing_time_ms, \
    is_read, created_at, updated_at, completed_at";

/// Column list for history views joined with `prompt_configs` (alias `c`).
const ENTRY_COLUMNS: &str = "\
    h.id, h.user_id, h.config_id, c.name AS config_name, h.original_text, \
    h.prompt_text, h.settings_used, h.processed_text, h.processing_status, \
    h.error_message, h.processing_time_ms, h.is_read, h.created_at, \
    h.updated_at, h.completed_at";

/// Provides access to processing history records.
pub struct ProcessingHistoryRepo;

impl ProcessingHistoryRepo {
    /// Insert a new record in `pending` status.
    pub async fn create_pending(
        pool: &PgPool,
        input: &CreateProcessingRecord,
    ) -> Result<ProcessingRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO processing_history \
                (user_id, config_id, original_text, prompt_text, settings_used, processing_status) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcessingRecord>(&query)
            .bind(&input.user_id)
            .bind(input.config_id)
            .bind(&input.original_text)
            .bind(&input.prompt_text)
            .bind(&input.settings_used)
            .bind(ProcessingStatus::Pending.as_str())
            .fetch_one(pool)
            .await
    }

    /// Move a pending record to `processing`.
    pub async fn mark_processing(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProcessingRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE processing_history SET processing_status = $2 \
             WHERE id = $1 AND processing_status = ANY($3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcessingRecord>(&query)
            .bind(id)
            .bind(ProcessingStatus::Processing.as_str())
            .bind(source_statuses_for(ProcessingStatus::Processing))
            .fetch_optional(pool)
            .await
    }

    /// Record a successful result.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        processed_text: &str,
        processing_time_ms: i64,
    ) -> Result<Option<ProcessingRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE processing_history SET \
                processing_status = $2, processed_text = $3, \
                processing_time_ms = $4, error_message = NULL, completed_at = NOW() \
             WHERE id = $1 AND processing_status = ANY($5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcessingRecord>(&query)
            .bind(id)
            .bind(ProcessingStatus::Completed.as_str())
            .bind(processed_text)
            .bind(processing_time_ms)
            .bind(source_statuses_for(ProcessingStatus::Completed))
            .fetch_optional(pool)
            .await
    }

    /// Record a failure.
    pub async fn fail(
        pool: &PgPool,
        id: DbId,
        error_message: &str,
        processing_time_ms: i64,
    ) -> Result<Option<ProcessingRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE processing_history SET \
                processing_status = $2, error_message = $3, \
                processing_time_ms = $4, completed_at = NOW() \
             WHERE id = $1 AND processing_status = ANY($5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcessingRecord>(&query)
            .bind(id)
            .bind(ProcessingStatus::Failed.as_str())
            .bind(error_message)
            .bind(processing_time_ms)
            .bind(source_statuses_for(ProcessingStatus::Failed))
            .fetch_optional(pool)
            .await
    }

    /// A user's history, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM processing_history h \
             LEFT JOIN prompt_configs c ON c.id = h.config_id \
             WHERE h.user_id = $1 \
             ORDER BY h.created_at DESC, h.id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// A single record, only if it belongs to `user_id`.
    pub async fn find_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<HistoryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM processing_history h \
             LEFT JOIN prompt_configs c ON c.id = h.config_id \
             WHERE h.id = $1 AND h.user_id = $2"
        );
        sqlx::query_as::<_, HistoryEntry>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Set the read flag. Allowed in any status. Returns `false` when the
    /// record does not exist or belongs to another user.
    pub async fn mark_read(pool: &PgPool, id: DbId, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE processing_history SET is_read = true WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Per-status counts for a user.
    pub async fn statistics_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<ProcessingStatistics, sqlx::Error> {
        sqlx::query_as::<_, ProcessingStatistics>(
            "SELECT \
                COUNT(*) AS total, \
                COUNT(*) FILTER (WHERE processing_status = 'pending') AS pending, \
                COUNT(*) FILTER (WHERE processing_status = 'processing') AS processing, \
                COUNT(*) FILTER (WHERE processing_status = 'completed') AS completed, \
                COUNT(*) FILTER (WHERE processing_status = 'failed') AS failed, \
                COUNT(*) FILTER (WHERE is_read = false) AS unread \
             FROM processing_history \
             WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
