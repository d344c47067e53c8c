//! Processing history entity model, DTOs and statistics.

use newsdesk_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `processing_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProcessingRecord {
    pub id: DbId,
    pub user_id: String,
    pub config_id: Option<DbId>,
    pub original_text: String,
    pub prompt_text: Option<String>,
    pub settings_used: serde_json::Value,
    pub processed_text: Option<String>,
    pub processing_status: String,
    pub error_message: Option<String>,
    pub processing_time_ms: Option<i64>,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// History list/detail row: a processing record plus its config name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub user_id: String,
    pub config_id: Option<DbId>,
    pub config_name: Option<String>,
    pub original_text: String,
    pub prompt_text: Option<String>,
    pub settings_used: serde_json::Value,
    pub processed_text: Option<String>,
    pub processing_status: String,
    pub error_message: Option<String>,
    pub processing_time_ms: Option<i64>,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// DTO for inserting a new pending record.
#[derive(Debug, Clone)]
pub struct CreateProcessingRecord {
    pub user_id: String,
    pub config_id: Option<DbId>,
    pub original_text: String,
    pub prompt_text: Option<String>,
    pub settings_used: serde_json::Value,
}

/// Per-status counts for one user.
#[derive(Debug, Clone, Default, FromRow, Serialize, PartialEq, Eq)]
pub struct ProcessingStatistics {
    pub total: i64,
    pub pending: i64,
    pub processing: i64,
    pub completed: i64,
    pub failed: i64,
    pub unread: i64,
}
