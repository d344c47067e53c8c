//! Integration tests for the processing history lifecycle.

use assert_matches::assert_matches;
use newsdesk_core::processing::ProcessingStatus;
use newsdesk_db::models::processing_history::{CreateProcessingRecord, ProcessingStatistics};
use newsdesk_db::repositories::{ProcessingHistoryRepo, PromptConfigRepo};
use sqlx::PgPool;

const USER: &str = "editor";

async fn new_record(pool: &PgPool, user_id: &str) -> i64 {
    let config = PromptConfigRepo::find_active(pool).await.unwrap();
    let input = CreateProcessingRecord {
        user_id: user_id.to_string(),
        config_id: config.map(|c| c.id),
        original_text: "Ankara'da yeni bir köprü açıldı.".to_string(),
        prompt_text: Some("GÖREV TANIMI: ...".to_string()),
        settings_used: serde_json::json!({ "tagCount": 3 }),
    };
    let record = ProcessingHistoryRepo::create_pending(pool, &input)
        .await
        .unwrap();
    assert_eq!(record.processing_status, ProcessingStatus::Pending.as_str());
    record.id
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_happy_path_lifecycle(pool: PgPool) {
    let id = new_record(&pool, USER).await;

    let processing = ProcessingHistoryRepo::mark_processing(&pool, id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(processing.processing_status, "processing");
    assert!(processing.completed_at.is_none());

    let done = ProcessingHistoryRepo::complete(&pool, id, "{\"baslik\": \"x\"}", 120)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done.processing_status, "completed");
    assert_eq!(done.processed_text.as_deref(), Some("{\"baslik\": \"x\"}"));
    assert_eq!(done.processing_time_ms, Some(120));
    assert!(done.completed_at.is_some());
    assert_eq!(done.settings_used["tagCount"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failure_records_message(pool: PgPool) {
    let id = new_record(&pool, USER).await;
    ProcessingHistoryRepo::mark_processing(&pool, id)
        .await
        .unwrap();

    let failed = ProcessingHistoryRepo::fail(&pool, id, "upstream 500", 42)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(failed.processing_status, "failed");
    assert_eq!(failed.error_message.as_deref(), Some("upstream 500"));
    assert!(failed.processed_text.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_can_fail_directly(pool: PgPool) {
    let id = new_record(&pool, USER).await;
    let failed = ProcessingHistoryRepo::fail(&pool, id, "not configured", 0)
        .await
        .unwrap();
    assert_matches!(failed, Some(r) if r.processing_status == "failed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pending_cannot_complete(pool: PgPool) {
    let id = new_record(&pool, USER).await;
    let result = ProcessingHistoryRepo::complete(&pool, id, "text", 1)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_terminal_rows_are_never_updated(pool: PgPool) {
    let id = new_record(&pool, USER).await;
    ProcessingHistoryRepo::mark_processing(&pool, id)
        .await
        .unwrap();
    ProcessingHistoryRepo::complete(&pool, id, "ilk sonuç", 10)
        .await
        .unwrap()
        .unwrap();

    assert!(ProcessingHistoryRepo::fail(&pool, id, "late", 1)
        .await
        .unwrap()
        .is_none());
    assert!(ProcessingHistoryRepo::complete(&pool, id, "ikinci", 1)
        .await
        .unwrap()
        .is_none());
    assert!(ProcessingHistoryRepo::mark_processing(&pool, id)
        .await
        .unwrap()
        .is_none());

    let entry = ProcessingHistoryRepo::find_for_user(&pool, id, USER)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(entry.processing_status, "completed");
    assert_eq!(entry.processed_text.as_deref(), Some("ilk sonuç"));
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_newest_first_with_config_name(pool: PgPool) {
    let first = new_record(&pool, USER).await;
    let second = new_record(&pool, USER).await;
    new_record(&pool, "someone-else").await;

    let entries = ProcessingHistoryRepo::list_for_user(&pool, USER, 20, 0)
        .await
        .unwrap();

    let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert!(entries[0].config_name.is_some());

    let page = ProcessingHistoryRepo::list_for_user(&pool, USER, 1, 1)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, first);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_for_user_hides_other_users(pool: PgPool) {
    let id = new_record(&pool, USER).await;
    assert!(ProcessingHistoryRepo::find_for_user(&pool, id, "intruder")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_mark_read(pool: PgPool) {
    let id = new_record(&pool, USER).await;

    assert!(!ProcessingHistoryRepo::mark_read(&pool, id, "intruder")
        .await
        .unwrap());
    assert!(ProcessingHistoryRepo::mark_read(&pool, id, USER).await.unwrap());
    assert!(!ProcessingHistoryRepo::mark_read(&pool, 999_999, USER)
        .await
        .unwrap());

    let entry = ProcessingHistoryRepo::find_for_user(&pool, id, USER)
        .await
        .unwrap()
        .unwrap();
    assert!(entry.is_read);
    assert_eq!(entry.processing_status, "pending");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_statistics(pool: PgPool) {
    let empty = ProcessingHistoryRepo::statistics_for_user(&pool, USER)
        .await
        .unwrap();
    assert_eq!(empty, ProcessingStatistics::default());

    let done = new_record(&pool, USER).await;
    ProcessingHistoryRepo::mark_processing(&pool, done).await.unwrap();
    ProcessingHistoryRepo::complete(&pool, done, "ok", 5).await.unwrap();
    ProcessingHistoryRepo::mark_read(&pool, done, USER).await.unwrap();

    let failed = new_record(&pool, USER).await;
    ProcessingHistoryRepo::fail(&pool, failed, "boom", 5).await.unwrap();

    let running = new_record(&pool, USER).await;
    ProcessingHistoryRepo::mark_processing(&pool, running).await.unwrap();

    new_record(&pool, USER).await;
    new_record(&pool, "other").await;

    let stats = ProcessingHistoryRepo::statistics_for_user(&pool, USER)
        .await
        .unwrap();
    assert_eq!(
        stats,
        ProcessingStatistics {
            total: 4,
            pending: 1,
            processing: 1,
            completed: 1,
            failed: 1,
            unread: 3,
        }
    );
}
