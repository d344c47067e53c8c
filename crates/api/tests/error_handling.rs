//! `AppError` to HTTP response mapping, checked through `IntoResponse`
//! without a running server.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use common::{body_json, build_test_app, history_row_count, post_json, put_json};
use http_body_util::BodyExt;
use newsdesk_api::error::AppError;
use newsdesk_core::error::CoreError;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("tagCount must be between 1 and 10".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "tagCount must be between 1 and 10");
}

#[tokio::test]
async fn not_configured_returns_404() {
    let err = AppError::Core(CoreError::NotConfigured("No active prompt configuration".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_CONFIGURED");
}

#[tokio::test]
async fn not_found_by_id_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "ProcessingRecord",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "ProcessingRecord with id 42 not found");
}

#[tokio::test]
async fn not_found_by_key_names_the_key() {
    let err = AppError::Core(CoreError::NotFoundKey {
        entity: "PromptSection",
        key: "intro".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "PromptSection 'intro' not found");
}

#[tokio::test]
async fn conflict_returns_409() {
    let err = AppError::Core(CoreError::Conflict("record already completed".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
}

#[tokio::test]
async fn bad_request_returns_400() {
    let err = AppError::BadRequest("X-User-Id must be visible ASCII".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn processing_failure_returns_502_with_record_id() {
    let err = AppError::Processing {
        record_id: 7,
        message: "AI API error (503): model overloaded".into(),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["code"], "AI_PROCESSING_FAILED");
    assert_eq!(json["processing_id"], 7);
    assert_eq!(json["error"], "AI API error (503): model overloaded");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    for err in [
        AppError::InternalError("pool exhausted at 10.0.0.3".into()),
        AppError::Core(CoreError::Internal("template file unreadable".into())),
        AppError::Database(sqlx::Error::PoolTimedOut),
    ] {
        let (status, json) = error_to_response(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"], "An internal error occurred");
    }
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unique_violation_returns_409(pool: PgPool) {
    let err = sqlx::query(
        "INSERT INTO prompt_configs (name, version, is_active, is_default) \
         VALUES ('Varsayılan Haber Editörü', '1.0', false, false)",
    )
    .execute(&pool)
    .await
    .unwrap_err();

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("uq_prompt_configs_name_version"));
}

// ---------------------------------------------------------------------------
// Request body rejections
// ---------------------------------------------------------------------------

async fn send_raw(pool: PgPool, method: Method, uri: &str, body: &'static str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    build_test_app(pool).oneshot(request).await.unwrap()
}

fn assert_json_content_type(response: &Response) {
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("application/json"), "{content_type}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mistyped_process_body_returns_400_envelope(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/news/process",
        json!({ "news_text": 12345 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_json_content_type(&response);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("news_text"));

    assert_eq!(history_row_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_json_returns_400_envelope(pool: PgPool) {
    for (method, uri) in [
        (Method::POST, "/api/v1/news/process"),
        (Method::PUT, "/api/v1/prompts/settings"),
        (Method::PUT, "/api/v1/prompts/sections/task_definition"),
        (Method::POST, "/api/v1/prompts/preview"),
    ] {
        let response = send_raw(pool.clone(), method, uri, "{\"news_text\": ").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_json_content_type(&response);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR", "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mistyped_prompt_bodies_return_400_envelope(pool: PgPool) {
    let response = put_json(
        build_test_app(pool.clone()),
        "/api/v1/prompts/settings",
        json!({ "settings": "tagCount=3" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = put_json(
        build_test_app(pool.clone()),
        "/api/v1/prompts/sections/task_definition",
        json!({ "prompt_text": 42 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        build_test_app(pool),
        "/api/v1/prompts/preview",
        json!({ "news_text": ["Ankara"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
