#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use newsdesk_ai::{AiError, TextGenerator};
use newsdesk_api::config::ServerConfig;
use newsdesk_api::router::build_app_router;
use newsdesk_api::state::AppState;
use newsdesk_core::templates::PromptTemplates;

/// User id applied to requests without an `x-user-id` header.
pub const DEFAULT_TEST_USER: &str = "test_user";

/// Article used across processing tests.
pub const ANKARA_ARTICLE: &str = "Ankara'da yeni bir köprü açıldı.";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        default_user_id: DEFAULT_TEST_USER.to_string(),
        prompt_templates_path: None,
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Answers with a well-formed JSON article holding as many tags as the
/// prompt asks for, and remembers every prompt it received.
#[derive(Default)]
pub struct StubGenerator {
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let tags: Vec<String> = (1..=requested_tag_count(prompt))
            .map(|i| format!("etiket-{i}"))
            .collect();

        Ok(json!({
            "baslik": "Ankara'da Yeni Köprü Hizmete Girdi",
            "ozet": "Başkentte yeni bir köprü trafiğe açıldı.",
            "haber_metni": "Ankara'da inşası tamamlanan köprü düzenlenen törenle açıldı.",
            "kategori": "Gündem",
            "etiketler": tags,
        })
        .to_string())
    }
}

/// Fails every call the way an overloaded upstream would.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::Api {
            status: 503,
            body: "model overloaded".to_string(),
        })
    }
}

/// Reads `N adet etiket` from the prompt.
fn requested_tag_count(prompt: &str) -> usize {
    prompt
        .find(" adet etiket")
        .and_then(|end| prompt[..end].split_whitespace().last())
        .and_then(|n| n.parse().ok())
        .unwrap_or(5)
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Full application router backed by a [`StubGenerator`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, Arc::new(StubGenerator::default()))
}

/// Full application router with a caller-supplied generator.
pub fn build_test_app_with(pool: PgPool, generator: Arc<dyn TextGenerator>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator,
        templates: Arc::new(PromptTemplates::builtin()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send one request. `user` sets the `x-user-id` header.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, user: &str) -> Response {
    send(app, Method::GET, uri, Some(user), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_as(app: Router, uri: &str, user: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(user), Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_as(app: Router, uri: &str, user: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(user), Some(body)).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Submit an article for `user` and return the response.
pub async fn process_as(app: Router, user: &str, text: &str, settings: Value) -> Response {
    post_json_as(
        app,
        "/api/v1/news/process",
        user,
        json!({ "news_text": text, "settings": settings }),
    )
    .await
}

pub async fn history_row_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM processing_history")
        .fetch_one(pool)
        .await
        .unwrap()
}
