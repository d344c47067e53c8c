pub mod health;
pub mod news;
pub mod prompts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /news/process                     rewrite an article (POST)
/// /news/history                     caller's history (GET)
/// /news/history/{id}                one record (GET)
/// /news/history/{id}/read           mark read (POST)
/// /news/statistics                  per-status counts (GET)
///
/// /prompts/config                   active configuration (GET)
/// /prompts/export                   configuration export (GET)
/// /prompts/settings                 effective settings (GET), save (PUT)
/// /prompts/sections/{key}           one section (GET), replace text (PUT)
/// /prompts/preview                  build a prompt without the AI (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/news", news::router())
        .nest("/prompts", prompts::router())
}
