//! Route definitions for the prompt configuration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

/// Routes mounted at `/prompts`.
///
/// ```text
/// GET    /config               -> get_config
/// GET    /export               -> export_config
/// GET    /settings             -> get_settings
/// PUT    /settings             -> save_settings
/// GET    /sections/{key}       -> get_section
/// PUT    /sections/{key}       -> update_section
/// POST   /preview              -> preview_prompt
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(prompts::get_config))
        .route("/export", get(prompts::export_config))
        .route(
            "/settings",
            get(prompts::get_settings).put(prompts::save_settings),
        )
        .route(
            "/sections/{key}",
            get(prompts::get_section).put(prompts::update_section),
        )
        .route("/preview", post(prompts::preview_prompt))
}
