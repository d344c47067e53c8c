//! Route definitions for article processing and history.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::news;
use crate::state::AppState;

/// Routes mounted at `/news`.
///
/// ```text
/// POST   /process              -> process_news
/// GET    /history              -> list_history
/// GET    /history/{id}         -> get_history_entry
/// POST   /history/{id}/read    -> mark_read
/// GET    /statistics           -> statistics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process", post(news::process_news))
        .route("/history", get(news::list_history))
        .route("/history/{id}", get(news::get_history_entry))
        .route("/history/{id}/read", post(news::mark_read))
        .route("/statistics", get(news::statistics))
}
