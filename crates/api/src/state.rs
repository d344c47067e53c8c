use std::sync::Arc;

use newsdesk_ai::TextGenerator;
use newsdesk_core::templates::PromptTemplates;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind an `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: newsdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Backend that turns a prompt into rewritten text.
    pub generator: Arc<dyn TextGenerator>,
    /// Base prompt templates resolved at startup. Database sections are
    /// layered on top per request.
    pub templates: Arc<PromptTemplates>,
}
