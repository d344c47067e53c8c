use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk_ai::{AiConfig, GeminiClient};
use newsdesk_api::config::{database_options_from_env, ServerConfig};
use newsdesk_api::router::build_app_router;
use newsdesk_api::state::AppState;
use newsdesk_core::templates::{PromptTemplates, TemplateSource};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Prompt templates ---
    let (templates, source) = PromptTemplates::load(config.prompt_templates_path.as_deref())
        .expect("Failed to load prompt templates");
    match &source {
        TemplateSource::File(path) => {
            tracing::info!(path = %path.display(), "Loaded prompt templates from file")
        }
        TemplateSource::Builtin => tracing::info!("Using built-in prompt templates"),
    }

    // --- AI client ---
    let ai_config = AiConfig::from_env();
    if !ai_config.is_configured() {
        tracing::warn!("GEMINI_API_KEY is not set; processing requests will fail");
    }
    let generator = GeminiClient::new(&ai_config).expect("Failed to build AI client");
    tracing::info!(model = %generator.model(), "AI client ready");

    // --- Database ---
    let db_options =
        database_options_from_env().expect("DATABASE_URL is not a valid Postgres URL");

    let pool = newsdesk_db::create_pool(db_options)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    newsdesk_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    newsdesk_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator: Arc::new(generator),
        templates: Arc::new(templates),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
