use std::path::PathBuf;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

/// User id applied when a request carries no `X-User-Id` header.
pub const DEFAULT_USER_ID: &str = "default_user";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90`). Must exceed the AI
    /// call timeout so a slow model surfaces as a recorded failure.
    pub request_timeout_secs: u64,
    /// Identity used for requests without an `X-User-Id` header.
    pub default_user_id: String,
    /// Optional JSON file overriding the built-in prompt templates.
    pub prompt_templates_path: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `3000`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `90`                     |
    /// | `DEFAULT_USER_ID`       | `default_user`           |
    /// | `PROMPT_TEMPLATES_PATH` | unset (built-in set)     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let default_user_id = std::env::var("DEFAULT_USER_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        let prompt_templates_path = std::env::var("PROMPT_TEMPLATES_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            default_user_id,
            prompt_templates_path,
        }
    }
}

/// Resolve the database connection options.
///
/// `DATABASE_URL` wins when set. Otherwise the options are assembled from
/// `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME`.
pub fn database_options_from_env() -> Result<PgConnectOptions, sqlx::Error> {
    if let Some(url) = std::env::var("DATABASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        return PgConnectOptions::from_str(&url);
    }

    let var = |name: &str, default: &str| {
        std::env::var(name).unwrap_or_else(|_| default.to_string())
    };

    let port: u16 = var("DB_PORT", "5432")
        .parse()
        .expect("DB_PORT must be a valid u16");

    Ok(build_connect_options(
        &var("DB_HOST", "localhost"),
        port,
        &var("DB_USER", "postgres"),
        &var("DB_PASSWORD", ""),
        &var("DB_NAME", "haber_editor"),
    ))
}

/// Typed connection options; components are passed through unescaped.
pub fn build_connect_options(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
    name: &str,
) -> PgConnectOptions {
    let options = PgConnectOptions::new()
        .host(host)
        .port(port)
        .username(user)
        .database(name);

    if password.is_empty() {
        options
    } else {
        options.password(password)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
