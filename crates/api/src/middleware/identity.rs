//! Request identity extractor.
//!
//! There is no authentication: the caller names itself with the `X-User-Id`
//! header, and requests without one act as the configured default user.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Longest accepted user id, matching what history rows reasonably store.
pub const MAX_USER_ID_CHARS: usize = 128;

/// The user a request acts for.
///
/// ```ignore
/// async fn handler(CurrentUser(user_id): CurrentUser) -> AppResult<Json<()>> { ... }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(CurrentUser(state.config.default_user_id.clone()));
        };

        let value = raw
            .to_str()
            .map_err(|_| AppError::BadRequest("X-User-Id must be visible ASCII".into()))?
            .trim();

        if value.is_empty() {
            return Ok(CurrentUser(state.config.default_user_id.clone()));
        }
        if value.chars().count() > MAX_USER_ID_CHARS {
            return Err(AppError::BadRequest(format!(
                "X-User-Id must be at most {MAX_USER_ID_CHARS} characters"
            )));
        }

        Ok(CurrentUser(value.to_string()))
    }
}
