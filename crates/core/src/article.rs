//! Article text validation.
//!
//! Lengths are counted in Unicode scalar values, not bytes, so Turkish
//! characters such as `ğ` or `ş` count as one character each.

use crate::error::CoreError;

/// Minimum accepted article length in characters (after trimming).
pub const MIN_ARTICLE_CHARS: usize = 10;

/// Maximum accepted article length in characters (after trimming).
pub const MAX_ARTICLE_CHARS: usize = 10_000;

/// Validate raw article text and return the trimmed slice on success.
pub fn validate_article_text(text: &str) -> Result<&str, CoreError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Article text must not be empty".to_string(),
        ));
    }

    let chars = trimmed.chars().count();
    if chars < MIN_ARTICLE_CHARS {
        return Err(CoreError::Validation(format!(
            "Article text is too short: minimum {MIN_ARTICLE_CHARS} characters (got {chars})"
        )));
    }
    if chars > MAX_ARTICLE_CHARS {
        return Err(CoreError::Validation(format!(
            "Article text is too long: maximum {MAX_ARTICLE_CHARS} characters (got {chars})"
        )));
    }
    Ok(trimmed)
}
