use async_trait::async_trait;
use newsdesk_core::article::validate_article_text;

use crate::error::AiError;

/// Produces text for a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

/// Rewrite an article with `generator`.
///
/// The article is validated first (10 to 10 000 characters after trimming);
/// an invalid article never reaches the generator.
pub async fn rewrite_article(
    generator: &dyn TextGenerator,
    article: &str,
    prompt: &str,
) -> Result<String, AiError> {
    validate_article_text(article).map_err(|e| AiError::InvalidInput(e.to_string()))?;
    generator.generate(prompt).await
}
