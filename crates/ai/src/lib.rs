//! Language model client for article rewriting.
//!
//! [`TextGenerator`] is the seam the HTTP layer depends on; [`GeminiClient`]
//! is the production implementation calling the Gemini `generateContent`
//! REST endpoint.

pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;

pub use config::AiConfig;
pub use error::AiError;
pub use gemini::GeminiClient;
pub use generator::{rewrite_article, TextGenerator};
