//! Domain logic for the news rewrite service.
//!
//! Zero internal dependencies: everything here is pure and usable from the
//! repository layer, the AI adapter and the HTTP layer alike.

pub mod article;
pub mod assembly;
pub mod config_export;
pub mod error;
pub mod pagination;
pub mod processing;
pub mod settings;
pub mod templates;
pub mod types;
