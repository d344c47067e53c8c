//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus `Deserialize` DTOs where the API writes the table.

pub mod processing_history;
pub mod prompt_config;
pub mod prompt_rule;
pub mod prompt_section;
pub mod user_setting;
