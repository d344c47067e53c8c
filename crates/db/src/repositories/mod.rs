//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Every call is a single statement; nothing
//! is cached.

pub mod processing_history_repo;
pub mod prompt_config_repo;
pub mod prompt_rule_repo;
pub mod prompt_section_repo;
pub mod user_setting_repo;

pub use processing_history_repo::ProcessingHistoryRepo;
pub use prompt_config_repo::PromptConfigRepo;
pub use prompt_rule_repo::PromptRuleRepo;
pub use prompt_section_repo::PromptSectionRepo;
pub use user_setting_repo::UserSettingRepo;
