pub mod news;
pub mod prompts;
