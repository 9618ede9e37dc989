// Settings read from the environment (a `.env` file is loaded first by main).

use std::env;

lazy_static::lazy_static! {
    pub static ref ANTHROPIC_API_URL: String = env::var("ANTHROPIC_API_URL").unwrap_or_else(|_| "https://api.anthropic.com".to_string());
    // Empty means no credential; generation fails instead of start-up.
    pub static ref ANTHROPIC_API_KEY: String = env::var("ANTHROPIC_API_KEY").unwrap_or_default();
    pub static ref NAME_FINDER_MODEL: String = env::var("NAME_FINDER_MODEL").unwrap_or_else(|_| "claude-3-sonnet-20240229".to_string());
    pub static ref TEMPLATES_DIR: String = env::var("NAME_FINDER_TEMPLATES_DIR").unwrap_or_else(|_| "templates".to_string());
    pub static ref STATIC_DIR: String = env::var("NAME_FINDER_STATIC_DIR").unwrap_or_else(|_| "static".to_string());
}

pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";
pub const MAX_TOKENS: u32 = 1024;
