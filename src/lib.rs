pub mod chat;
pub mod constants;
pub mod error;
pub mod llm_interaction;
pub mod models;
pub mod parser;
pub mod prompt;
pub mod service;
pub mod session;
pub mod web_server;

pub use error::SuggestionError;
pub use llm_interaction::{AnthropicGenerator, TextGenerator};
pub use models::{Gender, NameSuggestion, Preferences, SuggestionRequest};
pub use parser::parse_suggestions;
pub use prompt::build_prompt;
pub use service::SuggestionService;
pub use session::{Phase, Round, Session, Step, Transition};
