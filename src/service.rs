use std::sync::Arc;

use tracing::{error, info};

use crate::error::SuggestionError;
use crate::llm_interaction::TextGenerator;
use crate::models::{NameSuggestion, SuggestionRequest};
use crate::parser::parse_suggestions;
use crate::prompt::build_prompt;

/// Prompt in, parsed names out.
#[derive(Clone)]
pub struct SuggestionService {
    generator: Arc<dyn TextGenerator>,
}

impl SuggestionService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Ask the model for another round of names.
    ///
    /// Every upstream failure becomes [`SuggestionError::GenerationFailed`].
    /// An empty list is returned as-is; callers decide what it means.
    pub async fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> Result<Vec<NameSuggestion>, SuggestionError> {
        let prompt = build_prompt(request);

        let reply = self.generator.generate(&prompt).await.map_err(|e| {
            error!("Error generating names: {:?}", e);
            SuggestionError::GenerationFailed
        })?;

        let names = parse_suggestions(&reply);
        info!(
            count = names.len(),
            previous = request.previous_names.len(),
            "Parsed name suggestions"
        );
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingGenerator {
        reply: anyhow::Result<String>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(anyhow!("{e}")),
            }
        }
    }

    fn service_with(reply: anyhow::Result<String>) -> (SuggestionService, Arc<RecordingGenerator>) {
        let generator = Arc::new(RecordingGenerator {
            reply,
            prompts: Mutex::new(Vec::new()),
        });
        (SuggestionService::new(generator.clone()), generator)
    }

    #[tokio::test]
    async fn test_suggest_parses_reply() {
        let (service, generator) =
            service_with(Ok("1. Aarav - One who is peaceful\n2. Priya - Beloved".to_string()));

        let request = SuggestionRequest {
            feedback: "classic names".to_string(),
            ..Default::default()
        };
        let names = service.suggest(&request).await.unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(names[0].name, "Aarav");
        assert_eq!(names[1].meaning, "Beloved");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("User feedback: classic names"));
    }

    #[tokio::test]
    async fn test_generator_error_collapses_to_generation_failed() {
        let (service, _) = service_with(Err(anyhow!("429 rate limited")));

        let result = service.suggest(&SuggestionRequest::default()).await;
        assert_eq!(result, Err(SuggestionError::GenerationFailed));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_empty_not_error() {
        let (service, _) = service_with(Ok("I'm sorry, I can't help with that.".to_string()));

        let result = service.suggest(&SuggestionRequest::default()).await;
        assert_eq!(result, Ok(vec![]));
    }
}
