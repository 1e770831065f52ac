pub mod schema;
pub mod extractor;
pub mod llm;
pub mod prompt;

pub use schema::{ComponentRequest, LlmComponentResponse};
pub use extractor::{extract_component, extract_json_payload, ExtractError};
pub use llm::{CompletionClient, CompletionError, OpenAiClient};

use std::sync::Arc;
use thiserror::Error;

/// Sampling temperature for component generation.
pub const TEMPERATURE: f32 = 0.2;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Error)]
pub enum SynthError {
    #[error("LLM request failed: {0}")]
    Upstream(#[from] CompletionError),

    #[error("Unable to parse LLM response: {0}")]
    MalformedOutput(#[from] ExtractError),
}

/// Turns a component description into a generated HTML document with a single
/// model call.
#[derive(Clone)]
pub struct ComponentSynthesizer {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl ComponentSynthesizer {
    pub fn new(client: Arc<dyn CompletionClient>, model: String) -> Self {
        Self { client, model }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn synthesize(&self, message: &str) -> Result<LlmComponentResponse, SynthError> {
        let prompt = prompt::build_component_prompt(message);

        let raw = self
            .client
            .complete(prompt::SYSTEM_PROMPT, &prompt, &self.model, TEMPERATURE)
            .await?;

        let component = extract_component(&raw)?;

        tracing::info!(
            component = %component.component_name,
            html_bytes = component.html.len(),
            "Component generated"
        );

        Ok(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Call {
        system_prompt: String,
        user_prompt: String,
        model: String,
        temperature: f32,
    }

    struct RecordingClient {
        reply: Option<String>,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingClient {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(
            &self,
            system_prompt: &str,
            user_prompt: &str,
            model: &str,
            temperature: f32,
        ) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push(Call {
                system_prompt: system_prompt.to_string(),
                user_prompt: user_prompt.to_string(),
                model: model.to_string(),
                temperature,
            });
            self.reply.clone().ok_or(CompletionError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: "upstream down".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_synthesize_makes_one_call_with_fixed_parameters() {
        let client = Arc::new(RecordingClient::replying(
            "```json\n{\"component_name\":\"Card\",\"summary\":\"s\",\"html\":\"<div>card</div>\"}\n```",
        ));
        let synthesizer = ComponentSynthesizer::new(client.clone(), "test-model".to_string());

        let component = synthesizer.synthesize("a profile card").await.unwrap();
        assert_eq!(component.component_name, "Card");
        assert_eq!(component.html, "<div>card</div>");

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt, prompt::SYSTEM_PROMPT);
        assert_eq!(calls[0].user_prompt, prompt::build_component_prompt("a profile card"));
        assert_eq!(calls[0].model, "test-model");
        assert_eq!(calls[0].temperature, TEMPERATURE);
    }

    #[tokio::test]
    async fn test_client_failure_is_upstream_error() {
        let synthesizer =
            ComponentSynthesizer::new(Arc::new(RecordingClient::failing()), DEFAULT_MODEL.to_string());

        let err = synthesizer.synthesize("x").await.unwrap_err();
        assert!(matches!(err, SynthError::Upstream(_)));
        assert!(err.to_string().starts_with("LLM request failed: "));
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_malformed_output() {
        let synthesizer = ComponentSynthesizer::new(
            Arc::new(RecordingClient::replying("I cannot help with that.")),
            DEFAULT_MODEL.to_string(),
        );

        let err = synthesizer.synthesize("x").await.unwrap_err();
        assert!(matches!(err, SynthError::MalformedOutput(_)));
        assert!(err.to_string().starts_with("Unable to parse LLM response: "));
    }
}
