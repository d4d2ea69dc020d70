//! Ollama-backed inference adapter via rig.
//!
//! All pipeline prompts are extraction or classification tasks, so requests
//! run at temperature 0. The adapter is one prompt → one completion; anything
//! that goes wrong here is a structural fault for the run.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::{AssistantContent, CompletionModel};
use rig::providers::ollama;
use tracing::instrument;

use super::{AdapterError, Inference};

/// [`Inference`] implementation talking to a local Ollama server.
pub struct OllamaInference {
    client: ollama::Client,
    model: String,
}

impl OllamaInference {
    /// Create an adapter for the given model on the default local endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: ollama::Client::builder()
                .api_key(rig::client::Nothing)
                .build()
                .expect("default ollama client"),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Inference for OllamaInference {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &str) -> Result<String, AdapterError> {
        let model = self.client.completion_model(&self.model);
        let request = model
            .completion_request(rig::completion::Message::user(prompt.to_owned()))
            .temperature(0.0)
            .build();

        let response = model
            .completion(request)
            .await
            .map_err(|e| AdapterError::Provider {
                provider: "ollama",
                message: format!("completion failed: {e}"),
            })?;

        let text = response
            .choice
            .into_iter()
            .filter_map(|content| match content {
                AssistantContent::Text(text) => Some(text.text),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(AdapterError::Provider {
                provider: "ollama",
                message: "completion contained no text content".to_string(),
            });
        }
        Ok(text)
    }
}
