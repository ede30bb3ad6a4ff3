mod factory;
mod ollama;
mod open_ai;
mod prompt;

pub use factory::ProviderFactory;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::INGREDIENT_NORMALIZER_PROMPT;

use crate::error::InferenceError;
use serde_json::Value;

/// Unified trait for the text inference services
pub trait LlmProvider {
    /// Get the provider name (e.g., "openai", "ollama")
    fn provider_name(&self) -> &str;

    /// Send one raw ingredient line and return the reply text.
    ///
    /// The reply is expected to be the JSON document described by
    /// [`INGREDIENT_NORMALIZER_PROMPT`]; parsing it is up to the caller.
    fn categorize(&self, ingredient: &str) -> Result<String, InferenceError>;
}

/// Pulls the completion text out of an OpenAI-compatible chat response
pub(crate) fn completion_content(response_body: &Value) -> Result<String, InferenceError> {
    if let Some(error) = response_body.get("error") {
        let message = error
            .as_str()
            .or_else(|| error["message"].as_str())
            .unwrap_or("Unknown error");
        return Err(InferenceError::Api(message.to_string()));
    }

    response_body["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or(InferenceError::MissingContent)
}
