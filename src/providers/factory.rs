use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::providers::{LlmProvider, OllamaProvider, OpenAIProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the configured provider
    pub fn create(config: &InferenceConfig) -> Result<Box<dyn LlmProvider>, InferenceError> {
        if !config.enabled {
            return Err(InferenceError::ProviderDisabled(config.provider.clone()));
        }

        match config.provider.as_str() {
            "openai" => Ok(Box::new(OpenAIProvider::new(config)?)),
            "ollama" => Ok(Box::new(OllamaProvider::new(config))),
            other => Err(InferenceError::UnknownProvider(other.to_string())),
        }
    }
}
