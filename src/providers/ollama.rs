use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::providers::{completion_content, LlmProvider, INGREDIENT_NORMALIZER_PROMPT};
use log::debug;
use reqwest::blocking::Client;
use serde_json::{json, Value};

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(config: &InferenceConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        OllamaProvider {
            client: Client::new(),
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

impl LlmProvider for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    fn categorize(&self, ingredient: &str) -> Result<String, InferenceError> {
        // Ollama uses OpenAI-compatible API
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": INGREDIENT_NORMALIZER_PROMPT},
                    {"role": "user", "content": ingredient}
                ],
                "response_format": {"type": "json_object"},
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()?;

        let response_body: Value = response.json()?;
        debug!("Ollama response: {:?}", response_body);
        completion_content(&response_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_categorize_without_auth_header() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"message": {"content": "{\"ingredients\": [{\"quantity\": null, \"ingredient\": \"N/A\"}]}"}}]}"#,
            )
            .create();

        let config = InferenceConfig {
            provider: "ollama".to_string(),
            model: "llama3".to_string(),
            base_url: Some(server.url()),
            ..InferenceConfig::default()
        };
        let provider = OllamaProvider::new(&config);

        let reply = provider.categorize("for garnish").unwrap();
        assert!(reply.contains("N/A"));
        mock.assert();
    }
}
