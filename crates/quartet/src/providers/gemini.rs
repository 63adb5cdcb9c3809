use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::base::{Provider, Usage};
use super::configs::GeminiProviderConfig;
use super::utils::{gemini_response_to_message, messages_to_gemini_spec, post_with_retry};
use crate::models::message::Message;

pub const GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

pub struct GeminiProvider {
    client: Client,
    config: GeminiProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiProviderConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.policy.timeout).build()?;

        Ok(Self { client, config })
    }

    fn get_usage(data: &Value) -> Usage {
        let Some(usage) = data.get("usageMetadata") else {
            return Usage::default();
        };

        let count = |key: &str| usage.get(key).and_then(|v| v.as_i64()).map(|v| v as i32);
        let input_tokens = count("promptTokenCount");
        let output_tokens = count("candidatesTokenCount");
        let total_tokens = count("totalTokenCount").or(match (input_tokens, output_tokens) {
            (Some(input), Some(output)) => Some(input + output),
            _ => None,
        });

        Usage::new(input_tokens, output_tokens, total_tokens)
    }

    fn build_payload(&self, system: &str, messages: &[Message]) -> Value {
        let mut payload = json!({
            "contents": messages_to_gemini_spec(messages),
        });

        let mut generation_config = serde_json::Map::new();
        if let Some(temp) = self.config.temperature {
            generation_config.insert("temperature".to_string(), json!(temp));
        }
        if let Some(tokens) = self.config.max_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(tokens));
        }

        if let Some(object) = payload.as_object_mut() {
            if !system.is_empty() {
                object.insert(
                    "systemInstruction".to_string(),
                    json!({"parts": [{"text": system}]}),
                );
            }
            if !generation_config.is_empty() {
                object.insert(
                    "generationConfig".to_string(),
                    Value::Object(generation_config),
                );
            }
        }
        payload
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<(Message, Usage)> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.host.trim_end_matches('/'),
            self.config.model
        );
        let headers = [("x-goog-api-key", self.config.api_key.clone())];
        let payload = self.build_payload(system, messages);

        tracing::debug!(model = %self.config.model, messages = messages.len(), "gemini request");
        let response =
            post_with_retry(&self.client, &url, &headers, &payload, &self.config.policy).await?;

        if let Some(error) = response.get("error") {
            return Err(anyhow!("Gemini API error: {}", error));
        }

        let message = gemini_response_to_message(&response)?;
        Ok((message, Self::get_usage(&response)))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
