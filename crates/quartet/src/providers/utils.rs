use anyhow::{anyhow, Result};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use super::configs::RequestPolicy;
use crate::errors::ProviderError;
use crate::models::message::Message;
use crate::models::role::Role;

/// Convert internal Message format to OpenAI's API message specification
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .filter(|message| !message.text.is_empty())
        .map(|message| {
            json!({
                "role": message.role,
                "content": message.text,
            })
        })
        .collect()
}

/// Convert OpenAI's API response to internal Message format
pub fn openai_response_to_message(response: &Value) -> Result<Message> {
    let original = &response["choices"][0]["message"];
    let text = original
        .get("content")
        .and_then(|content| content.as_str())
        .ok_or_else(|| {
            ProviderError::InvalidResponse(format!("No text content in response: {}", original))
        })?;

    Ok(Message::assistant().with_text(text))
}

/// Convert internal messages to Gemini `contents`.
///
/// Gemini only knows `user` and `model` turns; system text travels separately
/// in `systemInstruction`, so any system-role message is sent as a user turn.
pub fn messages_to_gemini_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .filter(|message| !message.text.is_empty())
        .map(|message| {
            let role = match message.role {
                Role::Assistant => "model",
                Role::User | Role::System => "user",
            };
            json!({
                "role": role,
                "parts": [{"text": message.text}],
            })
        })
        .collect()
}

/// Convert a Gemini generateContent response to internal Message format
pub fn gemini_response_to_message(response: &Value) -> Result<Message> {
    let Some(candidate) = response.get("candidates").and_then(|c| c.get(0)) else {
        if let Some(reason) = response
            .pointer("/promptFeedback/blockReason")
            .and_then(|r| r.as_str())
        {
            return Err(anyhow!("Prompt blocked by safety filters: {}", reason));
        }
        return Err(ProviderError::InvalidResponse("No candidates in response".to_string()).into());
    };

    let parts = candidate
        .pointer("/content/parts")
        .and_then(|parts| parts.as_array())
        .ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "Candidate has no content (finishReason: {})",
                candidate
                    .get("finishReason")
                    .and_then(|r| r.as_str())
                    .unwrap_or("unknown")
            ))
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
        .collect();

    Ok(Message::assistant().with_text(text))
}

#[derive(Debug, thiserror::Error)]
#[error("Context length exceeded. Message: {0}")]
pub struct ContextLengthExceededError(String);

pub fn check_openai_context_length_error(error: &Value) -> Option<ContextLengthExceededError> {
    let code = error.get("code")?.as_str()?;
    if code == "context_length_exceeded" || code == "string_above_max_length" {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        Some(ContextLengthExceededError(message))
    } else {
        None
    }
}

/// POST a JSON payload, retrying transient failures with exponential backoff.
pub async fn post_with_retry(
    client: &Client,
    url: &str,
    headers: &[(&str, String)],
    payload: &Value,
    policy: &RequestPolicy,
) -> Result<Value, ProviderError> {
    let mut attempt: u32 = 0;
    loop {
        match post_once(client, url, headers, payload).await {
            Ok(body) => return Ok(body),
            Err(err) if err.is_transient() && attempt < policy.max_retries => {
                let delay = policy.initial_backoff * 2u32.saturating_pow(attempt);
                attempt += 1;
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    "transient provider failure, retrying: {}",
                    err
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn post_once(
    client: &Client,
    url: &str,
    headers: &[(&str, String)],
    payload: &Value,
) -> Result<Value, ProviderError> {
    let mut request = client.post(url).json(payload);
    for (name, value) in headers {
        request = request.header(*name, value);
    }
    let response = request.send().await?;

    match response.status() {
        StatusCode::OK => response
            .json()
            .await
            .map_err(|err| ProviderError::InvalidResponse(err.to_string())),
        status if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() => {
            Err(ProviderError::Server {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
        status => Err(ProviderError::Request {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}
