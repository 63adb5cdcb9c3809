use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;

use crate::models::message::Message;
use crate::providers::base::{Provider, Usage};

/// A system prompt and the messages that accompanied it
pub type RecordedCall = (String, Vec<Message>);

/// A mock provider that returns pre-configured responses for testing
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<Message, String>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of responses
    pub fn new(responses: Vec<Message>) -> Self {
        Self::with_results(responses.into_iter().map(Ok).collect())
    }

    /// Replies with the given texts in order
    pub fn replying(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|text| Message::assistant().with_text(*text))
                .collect(),
        )
    }

    /// Mix of successful replies and failures
    pub fn with_results(responses: Vec<Result<Message, String>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails with the same error
    pub fn failing(error: &str) -> Self {
        Self::with_results((0..32).map(|_| Err(error.to_string())).collect())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<(Message, Usage)> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), messages.to_vec()));

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            Ok((Message::assistant().with_text(""), Usage::default()))
        } else {
            match responses.remove(0) {
                Ok(message) => Ok((message, Usage::default())),
                Err(error) => Err(anyhow!(error)),
            }
        }
    }

    fn model(&self) -> &str {
        "mock"
    }
}
