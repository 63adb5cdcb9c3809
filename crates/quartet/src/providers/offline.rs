use anyhow::Result;
use async_trait::async_trait;

use super::base::{Provider, Usage};
use crate::models::message::Message;
use crate::models::role::Role;

/// Stand-in used when no API key is configured.
///
/// Echoes the latest user turn so every app stays usable in demo mode.
#[derive(Debug, Default, Clone)]
pub struct OfflineProvider;

impl OfflineProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Provider for OfflineProvider {
    async fn complete(&self, _system: &str, messages: &[Message]) -> Result<(Message, Usage)> {
        let prompt = messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(|message| message.text.as_str())
            .unwrap_or_default();

        Ok((
            Message::assistant().with_text(format!("Mock response: {}", prompt)),
            Usage::default(),
        ))
    }

    fn model(&self) -> &str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echoes_last_user_message() -> Result<()> {
        let provider = OfflineProvider::new();
        let messages = vec![
            Message::user().with_text("first"),
            Message::assistant().with_text("reply"),
            Message::user().with_text("Plan a trip to Bali"),
        ];
        let (message, usage) = provider.complete("system", &messages).await?;
        assert_eq!(message.text, "Mock response: Plan a trip to Bali");
        assert_eq!(usage, Usage::default());
        Ok(())
    }
}
