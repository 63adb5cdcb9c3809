//! Student Agent: academic questions, study tips and summaries.
use std::sync::Arc;

use crate::agent::Agent;
use crate::providers::base::Provider;

const SYSTEM_PROMPT: &str = "You are a helpful academic assistant.";

pub struct StudentAgent {
    agent: Agent,
}

impl StudentAgent {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self {
            agent: Agent::new(
                "StudentAgent",
                "Answers academic questions, shares study tips and summarizes text",
                provider,
            ),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub async fn answer_question(&mut self, question: &str) -> String {
        self.ask(&format!("Answer this academic question: {}", question.trim()))
            .await
    }

    pub async fn study_tips(&mut self) -> String {
        self.ask("Give me 3 effective study tips for students.")
            .await
    }

    pub async fn summarize(&mut self, text: &str) -> String {
        self.ask(&format!("Summarize the following text:\n{}", text))
            .await
    }

    async fn ask(&mut self, prompt: &str) -> String {
        self.agent
            .respond(SYSTEM_PROMPT, prompt)
            .await
            .trim()
            .to_string()
    }
}
