use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AgentError, AgentResult};
use crate::models::message::Message;
use crate::models::role::Role;
use crate::models::tool::ToolSpec;
use crate::prompt_template::render_prompt;
use crate::providers::base::Provider;

/// Number of past turns replayed into the system prompt
pub const HISTORY_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub description: String,
    pub tools: Vec<String>,
    pub history_len: usize,
}

/// Shape requested from the model, appended to the system prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Text,
    List,
    Json,
}

impl ResponseFormat {
    fn instruction(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "",
            ResponseFormat::List => "\n\nPlease respond with a clear list format.",
            ResponseFormat::Json => "\n\nPlease respond in valid JSON format.",
        }
    }
}

/// Turn a failed call into the text shown to the user
pub fn error_reply(err: &AgentError) -> String {
    let detail = match err {
        AgentError::Provider(detail) => detail.clone(),
        other => other.to_string(),
    };
    format!("Error generating response: {}", detail)
}

#[derive(Serialize)]
struct PromptContext<'a> {
    name: &'a str,
    description: &'a str,
    tools: Option<String>,
    context: Option<&'a str>,
    history: &'a [HistoryEntry],
}

/// A named model persona with advertised tools and an in-memory transcript.
///
/// Tools are only described to the model; nothing is executed on its behalf.
pub struct Agent {
    name: String,
    description: String,
    tools: Vec<ToolSpec>,
    history: Vec<HistoryEntry>,
    provider: Arc<dyn Provider>,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        provider: Arc<dyn Provider>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tools: Vec::new(),
            history: Vec::new(),
            provider,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn add_tool(&mut self, tool: ToolSpec) {
        self.tools.push(tool);
    }

    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn add_to_history(&mut self, role: Role, content: impl Into<String>) {
        self.history.push(HistoryEntry {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn info(&self) -> AgentInfo {
        AgentInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            tools: self.tools.iter().map(|tool| tool.name.clone()).collect(),
            history_len: self.history.len(),
        }
    }

    /// Render the system prompt: identity, tools, optional context and the
    /// most recent turns of history.
    pub fn build_prompt(&self, context: Option<&str>) -> AgentResult<String> {
        let tools = if self.tools.is_empty() {
            None
        } else {
            Some(
                serde_json::to_string_pretty(&self.tools)
                    .map_err(|e| AgentError::Internal(e.to_string()))?,
            )
        };
        let start = self.history.len().saturating_sub(HISTORY_WINDOW);

        let prompt = render_prompt(
            "agent_system.md",
            &PromptContext {
                name: &self.name,
                description: &self.description,
                tools,
                context: context.filter(|c| !c.is_empty()),
                history: &self.history[start..],
            },
        )?;
        Ok(prompt)
    }

    pub async fn try_ask(&self, request: &str, context: Option<&str>) -> AgentResult<String> {
        let system = self.build_prompt(context)?;
        self.complete(&system, request).await
    }

    /// Like [`Agent::try_ask`], but failures come back as the error reply text
    pub async fn ask(&self, request: &str, context: Option<&str>) -> String {
        match self.try_ask(request, context).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(agent = %self.name, error = %err, "model call failed");
                error_reply(&err)
            }
        }
    }

    /// Send `user_input` under a caller-supplied system prompt, recording
    /// both turns when the call succeeds.
    pub async fn try_respond(
        &mut self,
        system: &str,
        user_input: &str,
        format: ResponseFormat,
    ) -> AgentResult<String> {
        let system = format!("{}{}", system, format.instruction());
        let text = self.complete(&system, user_input).await?;
        self.add_to_history(Role::User, user_input);
        self.add_to_history(Role::Assistant, text.clone());
        Ok(text)
    }

    pub async fn respond(&mut self, system: &str, user_input: &str) -> String {
        self.respond_as(system, user_input, ResponseFormat::Text).await
    }

    pub async fn respond_as(
        &mut self,
        system: &str,
        user_input: &str,
        format: ResponseFormat,
    ) -> String {
        match self.try_respond(system, user_input, format).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(agent = %self.name, error = %err, "model call failed");
                error_reply(&err)
            }
        }
    }

    async fn complete(&self, system: &str, user_input: &str) -> AgentResult<String> {
        tracing::debug!(
            agent = %self.name,
            model = self.provider.model(),
            system_len = system.len(),
            "calling model"
        );
        let messages = [Message::user().with_text(user_input)];
        let (reply, usage) = self
            .provider
            .complete(system, &messages)
            .await
            .map_err(|e| AgentError::Provider(format!("{:#}", e)))?;
        tracing::debug!(agent = %self.name, usage = ?usage, "model replied");
        Ok(reply.text)
    }
}
