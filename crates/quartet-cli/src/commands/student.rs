use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;

use quartet::providers::base::Provider;
use quartet::student::StudentAgent;

use super::text_arg;
use crate::prompt::{busy, header, render_markdown, Theme};

#[derive(Subcommand)]
pub enum StudentCommand {
    /// Answer an academic question
    Ask { question: String },
    /// Three study tips
    Tips,
    /// Summarize text; pass `-` to read it from stdin
    Summarize { text: String },
}

pub async fn run(command: StudentCommand, provider: Arc<dyn Provider>) -> Result<()> {
    let mut student = StudentAgent::new(provider);

    let (title, reply) = match command {
        StudentCommand::Ask { question } => (
            "Answer",
            busy("Thinking", student.answer_question(&question)).await,
        ),
        StudentCommand::Tips => ("Study Tips", busy("Thinking", student.study_tips()).await),
        StudentCommand::Summarize { text } => {
            let text = text_arg(&text)?;
            ("Summary", busy("Summarizing", student.summarize(&text)).await)
        }
    };

    header(title);
    render_markdown(&reply, Theme::Dark)
}
