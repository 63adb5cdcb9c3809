use std::future::Future;

use anyhow::{anyhow, Result};
use bat::WrappingMode;
use cliclack::spinner;
use console::style;

pub mod rustyline;

pub struct Input {
    pub input_type: InputType,
    pub content: Option<String>,
}

pub enum InputType {
    AskAgain,
    Message,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn bat_theme(&self) -> &'static str {
        match self {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Print model output as highlighted markdown
pub fn render_markdown(content: &str, theme: Theme) -> Result<()> {
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme.bat_theme())
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print()
        .map_err(|e| anyhow!("Failed to render output: {}", e))?;
    println!();
    Ok(())
}

pub fn header(title: &str) {
    println!();
    println!("─── {} ──────────────────────────", style(title).cyan().bold());
}

pub fn notice(text: &str) {
    println!("{}", style(text).dim());
}

pub fn failure(text: &str) {
    println!("{}", style(text).red());
}

/// Show a spinner until `work` finishes
pub async fn busy<F: Future>(message: &str, work: F) -> F::Output {
    let spin = spinner();
    spin.start(format!("{}...", message));
    let output = work.await;
    spin.stop("");
    output
}
