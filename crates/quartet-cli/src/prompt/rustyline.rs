use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use super::{Input, InputType, Theme};

const PROMPT: &str = "\x1b[1m\x1b[38;5;30m> \x1b[0m";

/// Line editor for the interactive loops. `/exit`, `/t` and `/help` are
/// handled here; `quit_words` also end the session.
pub struct RustylinePrompt {
    editor: DefaultEditor,
    theme: Theme,
    quit_words: &'static [&'static str],
}

impl RustylinePrompt {
    pub fn new(quit_words: &'static [&'static str]) -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
            theme: Theme::Dark,
            quit_words,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn get_input(&mut self) -> Result<Input> {
        let line = match self.editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(exit()),
            Err(e) => {
                eprintln!("Input error: {}", e);
                return Ok(exit());
            }
        };
        let line = line.trim();
        if !line.is_empty() {
            // history is a convenience only
            let _ = self.editor.add_history_entry(line);
        }
        Ok(self.interpret(line))
    }

    fn interpret(&mut self, line: &str) -> Input {
        if line.is_empty() {
            return ask_again();
        }
        if line.eq_ignore_ascii_case("/exit") || line.eq_ignore_ascii_case("/quit") {
            return exit();
        }
        if line.eq_ignore_ascii_case("/t") {
            self.theme = self.theme.toggled();
            println!("Switching to {:?} theme", self.theme);
            return ask_again();
        }
        if line.eq_ignore_ascii_case("/?") || line.eq_ignore_ascii_case("/help") {
            println!("Commands:");
            println!("/exit - Exit the session");
            println!("/t - Toggle Light/Dark theme");
            println!("/? | /help - Display this help message");
            return ask_again();
        }

        Input {
            input_type: if self
                .quit_words
                .iter()
                .any(|word| line.eq_ignore_ascii_case(word))
            {
                InputType::Exit
            } else {
                InputType::Message
            },
            content: Some(line.to_string()),
        }
    }
}

fn exit() -> Input {
    Input {
        input_type: InputType::Exit,
        content: None,
    }
}

fn ask_again() -> Input {
    Input {
        input_type: InputType::AskAgain,
        content: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> RustylinePrompt {
        RustylinePrompt::new(&["quit", "exit"]).unwrap()
    }

    #[test]
    fn test_slash_commands() {
        let mut prompt = prompt();
        assert!(matches!(prompt.interpret("/exit").input_type, InputType::Exit));
        assert!(matches!(prompt.interpret("").input_type, InputType::AskAgain));

        prompt.interpret("/t");
        assert_eq!(prompt.theme(), Theme::Light);
    }

    #[test]
    fn test_quit_words_keep_their_text() {
        let mut prompt = prompt();
        let input = prompt.interpret("QUIT");
        assert!(matches!(input.input_type, InputType::Exit));
        assert_eq!(input.content.as_deref(), Some("QUIT"));

        let input = prompt.interpret("explore");
        assert!(matches!(input.input_type, InputType::Message));
    }
}
