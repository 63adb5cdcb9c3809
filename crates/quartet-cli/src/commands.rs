pub mod career;
pub mod game;
pub mod student;
pub mod travel;

use std::io::Read;

use anyhow::{Context, Result};

/// Comma separated list flag, e.g. `--skills rust,sql`
pub fn list_arg(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// `-` reads the whole of stdin, anything else is taken literally
pub fn text_arg(value: &str) -> Result<String> {
    if value != "-" {
        return Ok(value.to_string());
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_arg_drops_blanks() {
        let values = vec![" rust".to_string(), "".to_string(), "sql ".to_string()];
        assert_eq!(list_arg(&values), vec!["rust", "sql"]);
    }

    #[test]
    fn test_text_arg_literal() {
        assert_eq!(text_arg("hello").unwrap(), "hello");
    }
}
