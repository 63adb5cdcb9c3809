use include_dir::{include_dir, Dir};
use serde::Serialize;
use tera::{Context, Error as TeraError, Tera};

static PROMPTS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/prompts");

pub fn load_prompt<T: Serialize>(template: &str, context_data: &T) -> Result<String, TeraError> {
    let mut tera = Tera::default();
    tera.add_raw_template("inline_template", template)?;
    let context = Context::from_serialize(context_data)?;
    let rendered = tera.render("inline_template", &context)?;
    Ok(rendered)
}

/// Render one of the prompt templates compiled into the crate, e.g. `agent_system.md`
pub fn render_prompt<T: Serialize>(name: &str, context_data: &T) -> Result<String, TeraError> {
    let template = PROMPTS
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| TeraError::msg(format!("Unknown prompt template: {}", name)))?;
    load_prompt(template, context_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tool::ToolSpec;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_load_prompt() {
        let template = "Hello, {{ name }}! You are {{ age }} years old.";
        let mut context = HashMap::new();
        context.insert("name".to_string(), "Alice".to_string());
        context.insert("age".to_string(), 30.to_string());

        let result = load_prompt(template, &context).unwrap();
        assert_eq!(result, "Hello, Alice! You are 30 years old.");
    }

    #[test]
    fn test_load_prompt_missing_variable() {
        let template = "Hello, {{ name }}! You are {{ age }} years old.";
        let mut context = HashMap::new();
        context.insert("name".to_string(), "Alice".to_string());
        // 'age' is missing from context
        let result = load_prompt(template, &context);
        assert!(result.is_err());
    }

    #[test]
    fn test_render_unknown_template() {
        let context: HashMap<String, String> = HashMap::new();
        let err = render_prompt("does_not_exist.md", &context).unwrap_err();
        assert!(err.to_string().contains("does_not_exist.md"));
    }

    #[test]
    fn test_every_embedded_template_is_valid_tera() {
        for file in PROMPTS.files() {
            let source = file.contents_utf8().unwrap();
            let mut tera = Tera::default();
            assert!(
                tera.add_raw_template("check", source).is_ok(),
                "{} failed to parse",
                file.path().display()
            );
        }
    }

    #[test]
    fn test_load_prompt_with_tools() {
        let template = "### Tool Descriptions\n{% for tool in tools %}\n{{tool.name}}: {{tool.description}}{% endfor %}";

        let tools = vec![
            ToolSpec::new(
                "roll_dice",
                "Roll dice for game mechanics",
                json!({"sides": "Number of sides", "count": "Number of dice"}),
            ),
            ToolSpec::new(
                "generate_loot",
                "Generate loot",
                json!({"monster_level": "Level of the defeated monster"}),
            ),
        ];

        let mut context = HashMap::new();
        context.insert("tools".to_string(), tools);

        let result = load_prompt(template, &context).unwrap();
        let expected =
            "### Tool Descriptions\n\nroll_dice: Roll dice for game mechanics\ngenerate_loot: Generate loot";
        assert_eq!(result, expected);
    }
}
