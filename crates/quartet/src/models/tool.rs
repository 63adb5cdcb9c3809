use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A capability an agent advertises to the model inside its prompt.
///
/// Nothing executes these; the descriptors only tell the model what the
/// agent knows how to do so replies can reference them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSpec {
    /// The name of the tool
    pub name: String,
    /// A description of what the tool does
    pub description: String,
    /// Parameter names mapped to short descriptions
    pub parameters: Value,
}

impl ToolSpec {
    pub fn new<N, D>(name: N, description: D, parameters: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        ToolSpec {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}
