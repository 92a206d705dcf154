use serde_json::{Map, Value};

use crate::config::ServerCommand;

/// A tool name plus the JSON object sent as its arguments
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn without_arguments(name: impl Into<String>) -> Self {
        Self::new(name, Map::new())
    }
}

/// Everything needed to start the MCP server process.
/// `env` is layered on top of the inherited environment.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchSpec {
    pub command: ServerCommand,
    pub env: Vec<(String, String)>,
}

impl LaunchSpec {
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
