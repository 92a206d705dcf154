use clap::Parser;

use crate::error::{ConnectorError, Result};

#[derive(Parser, Debug)]
#[command(name = "backlog-connector")]
#[command(about = "On-demand MCP client for the Backlog MCP server", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    #[arg(short = 'v', long = "verbose", help = "Print debug diagnostics to stderr")]
    pub verbose: bool,

    #[arg(
        help = "Command to run: list | call <tool> [json]",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// A parsed connector invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    List,
    Call {
        tool: String,
        arguments: serde_json::Map<String, serde_json::Value>,
    },
}

impl Command {
    /// Parse the free-form command words. The JSON argument blob is parsed
    /// here so malformed input is rejected before anything is spawned.
    pub fn parse(words: &[String]) -> Result<Self> {
        let Some(first) = words.first() else {
            return Ok(Command::Help);
        };

        match first.as_str() {
            "--help" | "-h" => Ok(Command::Help),
            "list" => Ok(Command::List),
            "call" if words.len() >= 2 => {
                let tool = words[1].clone();
                // An empty blob (e.g. from an unset "$ARGS") means no arguments
                let arguments = match words.get(2).filter(|raw| !raw.is_empty()) {
                    Some(raw) => parse_tool_arguments(raw)?,
                    None => serde_json::Map::new(),
                };
                Ok(Command::Call { tool, arguments })
            }
            other => Err(ConnectorError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parse a JSON argument blob; only objects are accepted as tool arguments
pub fn parse_tool_arguments(raw: &str) -> Result<serde_json::Map<String, serde_json::Value>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ConnectorError::ArgumentParse(e.to_string()))?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(ConnectorError::ArgumentParse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

pub const USAGE: &str = r#"
Backlog MCP Connector - on-demand Backlog integration over MCP

Usage:
  backlog-connector [--verbose] list                  List all available tools
  backlog-connector [--verbose] call <tool> [json]    Call a specific tool with JSON arguments

Examples:
  backlog-connector list
  backlog-connector call backlog_get_issues '{"fields":"{ id issueKey summary }", "projectId":[123]}'

Environment Variables:
  BACKLOG_DOMAIN              Your Backlog space domain (e.g., yourspace.backlog.com)
  BACKLOG_API_KEY             Your Backlog API key
  BACKLOG_MCP_COMMAND         Override the server command (default: npx backlog-mcp-server)
  BACKLOG_CONNECTOR_VERBOSE   Enable debug diagnostics (true, 1, yes)
"#;
