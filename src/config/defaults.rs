pub const DOMAIN_ENV: &str = "BACKLOG_DOMAIN";
pub const API_KEY_ENV: &str = "BACKLOG_API_KEY";
pub const COMMAND_ENV: &str = "BACKLOG_MCP_COMMAND";
pub const VERBOSE_ENV: &str = "BACKLOG_CONNECTOR_VERBOSE";

pub fn default_server_command() -> String {
    "npx".to_string()
}

pub fn default_server_args() -> Vec<String> {
    vec!["backlog-mcp-server".to_string()]
}

pub fn is_truthy(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}
