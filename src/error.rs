use std::fmt;

#[derive(Debug)]
pub enum ConnectorError {
    /// A required setting is missing from the environment
    Configuration(String),
    /// Spawning the server or the MCP handshake failed, or no session is open
    Connection(String),
    ToolCall {
        tool: String,
        message: String,
    },
    UnknownCommand(String),
    ArgumentParse(String),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    /// Config file could not be read or parsed
    ConfigFile(String),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorError::Configuration(msg) => write!(f, "{}", msg),
            ConnectorError::Connection(msg) => write!(f, "{}", msg),
            ConnectorError::ToolCall { tool, message } => {
                write!(f, "Tool '{}' failed: {}", tool, message)
            }
            ConnectorError::UnknownCommand(cmd) => write!(f, "Unknown command: {}", cmd),
            ConnectorError::ArgumentParse(msg) => write!(f, "Invalid tool arguments: {}", msg),
            ConnectorError::IoError(e) => write!(f, "IO error: {}", e),
            ConnectorError::JsonError(e) => write!(f, "JSON error: {}", e),
            ConnectorError::ConfigFile(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConnectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectorError::IoError(e) => Some(e),
            ConnectorError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConnectorError {
    fn from(err: std::io::Error) -> Self {
        ConnectorError::IoError(err)
    }
}

impl From<serde_json::Error> for ConnectorError {
    fn from(err: serde_json::Error) -> Self {
        ConnectorError::JsonError(err)
    }
}

impl From<anyhow::Error> for ConnectorError {
    fn from(err: anyhow::Error) -> Self {
        ConnectorError::ConfigFile(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, ConnectorError>;
