use async_trait::async_trait;
use serde_json::Value;

use super::types::{LaunchSpec, ToolInvocation};

/// Errors at this layer are plain messages; the connector decides which
/// `ConnectorError` kind they become.
pub type SessionResult<T> = std::result::Result<T, String>;

/// One live, initialized MCP client session
#[async_trait(?Send)]
pub trait ToolSession {
    /// Issue a single `tools/list` request
    async fn list_tools(&self) -> SessionResult<Vec<Value>>;

    /// Issue a single `tools/call` request and return the raw result
    async fn call_tool(&self, invocation: &ToolInvocation) -> SessionResult<Value>;

    /// Shut the session down and release the server process
    async fn close(self: Box<Self>) -> SessionResult<()>;
}

/// Starts a server and completes the handshake
#[async_trait(?Send)]
pub trait Launcher {
    async fn launch(&self, spec: &LaunchSpec) -> SessionResult<Box<dyn ToolSession>>;
}
