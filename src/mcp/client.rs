use std::process::Stdio;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rmcp::{
    model::{CallToolRequestParam, ClientInfo, Implementation},
    service::RunningService,
    RoleClient, ServiceExt,
};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::process::{Child, ChildStdout, Command};

use super::session::{Launcher, SessionResult, ToolSession};
use super::types::{LaunchSpec, ToolInvocation};

const CLIENT_NAME: &str = "backlog-connector";
const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

// Server lines can be large tool results; the pipe only needs to hold one
// in flight since the SDK reads concurrently.
const PIPE_CAPACITY: usize = 64 * 1024;

/// Spawns the MCP server as a child process and talks to it over stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct StdioLauncher;

/// Session backed by a running `rmcp` client service.
///
/// The SDK decodes responses into its own typed models, which drop any
/// field they don't know about. Server output is therefore teed through a
/// `ResultTap` so the untouched `result` object can be returned instead.
pub struct McpSession {
    service: RunningService<RoleClient, ClientInfo>,
    child: Child,
    tap: ResultTap,
}

/// Holds the `result` member of the latest JSON-RPC response the server
/// wrote. Only one request is in flight at a time, so after a request
/// completes the stored value is its response.
#[derive(Clone, Default)]
struct ResultTap {
    latest: Arc<Mutex<Option<Value>>>,
}

impl ResultTap {
    fn record(&self, line: &str) {
        let Ok(message) = serde_json::from_str::<Value>(line) else {
            return;
        };
        if message.get("id").is_none() {
            return;
        }
        if let Some(result) = message.get("result") {
            if let Ok(mut latest) = self.latest.lock() {
                *latest = Some(result.clone());
            }
        }
    }

    fn take(&self) -> Option<Value> {
        self.latest.lock().ok().and_then(|mut latest| latest.take())
    }

    /// Forward server stdout to the SDK line by line, recording results
    /// before the SDK can see them.
    async fn pump(self, stdout: ChildStdout, mut sdk_side: DuplexStream) {
        let mut lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            self.record(&line);
            if sdk_side.write_all(line.as_bytes()).await.is_err()
                || sdk_side.write_all(b"\n").await.is_err()
            {
                break;
            }
        }
        tracing::debug!("MCP server stdout closed");
    }
}

fn client_info() -> ClientInfo {
    ClientInfo {
        client_info: Implementation {
            name: CLIENT_NAME.to_string(),
            version: CLIENT_VERSION.to_string(),
            ..Implementation::from_build_env()
        },
        ..ClientInfo::default()
    }
}

#[async_trait(?Send)]
impl Launcher for StdioLauncher {
    async fn launch(&self, spec: &LaunchSpec) -> SessionResult<Box<dyn ToolSession>> {
        let mut cmd = Command::new(&spec.command.program);
        if !spec.command.args.is_empty() {
            cmd.args(&spec.command.args);
        }
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        tracing::debug!("Spawning MCP server: {}", spec.command.display());

        let mut child = cmd.spawn().map_err(|e| {
            format!(
                "Failed to spawn MCP server '{}': {}",
                spec.command.display(),
                e
            )
        })?;
        let stdin = child
            .stdin
            .take()
            .ok_or("MCP server stdin was not captured")?;
        let stdout = child
            .stdout
            .take()
            .ok_or("MCP server stdout was not captured")?;

        let tap = ResultTap::default();
        let (sdk_side, pump_side) = tokio::io::duplex(PIPE_CAPACITY);
        tokio::spawn(tap.clone().pump(stdout, pump_side));

        // On handshake failure `child` is dropped here, which kills it.
        let service = client_info()
            .serve((sdk_side, stdin))
            .await
            .map_err(|e| format!("MCP handshake failed: {}", e))?;

        if let Some(info) = service.peer_info() {
            tracing::debug!(
                "Connected to MCP server: {} v{}",
                info.server_info.name,
                info.server_info.version
            );
        }

        Ok(Box::new(McpSession {
            service,
            child,
            tap,
        }))
    }
}

impl McpSession {
    fn raw_result(&self, method: &str) -> SessionResult<Value> {
        self.tap
            .take()
            .ok_or_else(|| format!("No raw result captured for {}", method))
    }
}

#[async_trait(?Send)]
impl ToolSession for McpSession {
    async fn list_tools(&self) -> SessionResult<Vec<Value>> {
        self.tap.take();
        self.service
            .list_tools(Default::default())
            .await
            .map_err(|e| e.to_string())?;

        let mut raw = self.raw_result("tools/list")?;
        match raw.get_mut("tools").map(Value::take) {
            Some(Value::Array(tools)) => Ok(tools),
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(other) => Err(format!("tools/list returned non-array tools: {}", other)),
        }
    }

    async fn call_tool(&self, invocation: &ToolInvocation) -> SessionResult<Value> {
        self.tap.take();
        self.service
            .call_tool(CallToolRequestParam {
                name: invocation.name.clone().into(),
                arguments: Some(invocation.arguments.clone()),
                task: None,
            })
            .await
            .map_err(|e| e.to_string())?;

        self.raw_result("tools/call")
    }

    async fn close(self: Box<Self>) -> SessionResult<()> {
        let McpSession {
            service, mut child, ..
        } = *self;

        let reason = service.cancel().await.map_err(|e| e.to_string())?;
        tracing::debug!("MCP session closed: {:?}", reason);

        match child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!("MCP server exited: {}", status);
                Ok(())
            }
            _ => child.kill().await.map_err(|e| e.to_string()),
        }
    }
}
