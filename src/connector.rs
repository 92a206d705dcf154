//! Connector owning one MCP session to the Backlog server.
//!
//! The session is `None` until `connect()` succeeds and goes back to `None`
//! on `disconnect()`; callers never see a half-open connection.

use serde_json::Value;

use crate::config::{Config, API_KEY_ENV, DOMAIN_ENV};
use crate::error::{ConnectorError, Result};
use crate::mcp::{LaunchSpec, Launcher, ToolInvocation, ToolSession};
use crate::ui::output;

pub struct Connector<L: Launcher> {
    config: Config,
    launcher: L,
    session: Option<Box<dyn ToolSession>>,
}

impl<L: Launcher> Connector<L> {
    pub fn new(config: Config, launcher: L) -> Self {
        Self {
            config,
            launcher,
            session: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Build the server launch description. Fails before anything is
    /// spawned if the Backlog domain or API key is missing.
    pub fn launch_spec(&self) -> Result<LaunchSpec> {
        let credentials = self.config.credentials()?;

        let mut env = self.config.server_env.clone();
        env.push((DOMAIN_ENV.to_string(), credentials.domain));
        env.push((API_KEY_ENV.to_string(), credentials.api_key));

        Ok(LaunchSpec {
            command: self.config.server.clone(),
            env,
        })
    }

    pub async fn connect(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }

        let spec = match self.launch_spec() {
            Ok(spec) => spec,
            Err(e) => {
                output::error("Connection failed", &e.to_string());
                return Err(e);
            }
        };

        output::debug(
            self.config.verbose,
            &format!("Starting MCP server: {}", spec.command.display()),
        );
        for (key, _) in &self.config.server_env {
            output::debug(
                self.config.verbose,
                &format!("  Setting env var: {} (value hidden)", key),
            );
        }

        match self.launcher.launch(&spec).await {
            Ok(session) => {
                self.session = Some(session);
                output::success("Connected to Backlog MCP server");
                Ok(())
            }
            Err(message) => {
                output::error("Connection failed", &message);
                Err(ConnectorError::Connection(message))
            }
        }
    }

    pub async fn list_tools(&self) -> Result<Vec<Value>> {
        let result = match self.session() {
            Ok(session) => session
                .list_tools()
                .await
                .map_err(ConnectorError::Connection),
            Err(e) => Err(e),
        };

        match result {
            Ok(tools) => {
                output::debug(
                    self.config.verbose,
                    &format!("Server reported {} tools", tools.len()),
                );
                Ok(tools)
            }
            Err(e) => {
                output::error("Failed to list tools", &e.to_string());
                Err(e)
            }
        }
    }

    pub async fn call_tool(&self, invocation: &ToolInvocation) -> Result<Value> {
        let result = self.call_tool_inner(invocation).await;

        if let Err(e) = &result {
            let detail = match e {
                ConnectorError::ToolCall { message, .. } => message.clone(),
                other => other.to_string(),
            };
            output::error(&format!("Tool call failed [{}]", invocation.name), &detail);
        }

        result
    }

    async fn call_tool_inner(&self, invocation: &ToolInvocation) -> Result<Value> {
        if invocation.name.trim().is_empty() {
            return Err(ConnectorError::ToolCall {
                tool: invocation.name.clone(),
                message: "tool name must not be empty".to_string(),
            });
        }

        let session = self.session()?;

        output::debug(
            self.config.verbose,
            &format!("Calling tool: {}", invocation.name),
        );

        session
            .call_tool(invocation)
            .await
            .map_err(|message| ConnectorError::ToolCall {
                tool: invocation.name.clone(),
                message,
            })
    }

    /// Close the session if one is open. Failures are reported as warnings
    /// and never returned.
    pub async fn disconnect(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        match session.close().await {
            Ok(()) => output::success("Disconnected from Backlog MCP server"),
            Err(message) => output::warning("Disconnect warning", &message),
        }
    }

    fn session(&self) -> Result<&dyn ToolSession> {
        self.session
            .as_deref()
            .ok_or_else(|| ConnectorError::Connection("Not connected to Backlog MCP server".into()))
    }
}
