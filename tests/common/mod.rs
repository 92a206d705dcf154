#![allow(dead_code)]

use async_trait::async_trait;
use backlog_connector::config::{Config, ServerCommand};
use backlog_connector::mcp::{LaunchSpec, Launcher, SessionResult, ToolInvocation, ToolSession};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// What the fake server does when asked to call a tool
#[derive(Clone)]
pub enum CallBehavior {
    /// Reply with `{"echo": {"name": ..., "arguments": ...}}`
    Echo,
    Respond(Value),
    Fail(String),
}

/// Shared record of everything the fake launcher and its sessions saw
#[derive(Default)]
pub struct Recorder {
    pub launches: Vec<LaunchSpec>,
    pub calls: Vec<ToolInvocation>,
    pub list_requests: usize,
    pub closes: usize,
}

#[derive(Clone)]
pub struct FakeLauncher {
    pub recorder: Rc<RefCell<Recorder>>,
    pub tools: Vec<Value>,
    pub call_behavior: CallBehavior,
    pub launch_error: Option<String>,
    pub list_error: Option<String>,
    pub close_error: Option<String>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self {
            recorder: Rc::new(RefCell::new(Recorder::default())),
            tools: vec![],
            call_behavior: CallBehavior::Echo,
            launch_error: None,
            list_error: None,
            close_error: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_call_behavior(mut self, behavior: CallBehavior) -> Self {
        self.call_behavior = behavior;
        self
    }

    pub fn failing_launch(mut self, message: &str) -> Self {
        self.launch_error = Some(message.to_string());
        self
    }

    pub fn failing_list(mut self, message: &str) -> Self {
        self.list_error = Some(message.to_string());
        self
    }

    pub fn failing_close(mut self, message: &str) -> Self {
        self.close_error = Some(message.to_string());
        self
    }

    pub fn launches(&self) -> usize {
        self.recorder.borrow().launches.len()
    }

    pub fn calls(&self) -> Vec<ToolInvocation> {
        self.recorder.borrow().calls.clone()
    }

    pub fn closes(&self) -> usize {
        self.recorder.borrow().closes
    }
}

struct FakeSession {
    recorder: Rc<RefCell<Recorder>>,
    tools: Vec<Value>,
    call_behavior: CallBehavior,
    list_error: Option<String>,
    close_error: Option<String>,
}

#[async_trait(?Send)]
impl Launcher for FakeLauncher {
    async fn launch(&self, spec: &LaunchSpec) -> SessionResult<Box<dyn ToolSession>> {
        self.recorder.borrow_mut().launches.push(spec.clone());

        if let Some(message) = &self.launch_error {
            return Err(message.clone());
        }

        Ok(Box::new(FakeSession {
            recorder: Rc::clone(&self.recorder),
            tools: self.tools.clone(),
            call_behavior: self.call_behavior.clone(),
            list_error: self.list_error.clone(),
            close_error: self.close_error.clone(),
        }))
    }
}

#[async_trait(?Send)]
impl ToolSession for FakeSession {
    async fn list_tools(&self) -> SessionResult<Vec<Value>> {
        self.recorder.borrow_mut().list_requests += 1;
        match &self.list_error {
            Some(message) => Err(message.clone()),
            None => Ok(self.tools.clone()),
        }
    }

    async fn call_tool(&self, invocation: &ToolInvocation) -> SessionResult<Value> {
        self.recorder.borrow_mut().calls.push(invocation.clone());
        match &self.call_behavior {
            CallBehavior::Echo => Ok(json!({
                "echo": {
                    "name": invocation.name,
                    "arguments": invocation.arguments,
                }
            })),
            CallBehavior::Respond(value) => Ok(value.clone()),
            CallBehavior::Fail(message) => Err(message.clone()),
        }
    }

    async fn close(self: Box<Self>) -> SessionResult<()> {
        self.recorder.borrow_mut().closes += 1;
        match &self.close_error {
            Some(message) => Err(message.clone()),
            None => Ok(()),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        domain: Some("example.backlog.com".to_string()),
        api_key: Some("secret-key".to_string()),
        server: ServerCommand {
            program: "npx".to_string(),
            args: vec!["backlog-mcp-server".to_string()],
        },
        server_env: vec![],
        verbose: false,
    }
}

pub fn words(input: &[&str]) -> Vec<String> {
    input.iter().map(|s| s.to_string()).collect()
}

pub fn two_tools() -> Vec<Value> {
    vec![
        json!({
            "name": "backlog_get_issues",
            "description": "Get issues",
            "inputSchema": {"type": "object", "properties": {"projectId": {"type": "array"}}}
        }),
        json!({
            "name": "backlog_get_projects",
            "description": "Get projects",
            "inputSchema": {"type": "object"}
        }),
    ]
}
