pub mod client;
pub mod session;
pub mod types;

pub use client::{McpSession, StdioLauncher};
pub use session::{Launcher, SessionResult, ToolSession};
pub use types::{LaunchSpec, ToolInvocation};
