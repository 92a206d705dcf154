use std::io::Write;

use serde_json::Value;

use crate::cli::{Command, USAGE};
use crate::connector::Connector;
use crate::error::Result;
use crate::mcp::{Launcher, ToolInvocation};
use crate::ui::output;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Run one CLI invocation and return the process exit code.
///
/// Payloads are written to `out` only after the whole operation succeeded,
/// so a failure never leaves partial JSON behind.
pub async fn run<L, W>(words: &[String], connector: &mut Connector<L>, out: &mut W) -> i32
where
    L: Launcher,
    W: Write,
{
    match execute(words, connector, out).await {
        Ok(()) => {
            connector.disconnect().await;
            EXIT_SUCCESS
        }
        Err(e) => {
            output::error("Error", &e.to_string());
            connector.disconnect().await;
            EXIT_FAILURE
        }
    }
}

async fn execute<L, W>(words: &[String], connector: &mut Connector<L>, out: &mut W) -> Result<()>
where
    L: Launcher,
    W: Write,
{
    let payload = match Command::parse(words)? {
        Command::Help => {
            write!(out, "{}", USAGE)?;
            out.flush()?;
            return Ok(());
        }
        Command::List => {
            connector.connect().await?;
            Value::Array(connector.list_tools().await?)
        }
        Command::Call { tool, arguments } => {
            connector.connect().await?;
            connector
                .call_tool(&ToolInvocation::new(tool, arguments))
                .await?
        }
    };

    print_json(out, &payload)
}

/// Pretty-print a JSON payload followed by a newline
pub fn print_json<W: Write>(out: &mut W, payload: &Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(payload)?;
    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}
