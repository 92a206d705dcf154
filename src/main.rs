use clap::Parser;
use std::io;
use std::process;

use backlog_connector::cli::Args;
use backlog_connector::config::Config;
use backlog_connector::connector::Connector;
use backlog_connector::mcp::StdioLauncher;
use backlog_connector::orchestrator;
use backlog_connector::ui::{logging, output};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = Config::from_env_and_args(&args);
    logging::init(config.verbose);
    output::debug(config.verbose, &format!("Resolved configuration: {:?}", config));

    let mut connector = Connector::new(config, StdioLauncher);
    let mut stdout = io::stdout().lock();

    let code = orchestrator::run(&args.command, &mut connector, &mut stdout).await;
    process::exit(code);
}
