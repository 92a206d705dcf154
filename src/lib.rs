pub mod cli;
pub mod config;
pub mod connector;
pub mod error;
pub mod mcp;
pub mod orchestrator;
pub mod ui;
