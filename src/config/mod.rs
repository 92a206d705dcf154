mod defaults;
mod server;
mod validation;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::error::ConnectorError;
use crate::ui::output;

pub use defaults::{API_KEY_ENV, COMMAND_ENV, DOMAIN_ENV, VERBOSE_ENV};
pub use server::{ServerCommand, ServerConfig};
pub use validation::{expand_env_var_in_string, expand_env_vars};

/// Contents of `.backlog-connector.yaml` (or `.json`)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Settings resolved once at startup and handed to the connector.
///
/// The Backlog domain and API key are kept optional here; the connector
/// checks them on `connect()` so that `--help` works without them.
#[derive(Clone)]
pub struct Config {
    pub domain: Option<String>,
    pub api_key: Option<String>,
    pub server: ServerCommand,
    /// Extra variables for the server process, already expanded
    pub server_env: Vec<(String, String)>,
    pub verbose: bool,
}

/// The two values the Backlog MCP server needs
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub domain: String,
    pub api_key: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("api_key", &self.api_key.as_ref().map(|_| "<hidden>"))
            .field("server", &self.server)
            .field("server_env", &self.server_env.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("domain", &self.domain)
            .field("api_key", &"<hidden>")
            .finish()
    }
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Self {
        let file_config = match FileConfig::load() {
            Ok(config) => config,
            Err(e) => {
                output::warning("Ignoring config file", &ConnectorError::from(e).to_string());
                FileConfig::default()
            }
        };

        Self::resolve(args.verbose, &file_config, |name| env::var(name).ok())
    }

    /// Resolve settings from a CLI flag, a loaded file and an environment lookup.
    /// Precedence: CLI > environment > file > default.
    pub fn resolve<F>(cli_verbose: bool, file: &FileConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let domain = non_empty(DOMAIN_ENV);
        let api_key = non_empty(API_KEY_ENV);

        let server = non_empty(COMMAND_ENV)
            .and_then(|line| ServerCommand::from_command_line(&line))
            .or_else(|| {
                file.server.command.clone().map(|program| ServerCommand {
                    program,
                    args: file.server.args.clone().unwrap_or_default(),
                })
            })
            .unwrap_or_else(|| ServerCommand {
                program: defaults::default_server_command(),
                args: defaults::default_server_args(),
            });

        let server_env = expand_env_vars(&file.server.env, &lookup);

        let verbose = cli_verbose
            || lookup(VERBOSE_ENV)
                .map(|v| defaults::is_truthy(&v))
                .or(file.verbose)
                .unwrap_or(false);

        Config {
            domain,
            api_key,
            server,
            server_env,
            verbose,
        }
    }

    pub fn credentials(&self) -> crate::error::Result<Credentials> {
        match (&self.domain, &self.api_key) {
            (Some(domain), Some(api_key)) => Ok(Credentials {
                domain: domain.clone(),
                api_key: api_key.clone(),
            }),
            _ => Err(ConnectorError::Configuration(format!(
                "Missing required environment variables: {} and {} must be set",
                DOMAIN_ENV, API_KEY_ENV
            ))),
        }
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_paths())
    }

    /// Load the first config file that exists among `paths`
    pub fn load_from(paths: &[PathBuf]) -> Result<Self> {
        for path in paths {
            if path.exists() {
                return Self::read(path);
            }
        }

        Ok(FileConfig::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|s| s.to_str()),
            Some("yaml") | Some("yml")
        );

        let config = if is_yaml {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".backlog-connector.yaml"),
            PathBuf::from(".backlog-connector.yml"),
            PathBuf::from(".backlog-connector.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("backlog-connector");
            paths.push(config_dir.join("config.yaml"));
            paths.push(config_dir.join("config.yml"));
            paths.push(config_dir.join("config.json"));
        }

        paths
    }
}
