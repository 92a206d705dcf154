use tracing_subscriber::EnvFilter;

/// Route `tracing` output (mostly from the MCP SDK) to stderr.
/// `RUST_LOG` wins; otherwise `debug` when verbose and `warn` when not.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
