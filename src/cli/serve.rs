//! Serve command handler.
//!
//! Implements the `serve` subcommand that starts the local viewer server.

use crate::config::{ServeConfig, Validatable};
use crate::pipeline::parse_log_with_context;
use crate::server::run_server;
use anyhow::{bail, Context, Result};

/// Run the serve command.
///
/// The primary log is loaded before any socket is bound, so a missing or
/// unreadable log is reported once and no server starts.
#[allow(clippy::needless_pass_by_value)]
pub fn run_serve(config: ServeConfig) -> Result<()> {
    let errors = config.server.validate();
    if !errors.is_empty() {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("invalid server configuration: {}", messages.join("; "));
    }

    let parsed = parse_log_with_context(&config.server.log_file, config.behavior.quiet)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    runtime.block_on(run_server(&config, parsed))
}
