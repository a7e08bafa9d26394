//! kitdex MCP server
//!
//! Exposes the Composer Kit component registry from `kitdex-core` as MCP
//! tools over stdio. See [`tools`] for the tool surface.

pub mod error;
pub mod server;
pub mod tools;

pub use error::{McpError, McpResult};
pub use server::McpServer;

use kitdex_core::Config;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// stdout carries the protocol, so logs must never go there. `filter` uses
/// `RUST_LOG` syntax; an unparsable filter falls back to `info`.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Main entry point for the MCP server
///
/// Creates the server for `config` and runs it over stdio until the client
/// disconnects.
///
/// # Errors
///
/// Returns an error if the server fails to initialize or run.
pub async fn serve_stdio(config: Config) -> McpResult<()> {
    tracing::debug!(
        owner = %config.source.owner,
        repo = %config.source.repo,
        git_ref = %config.source.git_ref,
        "initializing kitdex MCP server"
    );

    let server = McpServer::new(config)?;
    server.serve_stdio().await
}
